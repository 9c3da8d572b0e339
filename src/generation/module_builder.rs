//! Assembles the two files of every module
//!
//! Per group: plan each operation (function name, argument types, synthesized
//! interfaces), then lay out the types file and the index file. Nothing here
//! touches the filesystem.

use indexmap::IndexSet;

use super::dependencies::DependencyCollector;
use super::interface::InterfaceEmitter;
use super::naming::{
    Groups, NamingEngine, QUERY_SUFFIX, REQUEST_SUFFIX, RESPONSE_DATA_SUFFIX, RESPONSE_ITEM_SUFFIX,
    function_name, interface_name,
};
use super::payload::{PayloadTypes, RequestShape, ResponseShape, request_shape, response_shape};
use super::resolver::{TypeResolver, VOID_TYPE};
use super::sanitizers::inline_comment;
use super::template::{CompiledTemplate, TemplateFields};
use super::types::{GeneratedInterface, GeneratedModule};
use crate::core::{NamingConfig, TypesConfig};
use crate::infrastructure::openapi::{HttpMethod, OpenApiDocument, OperationRef};

/// Built-in template for one request function
pub const DEFAULT_FUNCTION_TEMPLATE: &str = include_str!("../../templates/api-function.template");

/// Import path of the types file as seen from the index file
pub const TYPE_IMPORT_PATH: &str = "./types";

pub const QUERY_DIVIDER: &str = "// Query parameter interfaces";
pub const REQUEST_DIVIDER: &str = "// Request body interfaces";
pub const RESPONSE_DIVIDER: &str = "// Response data interfaces";

/// Template texts used for the index file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTemplates {
    pub function: String,
    /// Index header; the built-in import block is used when absent
    pub header: Option<String>,
}

impl Default for ModuleTemplates {
    fn default() -> Self {
        Self {
            function: DEFAULT_FUNCTION_TEMPLATE.to_string(),
            header: None,
        }
    }
}

/// Everything the index and types files need to know about one operation
#[derive(Debug)]
struct OperationPlan<'a> {
    operation: OperationRef<'a>,
    function_name: String,
    path_params: Vec<(String, String)>,
    query: Option<GeneratedInterface>,
    request_type: Option<String>,
    request_interface: Option<GeneratedInterface>,
    response_type: String,
    response_interface: Option<GeneratedInterface>,
    direct_references: Vec<String>,
}

impl OperationPlan<'_> {
    fn query_type(&self) -> Option<&str> {
        self.query.as_ref().map(|q| q.name.as_str())
    }
}

/// Builds [`GeneratedModule`]s for the groups of one document
#[derive(Debug)]
pub struct ModuleBuilder<'a> {
    document: &'a OpenApiDocument,
    naming: NamingEngine<'a>,
    resolver: TypeResolver<'a>,
    payloads: PayloadTypes<'a>,
    interfaces: InterfaceEmitter<'a>,
    dependencies: DependencyCollector<'a>,
    function_template: CompiledTemplate<'a>,
    header_template: Option<CompiledTemplate<'a>>,
}

impl<'a> ModuleBuilder<'a> {
    pub fn new(
        document: &'a OpenApiDocument,
        types: &'a TypesConfig,
        naming: &'a NamingConfig,
        templates: &'a ModuleTemplates,
    ) -> Self {
        Self {
            document,
            naming: NamingEngine::new(naming),
            resolver: TypeResolver::new(types),
            payloads: PayloadTypes::new(types),
            interfaces: InterfaceEmitter::new(types),
            dependencies: DependencyCollector::new(document, types),
            function_template: CompiledTemplate::parse(&templates.function),
            header_template: templates.header.as_deref().map(CompiledTemplate::parse),
        }
    }

    /// Operations grouped into modules
    pub fn groups(&self) -> Groups<'a> {
        self.naming.group(self.document)
    }

    /// One module per group, in group order
    pub fn build_all(&self) -> Vec<GeneratedModule> {
        self.groups()
            .iter()
            .map(|(key, operations)| self.build_module(key, operations))
            .collect()
    }

    pub fn build_module(&self, key: &str, operations: &[OperationRef<'a>]) -> GeneratedModule {
        let plans: Vec<OperationPlan<'a>> = operations.iter().map(|op| self.plan(*op)).collect();

        let mut seen = IndexSet::new();
        for plan in &plans {
            if !seen.insert(plan.function_name.as_str()) {
                tracing::warn!(
                    module = %key,
                    function = %plan.function_name,
                    url = %plan.operation.url,
                    method = %plan.operation.method,
                    "Duplicate function name in module"
                );
            }
        }

        let types_file = self.types_file(operations, &plans);
        let index_file = self.index_file(&plans);

        tracing::debug!(
            module = %key,
            operations = plans.len(),
            "Built module"
        );

        GeneratedModule {
            key: key.to_string(),
            types_file,
            index_file,
        }
    }

    fn plan(&self, operation: OperationRef<'a>) -> OperationPlan<'a> {
        let name = function_name(operation.url, operation.method);
        let op = operation.operation;

        let path_params = op
            .path_parameters()
            .map(|p| (p.name.clone(), self.resolver.parameter_type(p)))
            .collect();

        let query = self
            .interfaces
            .parameters_interface(op.query_parameters(), &interface_name(&name, QUERY_SUFFIX));

        let request_interface = match request_shape(op) {
            Some(RequestShape::Inline(schema)) => self
                .interfaces
                .interface(schema, &interface_name(&name, REQUEST_SUFFIX)),
            _ => None,
        };

        let response_interface = match response_shape(op) {
            ResponseShape::InlineItems(items) => self
                .interfaces
                .interface(items, &interface_name(&name, RESPONSE_ITEM_SUFFIX)),
            ResponseShape::InlineData(data) => self
                .interfaces
                .interface(data, &interface_name(&name, RESPONSE_DATA_SUFFIX)),
            _ => None,
        };

        OperationPlan {
            operation,
            request_type: self.payloads.request_type(op, &name),
            response_type: self.payloads.response_type(op, &name),
            direct_references: self.dependencies.direct_references(&operation),
            function_name: name,
            path_params,
            query,
            request_interface,
            response_interface,
        }
    }

    /// Closure declarations, then the synthesized interfaces by kind
    fn types_file(&self, operations: &[OperationRef<'a>], plans: &[OperationPlan<'a>]) -> String {
        let mut blocks: Vec<String> = self
            .dependencies
            .collect_closure(operations)
            .iter()
            .filter_map(|name| {
                let schema = self.document.schema(name)?;
                let body = self.interfaces.emit(schema, name);
                Some(if body.is_empty() {
                    format!("export type {name} = {};\n", self.resolver.resolve(Some(schema), None))
                } else {
                    body
                })
            })
            .collect();

        let sections = [
            (QUERY_DIVIDER, plans.iter().filter_map(|p| p.query.as_ref()).collect::<Vec<_>>()),
            (
                REQUEST_DIVIDER,
                plans.iter().filter_map(|p| p.request_interface.as_ref()).collect(),
            ),
            (
                RESPONSE_DIVIDER,
                plans.iter().filter_map(|p| p.response_interface.as_ref()).collect(),
            ),
        ];
        for (divider, interfaces) in sections {
            if interfaces.is_empty() {
                continue;
            }
            let bodies: Vec<&str> = interfaces.iter().map(|i| i.body.as_str()).collect();
            blocks.push(format!("{divider}\n{}", bodies.join("\n")));
        }

        blocks.join("\n")
    }

    /// Names the index file imports: component schemas used directly by a
    /// signature, then the synthesized interfaces
    fn type_imports(&self, plans: &[OperationPlan<'a>]) -> Vec<String> {
        let mut imports: IndexSet<String> = plans
            .iter()
            .flat_map(|p| p.direct_references.iter().cloned())
            .collect();
        imports.extend(plans.iter().filter_map(|p| p.query.as_ref()).map(|i| i.name.clone()));
        imports.extend(
            plans
                .iter()
                .filter_map(|p| p.request_interface.as_ref())
                .map(|i| i.name.clone()),
        );
        imports.extend(
            plans
                .iter()
                .filter_map(|p| p.response_interface.as_ref())
                .map(|i| i.name.clone()),
        );
        imports.into_iter().collect()
    }

    fn index_file(&self, plans: &[OperationPlan<'a>]) -> String {
        let imports = self.type_imports(plans);

        let mut content = match &self.header_template {
            Some(header) => header.render(
                &TemplateFields::new()
                    .with("typeImports", imports.join(", "))
                    .with("typeImportPath", TYPE_IMPORT_PATH)
                    .with("hasTypeImports", !imports.is_empty()),
            ),
            None => default_header(&imports),
        };

        for plan in plans {
            content.push_str(&self.function_template.render(&function_fields(plan)));
        }
        content
    }
}

fn default_header(imports: &[String]) -> String {
    let mut header = String::from("import request from '@/utils/request';\n");
    header.push_str("import { AxiosPromise } from 'axios';\n");
    if !imports.is_empty() {
        header.push_str(&format!(
            "import {{ {} }} from '{TYPE_IMPORT_PATH}';\n",
            imports.join(", ")
        ));
    }
    header.push('\n');
    header
}

/// Field record of the function template
fn function_fields(plan: &OperationPlan<'_>) -> TemplateFields {
    let method = plan.operation.method;
    let query_type = plan.query_type();

    let mut params: Vec<String> = plan
        .path_params
        .iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect();
    let mut documented: Vec<&str> = plan.path_params.iter().map(|(name, _)| name.as_str()).collect();

    let (data_param, params_param) = match method {
        HttpMethod::Get => (None, Some("query")),
        HttpMethod::Delete => (None, Some("params")),
        m if m.carries_body() => (Some("data"), Some("query")),
        _ => (None, None),
    };

    if let (Some(data), Some(request_type)) = (data_param, plan.request_type.as_deref()) {
        params.push(format!("{data}: {request_type}"));
        documented.push(data);
    }
    if let (Some(query), Some(query_type)) = (params_param, query_type) {
        params.push(format!("{query}?: {query_type}"));
        documented.push(query);
    }

    let has_data = data_param.is_some() && plan.request_type.is_some();
    let has_params = params_param.is_some() && query_type.is_some();

    TemplateFields::new()
        .with("summary", inline_comment(plan.operation.operation.summary_text()))
        .with(
            "paramName",
            documented
                .iter()
                .map(|name| format!(" * @param {name}"))
                .collect::<Vec<_>>()
                .join("\n"),
        )
        .with("hasReturns", plan.response_type != VOID_TYPE)
        .with("functionName", plan.function_name.as_str())
        .with("params", params.join(", "))
        .with("returnType", plan.response_type.as_str())
        .with("url", url_expression(plan))
        .with("method", method.as_str())
        .with("hasData", has_data)
        .with("dataParam", data_param.unwrap_or_default())
        .with("hasParams", has_params)
        .with("paramsParam", params_param.unwrap_or_default())
}

/// Quoted URL, or a template literal interpolating the path parameters
fn url_expression(plan: &OperationPlan<'_>) -> String {
    let url = plan.operation.url;
    if plan.path_params.is_empty() {
        return format!("'{url}'");
    }
    let templated = plan.path_params.iter().fold(url.to_string(), |acc, (name, _)| {
        acc.replace(&format!("{{{name}}}"), &format!("${{{name}}}"))
    });
    format!("`{templated}`")
}
