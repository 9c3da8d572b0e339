//! Dependency closure over the named component schemas

use indexmap::{IndexMap, IndexSet};

use super::naming::function_name;
use super::payload::{PayloadTypes, RequestShape, ResponseShape, request_shape, response_shape};
use super::resolver::TypeResolver;
use crate::core::TypesConfig;
use crate::infrastructure::openapi::{OpenApiDocument, OperationRef, Schema};

/// Named schemas as nodes, `$ref` occurrences as edges.
///
/// Only `properties[*].$ref` and `properties[*].items.$ref` count as edges.
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph<'d> {
    edges: IndexMap<&'d str, Vec<&'d str>>,
}

impl<'d> SchemaGraph<'d> {
    pub fn from_schemas(schemas: &'d IndexMap<String, Schema>) -> Self {
        let edges = schemas
            .iter()
            .map(|(name, schema)| (name.as_str(), property_refs(schema)))
            .collect();
        Self { edges }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    pub fn edges(&self, name: &str) -> &[&'d str] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every node reachable from `seeds`, in depth-first preorder.
    ///
    /// Seeds that are not nodes are skipped. A visited node is never
    /// expanded again, so cycles terminate.
    pub fn closure<'s>(&self, seeds: impl IntoIterator<Item = &'s str>) -> IndexSet<String> {
        let mut visited = IndexSet::new();
        let mut stack: Vec<&str> = Vec::new();

        for seed in seeds {
            stack.push(seed);
            while let Some(name) = stack.pop() {
                if visited.contains(name) || !self.contains(name) {
                    continue;
                }
                visited.insert(name.to_string());
                stack.extend(self.edges(name).iter().rev().copied());
            }
        }
        visited
    }
}

/// `$ref` names carried by the properties of `schema`, in declaration order
pub fn property_refs(schema: &Schema) -> Vec<&str> {
    schema
        .properties
        .iter()
        .flat_map(|properties| properties.values())
        .filter_map(|property| {
            property
                .ref_name()
                .or_else(|| property.items.as_deref().and_then(Schema::ref_name))
        })
        .collect()
}

/// Collects the named schemas a set of operations needs declared
#[derive(Debug, Clone)]
pub struct DependencyCollector<'d> {
    document: &'d OpenApiDocument,
    graph: SchemaGraph<'d>,
    resolver: TypeResolver<'d>,
    payloads: PayloadTypes<'d>,
}

impl<'d> DependencyCollector<'d> {
    pub fn new(document: &'d OpenApiDocument, types: &'d TypesConfig) -> Self {
        Self {
            document,
            graph: SchemaGraph::from_schemas(&document.components.schemas),
            resolver: TypeResolver::new(types),
            payloads: PayloadTypes::new(types),
        }
    }

    /// Component schema named by a type expression
    pub fn component_name<'e>(&self, expression: &'e str) -> Option<&'e str> {
        self.resolver
            .referenced_name(expression)
            .filter(|name| self.document.schema(name).is_some())
    }

    /// Component schemas named directly in the signature of the generated
    /// function: path parameter types, request type and return type
    pub fn direct_references(&self, operation: &OperationRef<'_>) -> Vec<String> {
        let name = function_name(operation.url, operation.method);
        let op = operation.operation;

        let mut expressions: Vec<String> = op
            .path_parameters()
            .map(|p| self.resolver.parameter_type(p))
            .collect();
        expressions.extend(self.payloads.request_type(op, &name));
        expressions.push(self.payloads.response_type(op, &name));

        let mut names: Vec<String> = Vec::new();
        for expression in &expressions {
            if let Some(component) = self.component_name(expression) {
                if !names.iter().any(|n| n == component) {
                    names.push(component.to_string());
                }
            }
        }
        names
    }

    /// Component schemas referenced from the inline shapes that get
    /// synthesized interfaces (query parameters, inline bodies and payloads)
    pub fn inline_references(&self, operation: &OperationRef<'d>) -> Vec<&'d str> {
        let op = operation.operation;
        let mut names: Vec<&'d str> = op
            .query_parameters()
            .filter_map(|p| p.schema.as_ref())
            .filter_map(|s| s.ref_name().or_else(|| s.items.as_deref().and_then(Schema::ref_name)))
            .collect();

        if let Some(RequestShape::Inline(schema)) = request_shape(op) {
            names.extend(property_refs(schema));
        }
        match response_shape(op) {
            ResponseShape::InlineItems(schema) | ResponseShape::InlineData(schema) => {
                names.extend(property_refs(schema));
            }
            _ => {}
        }
        names
    }

    /// Closure of every component schema the operations reference
    pub fn collect_closure(&self, operations: &[OperationRef<'d>]) -> IndexSet<String> {
        let mut seeds: Vec<String> = Vec::new();
        for operation in operations {
            seeds.extend(self.direct_references(operation));
            seeds.extend(
                self.inline_references(operation)
                    .into_iter()
                    .map(str::to_string),
            );
        }
        self.graph.closure(seeds.iter().map(String::as_str))
    }
}
