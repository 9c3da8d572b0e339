//! Module grouping and identifier naming
//!
//! Both are pure functions of the document and the naming configuration:
//! the same input always yields the same module keys and function names.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::utils::{camel_join, capitalize};
use crate::core::{NamingConfig, NamingStrategy};
use crate::infrastructure::openapi::{HttpMethod, OpenApiDocument, Operation, OperationRef};

/// Group of untagged operations and of URLs with no usable segment
pub const DEFAULT_GROUP: &str = "default";

pub const QUERY_SUFFIX: &str = "Query";
pub const REQUEST_SUFFIX: &str = "RequestData";
pub const RESPONSE_ITEM_SUFFIX: &str = "ResponseItem";
pub const RESPONSE_DATA_SUFFIX: &str = "ResponseData";

static PATH_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").expect("Invalid regex"));

/// Operations of one module, in document order
pub type Groups<'d> = IndexMap<String, Vec<OperationRef<'d>>>;

/// Derives module keys under the configured strategy
#[derive(Debug, Clone, Copy)]
pub struct NamingEngine<'a> {
    config: &'a NamingConfig,
}

impl<'a> NamingEngine<'a> {
    pub fn new(config: &'a NamingConfig) -> Self {
        Self { config }
    }

    /// Module key of the operation declared at `url`
    pub fn group_key(&self, url: &str, operation: &Operation) -> String {
        match self.config.naming_strategy {
            NamingStrategy::Tag => operation.first_tag().unwrap_or(DEFAULT_GROUP).to_string(),
            NamingStrategy::TagMapping => {
                let tag = operation.first_tag().unwrap_or(DEFAULT_GROUP);
                self.config
                    .tag_mapping
                    .get(tag)
                    .or_else(|| self.config.tag_mapping.get(DEFAULT_GROUP))
                    .map(String::as_str)
                    .unwrap_or(tag)
                    .to_string()
            }
            NamingStrategy::Path => {
                let key = url
                    .split('/')
                    .filter(|segment| !segment.is_empty() && !segment.contains('{'))
                    .take(self.config.path_depth)
                    .collect::<Vec<_>>()
                    .join("/");
                if key.is_empty() {
                    DEFAULT_GROUP.to_string()
                } else {
                    key
                }
            }
        }
    }

    /// Partition every operation of `document`; groups keep first-seen order
    pub fn group<'d>(&self, document: &'d OpenApiDocument) -> Groups<'d> {
        let mut groups = Groups::new();
        for operation in document.operations() {
            groups
                .entry(self.group_key(operation.url, operation.operation))
                .or_default()
                .push(operation);
        }
        groups
    }
}

/// Function name derived from the URL and method alone.
///
/// The entity is the camel-joined last two non-parameter segments; the verb
/// comes from the method, refined by markers in the URL.
pub fn function_name(url: &str, method: HttpMethod) -> String {
    let cleaned = PATH_PARAM.replace_all(url, "");
    let segments: Vec<&str> = cleaned.split('/').filter(|s| !s.is_empty()).collect();
    let tail = &segments[segments.len().saturating_sub(2)..];
    let entity = camel_join(tail.iter().copied());

    let verb = match method {
        HttpMethod::Get if url.contains("/list") => "list",
        HttpMethod::Get if url.contains("/tree") => "query",
        HttpMethod::Get if url.contains('{') => "get",
        HttpMethod::Get => "query",
        HttpMethod::Post if url.contains("/export") => "export",
        HttpMethod::Post => "add",
        HttpMethod::Put => "update",
        HttpMethod::Delete => "del",
        other => other.as_str(),
    };

    format!("{verb}{}", capitalize(&entity))
}

/// `listMedicalOrgList` + `Query` -> `ListMedicalOrgListQuery`
pub fn interface_name(function_name: &str, suffix: &str) -> String {
    format!("{}{suffix}", capitalize(function_name))
}
