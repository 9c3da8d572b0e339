//! Builds the typed [`OpenApiDocument`] from raw JSON
//!
//! Component `$ref`s on parameters, request bodies and responses are inlined
//! here. Schema `$ref`s are left alone: the generator resolves them by name.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::types::{
    ApiInfo, Components, HttpMethod, OpenApiDocument, Operation, PathItem,
};
use crate::generation::GenerationError;

/// OpenAPI document parser
pub struct OpenApiParser {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl OpenApiParser {
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Parse JSON text
    pub fn from_json_str(content: &str) -> Result<Self, GenerationError> {
        let json = serde_json::from_str(content).map_err(GenerationError::SerializationError)?;
        Ok(Self::new(json))
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Parse the complete document
    pub fn parse(&self) -> Result<OpenApiDocument, GenerationError> {
        let info = match self.json.get("info") {
            Some(info) => serde_json::from_value::<ApiInfo>(info.clone()).map_err(|e| {
                GenerationError::InvalidDocument(format!("Invalid 'info' object: {e}"))
            })?,
            None => ApiInfo::default(),
        };

        let paths: IndexMap<String, PathItem> = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| {
                GenerationError::InvalidDocument("Missing 'paths' object".to_string())
            })?
            .iter()
            .map(|(url, item)| Ok((url.clone(), self.parse_path_item(url, item)?)))
            .collect::<Result<_, GenerationError>>()?;

        let components = match self.json.get("components") {
            Some(components) => serde_json::from_value::<Components>(components.clone())
                .map_err(|e| {
                    GenerationError::InvalidDocument(format!("Invalid 'components' object: {e}"))
                })?,
            None => Components::default(),
        };

        let document = OpenApiDocument {
            info,
            paths,
            components,
        };
        tracing::debug!(
            operations = document.operation_count(),
            schemas = document.components.schemas.len(),
            "Parsed OpenAPI document"
        );
        Ok(document)
    }

    fn parse_path_item(&self, url: &str, item: &JsonValue) -> Result<PathItem, GenerationError> {
        let Some(item) = item.as_object() else {
            return Err(GenerationError::InvalidDocument(format!(
                "Path item '{url}' is not an object"
            )));
        };

        let shared = item
            .get("parameters")
            .and_then(JsonValue::as_array)
            .map(|params| self.resolve_all(params))
            .unwrap_or_default();

        let mut path_item = PathItem::default();
        for (key, value) in item {
            let Some(method) = HttpMethod::parse(key) else {
                continue;
            };
            let operation = self.parse_operation(url, method, value, &shared)?;
            path_item.operations.insert(method, operation);
        }
        Ok(path_item)
    }

    fn parse_operation(
        &self,
        url: &str,
        method: HttpMethod,
        value: &JsonValue,
        shared: &[JsonValue],
    ) -> Result<Operation, GenerationError> {
        let mut value = value.clone();

        if let Some(object) = value.as_object_mut() {
            let mut parameters = object
                .get("parameters")
                .and_then(JsonValue::as_array)
                .map(|params| self.resolve_all(params))
                .unwrap_or_default();
            let inherited: Vec<JsonValue> = shared
                .iter()
                .filter(|param| !parameters.iter().any(|own| same_parameter(own, param)))
                .cloned()
                .collect();
            if !inherited.is_empty() {
                let mut merged = inherited;
                merged.append(&mut parameters);
                parameters = merged;
            }
            if !parameters.is_empty() {
                object.insert("parameters".to_string(), JsonValue::Array(parameters));
            }

            if let Some(body) = object.get("requestBody").map(|body| self.resolve(body)) {
                object.insert("requestBody".to_string(), body);
            }

            if let Some(responses) = object.get_mut("responses").and_then(JsonValue::as_object_mut)
            {
                for response in responses.values_mut() {
                    *response = self.resolve(response);
                }
            }
        }

        let operation: Operation = serde_json::from_value(value).map_err(|e| {
            GenerationError::InvalidDocument(format!("Invalid operation {method} {url}: {e}"))
        })?;

        if let Some(undeclared) = operation
            .path_parameters()
            .find(|p| !url.contains(&format!("{{{}}}", p.name)))
        {
            tracing::warn!(
                url = %url,
                method = %method,
                parameter = %undeclared.name,
                "Path parameter does not appear in the URL template"
            );
        }

        Ok(operation)
    }

    /// Inline every resolvable `$ref` entry, dropping the ones that are not
    fn resolve_all(&self, values: &[JsonValue]) -> Vec<JsonValue> {
        values
            .iter()
            .filter_map(|value| match value.get("$ref").and_then(JsonValue::as_str) {
                Some(reference) => {
                    let resolved = self.lookup(reference);
                    if resolved.is_none() {
                        tracing::warn!(reference = %reference, "Unresolvable parameter reference dropped");
                    }
                    resolved
                }
                None => Some(value.clone()),
            })
            .collect()
    }

    /// Inline a component `$ref`, leaving the value as-is when it cannot be resolved
    fn resolve(&self, value: &JsonValue) -> JsonValue {
        value
            .get("$ref")
            .and_then(JsonValue::as_str)
            .and_then(|reference| self.lookup(reference))
            .unwrap_or_else(|| value.clone())
    }

    fn lookup(&self, reference: &str) -> Option<JsonValue> {
        let pointer = reference.strip_prefix('#')?;
        self.json.pointer(pointer).cloned()
    }
}

fn same_parameter(a: &JsonValue, b: &JsonValue) -> bool {
    a.get("name") == b.get("name") && a.get("in") == b.get("in")
}
