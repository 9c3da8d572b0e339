//! Typed view of the OpenAPI document
//!
//! Only the parts the generator reads are modelled. Maps keep document order
//! so groups, properties and closures come out in the order they were
//! declared.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use std::fmt;

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const ANY_MEDIA_TYPE: &str = "*/*";

/// Parsed OpenAPI document, read-only for the whole run
#[derive(Debug, Clone, Default)]
pub struct OpenApiDocument {
    pub info: ApiInfo,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

impl OpenApiDocument {
    /// Named component schema
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.components.schemas.get(name)
    }

    /// All operations in document order
    pub fn operations(&self) -> impl Iterator<Item = OperationRef<'_>> {
        self.paths.iter().flat_map(|(url, item)| {
            item.operations
                .iter()
                .map(move |(method, operation)| OperationRef {
                    url,
                    method: *method,
                    operation,
                })
        })
    }

    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// Operations declared under one URL pattern
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub operations: IndexMap<HttpMethod, Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
    }

    /// Lowercase name as it appears in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|method| method.as_str() == name)
    }

    /// Methods whose generated function takes a request body
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation together with the URL and method it is declared under
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub url: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// `summary`, falling back to `description`
    pub fn summary_text(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.description.as_deref())
            .unwrap_or_default()
    }

    pub fn path_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Path)
    }

    pub fn query_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
    }

    /// The `200` response, or the first other `2xx` one
    pub fn success_response(&self) -> Option<&Response> {
        self.responses.get("200").or_else(|| {
            self.responses
                .iter()
                .find(|(status, _)| status.len() == 3 && status.starts_with('2'))
                .map(|(_, response)| response)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl RequestBody {
    /// Schema of the `application/json` body
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content
            .get(JSON_MEDIA_TYPE)
            .and_then(|media| media.schema.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// `application/json` content, falling back to `*/*`
    pub fn json_media(&self) -> Option<&MediaType> {
        self.content
            .get(JSON_MEDIA_TYPE)
            .or_else(|| self.content.get(ANY_MEDIA_TYPE))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// A schema node: either a `$ref` or an inline shape.
///
/// Deserialization never fails: a node or field of an unexpected shape
/// (boolean schemas, tuple `items`, a non-string `type`) is read as
/// unconstrained, which resolves to `any`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub reference: Option<String>,
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub items: Option<Box<Schema>>,
    pub properties: Option<IndexMap<String, Schema>>,
    pub required: Vec<String>,
    pub description: Option<String>,
    pub title: Option<String>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Schema::from_json(&JsonValue::deserialize(deserializer)?))
    }
}

impl Schema {
    /// Lenient conversion from raw JSON
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(node) = value.as_object() else {
            return Schema::default();
        };
        let text = |key: &str| node.get(key).and_then(JsonValue::as_str).map(str::to_string);

        Schema {
            reference: text("$ref"),
            schema_type: node.get("type").and_then(schema_type),
            format: text("format"),
            // Tuple or boolean `items` still mark an array, of `any`
            items: node.get("items").map(|items| Box::new(Schema::from_json(items))),
            properties: node.get("properties").and_then(JsonValue::as_object).map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| (name.clone(), Schema::from_json(property)))
                    .collect()
            }),
            required: node
                .get("required")
                .and_then(JsonValue::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(JsonValue::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            description: text("description"),
            title: text("title"),
        }
    }

    /// Bare name of the referenced schema
    pub fn ref_name(&self) -> Option<&str> {
        self.reference.as_deref().map(ref_name)
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.schema_type.as_deref() == Some(name)
    }

    pub fn is_array(&self) -> bool {
        self.is_type("array")
    }

    pub fn is_object(&self) -> bool {
        self.is_type("object")
    }

    /// `type: object` with a `properties` map (possibly empty)
    pub fn is_inline_object(&self) -> bool {
        self.is_object() && self.properties.is_some()
    }

    pub fn is_int64(&self) -> bool {
        self.is_type("integer") && self.format.as_deref() == Some("int64")
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }

    /// `description`, falling back to `title`; blank text counts as absent
    pub fn doc_text(&self) -> Option<&str> {
        [self.description.as_deref(), self.title.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

/// Last segment of a schema pointer (`#/components/schemas/Foo` -> `Foo`)
pub fn ref_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// `"string"`, or the first non-null entry of `["string", "null"]`
fn schema_type(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(name) => Some(name.clone()),
        JsonValue::Array(names) => names
            .iter()
            .filter_map(JsonValue::as_str)
            .find(|name| *name != "null")
            .map(str::to_string),
        _ => None,
    }
}
