//! Interface declarations from object schemas

use indexmap::IndexMap;

use super::resolver::TypeResolver;
use super::sanitizers::doc_comment_lines;
use super::types::GeneratedInterface;
use super::utils::property_key;
use crate::core::TypesConfig;
use crate::infrastructure::openapi::{Parameter, Schema};

/// Renders schemas as `export interface` blocks.
///
/// Shared by named component schemas, inline request bodies, inline
/// response payloads and query parameter records; only the name differs.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceEmitter<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> InterfaceEmitter<'a> {
    pub fn new(types: &'a TypesConfig) -> Self {
        Self {
            resolver: TypeResolver::new(types),
        }
    }

    /// Interface text for `schema`, or `""` when it has no `properties`.
    ///
    /// Properties keep their declared order; excluded fields are dropped,
    /// fields not listed in `required` are optional, and a description (or
    /// title) becomes a doc comment. Property types are resolved with
    /// `name` as the current interface.
    pub fn emit(&self, schema: &Schema, name: &str) -> String {
        let Some(properties) = schema.properties.as_ref() else {
            return String::new();
        };
        let types = self.resolver.types();

        let members: Vec<String> = properties
            .iter()
            .filter(|(field, _)| !types.is_excluded(field))
            .map(|(field, property)| {
                member(
                    field,
                    property.doc_text(),
                    !schema.is_required(field),
                    &self.resolver.resolve(Some(property), Some(name)),
                )
            })
            .collect();

        declaration(name, &members)
    }

    /// Like [`emit`](Self::emit), `None` instead of empty text
    pub fn interface(&self, schema: &Schema, name: &str) -> Option<GeneratedInterface> {
        let body = self.emit(schema, name);
        (!body.is_empty()).then(|| GeneratedInterface {
            name: name.to_string(),
            body,
        })
    }

    /// Interface over a list of parameters, one optional-unless-required
    /// field each; the parameter description wins over the schema's.
    ///
    /// Parameters are typed on their own, never as the record being
    /// declared, and `excludeFields` does not apply to them.
    pub fn parameters_interface<'p>(
        &self,
        parameters: impl IntoIterator<Item = &'p Parameter>,
        name: &str,
    ) -> Option<GeneratedInterface> {
        let mut members: IndexMap<&str, String> = IndexMap::new();
        for parameter in parameters {
            let doc = parameter
                .description
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .or_else(|| parameter.schema.as_ref().and_then(Schema::doc_text));
            members.insert(
                parameter.name.as_str(),
                member(
                    &parameter.name,
                    doc,
                    !parameter.required,
                    &self.resolver.parameter_type(parameter),
                ),
            );
        }
        if members.is_empty() {
            return None;
        }
        let members: Vec<String> = members.into_values().collect();
        Some(GeneratedInterface {
            name: name.to_string(),
            body: declaration(name, &members),
        })
    }
}

fn member(field: &str, doc: Option<&str>, optional: bool, type_expression: &str) -> String {
    let mut member = String::new();
    if let Some(doc) = doc {
        member.push_str("  /**\n");
        for line in doc_comment_lines(doc) {
            member.push_str("   * ");
            member.push_str(&line);
            member.push('\n');
        }
        member.push_str("   */\n");
    }
    let optional = if optional { "?" } else { "" };
    member.push_str(&format!(
        "  {}{optional}: {type_expression};\n",
        property_key(field)
    ));
    member
}

fn declaration(name: &str, members: &[String]) -> String {
    format!("export interface {name} {{\n{}}}\n", members.join("\n"))
}
