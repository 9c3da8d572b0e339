//! Schema node to TypeScript type expression
//!
//! Resolution is nominal: a `$ref` becomes the referenced name and nothing
//! more. Making sure that name is declared somewhere is the job of the
//! dependency closure.

use crate::core::TypesConfig;
use crate::core::config::WIDE_INT_TYPE;
use crate::infrastructure::openapi::{Parameter, ParameterLocation, Schema};

pub const ANY_TYPE: &str = "any";
pub const VOID_TYPE: &str = "void";
pub const BINARY_TYPE: &str = "Blob";
pub const STRING_TYPE: &str = "string";

/// Maps schema nodes to type expressions under the configured type table
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    types: &'a TypesConfig,
}

impl<'a> TypeResolver<'a> {
    pub fn new(types: &'a TypesConfig) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &'a TypesConfig {
        self.types
    }

    /// Resolve `schema`, first matching rule wins:
    ///
    /// 1. absent -> `any`
    /// 2. `$ref` -> referenced name
    /// 3. array with items -> element type plus `[]`
    /// 4. `integer`/`int64` with `int64AsUnion` -> `string | number`
    /// 5. type table lookup, `any` when unmapped
    ///
    /// Self-reference policy: when `current_interface` is given and the array
    /// items are an inline object with properties, the items are taken to be
    /// the interface being declared and `Current[]` is emitted instead of
    /// expanding the shape. Two unrelated inline shapes in the same interface
    /// are therefore indistinguishable from recursion.
    pub fn resolve(&self, schema: Option<&Schema>, current_interface: Option<&str>) -> String {
        let Some(schema) = schema else {
            return ANY_TYPE.to_string();
        };

        if let Some(name) = schema.ref_name() {
            return name.to_string();
        }

        if schema.is_array() {
            if let Some(items) = schema.items.as_deref() {
                if let Some(current) = current_interface {
                    if items.is_inline_object() {
                        return array_of(current);
                    }
                }
                return array_of(&self.resolve(Some(items), current_interface));
            }
        }

        if self.types.int64_as_union && schema.is_int64() {
            return WIDE_INT_TYPE.to_string();
        }

        schema
            .schema_type
            .as_deref()
            .and_then(|name| self.types.mapped(name))
            .unwrap_or(ANY_TYPE)
            .to_string()
    }

    /// Type of a function argument. Array-typed path parameters become
    /// `string | number` since they are interpolated into the URL.
    pub fn parameter_type(&self, parameter: &Parameter) -> String {
        let schema = parameter.schema.as_ref();
        if parameter.location == ParameterLocation::Path
            && schema.is_some_and(|s| s.is_array())
        {
            return WIDE_INT_TYPE.to_string();
        }
        self.resolve(schema, None)
    }

    /// Name of a component schema directly used by `expression`, if any.
    ///
    /// Array suffixes and grouping parentheses are stripped; entries of the
    /// type table and non-identifiers (unions, literals) yield `None`.
    pub fn referenced_name<'e>(&self, expression: &'e str) -> Option<&'e str> {
        let bare = element_type(expression);
        if bare.is_empty()
            || self.types.type_mapping.contains_key(bare)
            || !crate::generation::utils::is_identifier(bare)
        {
            return None;
        }
        match bare {
            ANY_TYPE | VOID_TYPE | BINARY_TYPE | STRING_TYPE => None,
            name => Some(name),
        }
    }
}

/// `T[]`, parenthesizing unions
pub fn array_of(element: &str) -> String {
    if element.contains('|') {
        format!("({element})[]")
    } else {
        format!("{element}[]")
    }
}

/// Strip every trailing `[]` and grouping parentheses
fn element_type(expression: &str) -> &str {
    let mut bare = expression.trim();
    loop {
        if let Some(inner) = bare.strip_suffix("[]") {
            bare = inner.trim_end();
        } else if let Some(inner) = bare.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            bare = inner.trim();
        } else {
            return bare;
        }
    }
}
