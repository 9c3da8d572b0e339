//! Request and response payload extraction
//!
//! Reduces an operation's request body and success response to a type
//! expression, and records when an inline shape needs a synthesized
//! interface.

use super::envelope::Envelope;
use super::naming::{
    REQUEST_SUFFIX, RESPONSE_DATA_SUFFIX, RESPONSE_ITEM_SUFFIX, interface_name,
};
use super::resolver::{ANY_TYPE, BINARY_TYPE, STRING_TYPE, TypeResolver, VOID_TYPE, array_of};
use crate::core::TypesConfig;
use crate::infrastructure::openapi::{Operation, Schema};

/// Property holding the payload of an inline response envelope
pub const DATA_PROPERTY: &str = "data";

/// Shape of the success response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'d> {
    /// No success response, no JSON content, or an empty object
    Void,
    /// Content declared without a schema
    Binary,
    /// A bare string
    Text,
    /// A named schema, subject to envelope unwrapping
    Named(&'d str),
    /// `data` is an array of inline objects
    InlineItems(&'d Schema),
    /// `data` is an inline object
    InlineData(&'d Schema),
    /// Anything resolved structurally
    Resolved(&'d Schema),
    /// An inline object without a usable `data` property
    Loose,
}

/// Shape of the JSON request body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestShape<'d> {
    Named(&'d str),
    /// Inline object, gets a synthesized interface
    Inline(&'d Schema),
    Resolved(&'d Schema),
}

pub fn response_shape(operation: &Operation) -> ResponseShape<'_> {
    let Some(media) = operation
        .success_response()
        .and_then(|response| response.json_media())
    else {
        return ResponseShape::Void;
    };
    let Some(schema) = media.schema.as_ref() else {
        return ResponseShape::Binary;
    };

    if let Some(name) = schema.ref_name() {
        return ResponseShape::Named(name);
    }
    if schema.is_object() {
        let Some(properties) = schema.properties.as_ref() else {
            return ResponseShape::Void;
        };
        return match properties.get(DATA_PROPERTY) {
            Some(data) if data.is_array() && data.items.is_some() => {
                match data.items.as_deref() {
                    Some(items) if items.is_inline_object() => ResponseShape::InlineItems(items),
                    _ => ResponseShape::Resolved(data),
                }
            }
            Some(data) if data.reference.is_some() => ResponseShape::Resolved(data),
            Some(data) if data.is_inline_object() => ResponseShape::InlineData(data),
            _ => ResponseShape::Loose,
        };
    }
    if schema.is_type("string") {
        return ResponseShape::Text;
    }
    ResponseShape::Resolved(schema)
}

pub fn request_shape(operation: &Operation) -> Option<RequestShape<'_>> {
    let schema = operation.request_body.as_ref()?.json_schema()?;
    Some(if let Some(name) = schema.ref_name() {
        RequestShape::Named(name)
    } else if schema.is_inline_object() {
        RequestShape::Inline(schema)
    } else {
        RequestShape::Resolved(schema)
    })
}

/// Turns payload shapes into type expressions
#[derive(Debug, Clone, Copy)]
pub struct PayloadTypes<'a> {
    resolver: TypeResolver<'a>,
    envelope: Envelope<'a>,
}

impl<'a> PayloadTypes<'a> {
    pub fn new(types: &'a TypesConfig) -> Self {
        Self {
            resolver: TypeResolver::new(types),
            envelope: Envelope::new(types),
        }
    }

    /// Return type of the function generated for `operation`
    pub fn response_type(&self, operation: &Operation, function_name: &str) -> String {
        match response_shape(operation) {
            ResponseShape::Void => VOID_TYPE.to_string(),
            ResponseShape::Binary => BINARY_TYPE.to_string(),
            ResponseShape::Text => STRING_TYPE.to_string(),
            ResponseShape::Loose => ANY_TYPE.to_string(),
            ResponseShape::Named(name) => self.envelope.unwrap(name),
            ResponseShape::InlineItems(_) => {
                array_of(&interface_name(function_name, RESPONSE_ITEM_SUFFIX))
            }
            ResponseShape::InlineData(_) => interface_name(function_name, RESPONSE_DATA_SUFFIX),
            ResponseShape::Resolved(schema) => self.resolver.resolve(Some(schema), None),
        }
    }

    /// Type of the `data` argument, `None` without a JSON body
    pub fn request_type(&self, operation: &Operation, function_name: &str) -> Option<String> {
        Some(match request_shape(operation)? {
            RequestShape::Named(name) => name.to_string(),
            RequestShape::Inline(_) => interface_name(function_name, REQUEST_SUFFIX),
            RequestShape::Resolved(schema) => self.resolver.resolve(Some(schema), None),
        })
    }
}
