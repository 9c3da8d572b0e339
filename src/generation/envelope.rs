//! Result-envelope unwrapping for response `$ref`s
//!
//! Some backends wrap every payload in a generic result type and the
//! OpenAPI exporter names the instantiations `RVoid`, `RLong`,
//! `RListFoo`, `RFoo`. The convention is configurable since other
//! backends name their envelopes differently.

use super::resolver::{VOID_TYPE, array_of};
use crate::core::TypesConfig;
use crate::core::config::WIDE_INT_TYPE;

/// Applies the configured envelope naming convention to a schema name
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    types: &'a TypesConfig,
}

impl<'a> Envelope<'a> {
    pub fn new(types: &'a TypesConfig) -> Self {
        Self { types }
    }

    /// Payload type of the envelope named `name`. Names that do not follow
    /// the convention come back unchanged.
    pub fn unwrap(&self, name: &str) -> String {
        let convention = &self.types.envelope;
        if !convention.enabled {
            return name.to_string();
        }

        if name == convention.void_name {
            return VOID_TYPE.to_string();
        }
        if name == convention.wide_int_name {
            return WIDE_INT_TYPE.to_string();
        }
        if let Some(inner) = payload_name(name, &convention.list_prefix) {
            return array_of(&self.map(inner));
        }
        if let Some(inner) = payload_name(name, &convention.single_prefix) {
            return self.map(inner);
        }
        name.to_string()
    }

    /// Payload names may be base type names (`RListLong`, `RString`)
    fn map(&self, inner: &str) -> String {
        self.types.mapped(inner).unwrap_or(inner).to_string()
    }
}

/// Remainder after `prefix`, when it starts a new capitalized word
fn payload_name<'n>(name: &'n str, prefix: &str) -> Option<&'n str> {
    if prefix.is_empty() {
        return None;
    }
    name.strip_prefix(prefix)
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
}
