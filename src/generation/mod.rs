//! Generation domain module - turns an OpenAPI document into module files
//!
//! The engine is pure: it reads the parsed document and the configuration
//! and produces file contents. Acquiring the document and post-processing the
//! written files go through the ports in [`traits`].

pub mod dependencies;
pub mod envelope;
pub mod errors;
pub mod interface;
pub mod module_builder;
pub mod naming;
pub mod payload;
pub mod resolver;
pub mod sanitizers;
pub mod template;
pub mod traits;
pub mod types;
pub mod utils;

pub use dependencies::{DependencyCollector, SchemaGraph};
pub use envelope::Envelope;
pub use errors::*;
pub use interface::InterfaceEmitter;
pub use module_builder::{DEFAULT_FUNCTION_TEMPLATE, ModuleBuilder, ModuleTemplates};
pub use naming::{Groups, NamingEngine, function_name, interface_name};
pub use payload::PayloadTypes;
pub use resolver::TypeResolver;
pub use template::{CompiledTemplate, TemplateFields, TemplateValue, render};
pub use traits::*;
pub use types::*;
