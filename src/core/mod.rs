//! Configuration and crate-wide errors
//!
//! Everything a generation run needs to know before the OpenAPI document is
//! touched: the typed configuration, its overrides and where they come from.

pub mod config;
pub mod error;

pub use config::{
    Config, ConfigOverrides, EnvelopeConfig, FormattingConfig, FormattingOverrides, HooksConfig,
    NamingConfig, NamingStrategy, OutputConfig, OutputOverrides, TemplatesConfig, TypesConfig,
    load_config,
};
pub use error::{Error, Result};
