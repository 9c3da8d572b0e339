//! Typed generator configuration
//!
//! [`Config`] holds every option a generation run reads, with documented
//! defaults. User files and command-line flags never touch it directly; they
//! are parsed into [`ConfigOverrides`] and merged field by field.

mod loader;
mod overrides;

pub use loader::{CONFIG_BASENAME, ConfigFormat, candidate_paths, discover, load_config};
pub use overrides::{
    ConfigOverrides, EnvelopeOverrides, FormattingOverrides, HooksOverrides, NamingOverrides,
    OutputOverrides, TemplatesOverrides, TypesOverrides,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::core::error::{Error, Result};

/// Default local OpenAPI document, relative to the workspace
pub const DEFAULT_OPENAPI_FILE: &str = "openApi.json";
/// Default root of the generated modules, relative to the workspace
pub const DEFAULT_BASE_DIR: &str = "src/api";
/// Number of URL segments kept by the `path` naming strategy
pub const DEFAULT_PATH_DEPTH: usize = 3;
/// Formatter invoked on the generated files; file paths are appended
pub const DEFAULT_FORMAT_COMMAND: &str = "npx prettier --write";
/// Directory searched for user templates, relative to the workspace
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Type expression used for 64-bit integers when `int64AsUnion` is on
pub const WIDE_INT_TYPE: &str = "string | number";

/// Complete configuration of a generation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Local OpenAPI document, used unless `open_api_url` is set
    pub open_api_file: PathBuf,
    /// Remote OpenAPI document
    pub open_api_url: Option<Url>,
    pub output: OutputConfig,
    pub naming: NamingConfig,
    pub types: TypesConfig,
    pub formatting: FormattingConfig,
    pub templates: TemplatesConfig,
    pub hooks: HooksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_api_file: PathBuf::from(DEFAULT_OPENAPI_FILE),
            open_api_url: None,
            output: OutputConfig::default(),
            naming: NamingConfig::default(),
            types: TypesConfig::default(),
            formatting: FormattingConfig::default(),
            templates: TemplatesConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl Config {
    /// Check invariants the merge cannot express in types
    pub fn validate(&self) -> Result<()> {
        if self.naming.path_depth == 0 {
            return Err(Error::config("naming.pathDepth must be at least 1"));
        }
        if self.formatting.run_prettier && self.formatting.command.trim().is_empty() {
            return Err(Error::config(
                "formatting.command cannot be empty while runPrettier is enabled",
            ));
        }
        Ok(())
    }

    /// Where the OpenAPI document is read from: the URL when configured,
    /// otherwise the local file resolved against `workspace`
    pub fn document_source(&self, workspace: &Path) -> String {
        match &self.open_api_url {
            Some(url) => url.to_string(),
            None => workspace.join(&self.open_api_file).display().to_string(),
        }
    }

    pub fn output_dir(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.output.base_dir)
    }

    pub fn templates_dir(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.templates.dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub base_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
        }
    }
}

/// How operations are partitioned into modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingStrategy {
    /// First declared tag
    Tag,
    /// First declared tag looked up in `tagMapping`
    TagMapping,
    /// Leading URL segments
    #[default]
    Path,
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStrategy::Tag => write!(f, "tag"),
            NamingStrategy::TagMapping => write!(f, "tagMapping"),
            NamingStrategy::Path => write!(f, "path"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingConfig {
    pub naming_strategy: NamingStrategy,
    pub path_depth: usize,
    /// Tag to module path; a `default` entry catches unmapped tags
    pub tag_mapping: IndexMap<String, String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            naming_strategy: NamingStrategy::default(),
            path_depth: DEFAULT_PATH_DEPTH,
            tag_mapping: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesConfig {
    /// Schema type name to type expression
    pub type_mapping: IndexMap<String, String>,
    /// Emit `string | number` for `integer`/`int64`
    pub int64_as_union: bool,
    /// Property names dropped from every emitted interface
    pub exclude_fields: Vec<String>,
    pub envelope: EnvelopeConfig,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            type_mapping: default_type_mapping(),
            int64_as_union: true,
            exclude_fields: Vec::new(),
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl TypesConfig {
    /// Look up the expression configured for a schema type name
    pub fn mapped(&self, type_name: &str) -> Option<&str> {
        self.type_mapping.get(type_name).map(String::as_str)
    }

    pub fn is_excluded(&self, field: &str) -> bool {
        self.exclude_fields.iter().any(|f| f == field)
    }
}

fn default_type_mapping() -> IndexMap<String, String> {
    [
        ("integer", "number"),
        ("string", "string"),
        ("boolean", "boolean"),
        ("array", "any[]"),
        ("object", "any"),
        ("Long", WIDE_INT_TYPE),
        ("long", WIDE_INT_TYPE),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Naming convention of a backend that wraps every payload in a generic
/// result type (`R<T>`, `RList<T>`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeConfig {
    pub enabled: bool,
    /// Envelope carrying no payload
    pub void_name: String,
    /// Envelope carrying a 64-bit integer
    pub wide_int_name: String,
    /// Prefix of list envelopes
    pub list_prefix: String,
    /// Prefix of single-value envelopes
    pub single_prefix: String,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            void_name: "RVoid".to_string(),
            wide_int_name: "RLong".to_string(),
            list_prefix: "RList".to_string(),
            single_prefix: "R".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingConfig {
    pub run_prettier: bool,
    pub command: String,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            run_prettier: true,
            command: DEFAULT_FORMAT_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesConfig {
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
        }
    }
}

/// Shell commands run around the whole generation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HooksConfig {
    pub before_generate: Option<String>,
    pub after_generate: Option<String>,
}
