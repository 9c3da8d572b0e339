//! Partial configuration supplied by a config file or the command line

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

use super::{
    Config, EnvelopeConfig, FormattingConfig, HooksConfig, NamingConfig, NamingStrategy,
    OutputConfig, TemplatesConfig, TypesConfig,
};
use crate::core::error::{Error, Result};

/// Every field of [`Config`], all optional. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub open_api_file: Option<PathBuf>,
    /// An empty string clears a previously configured URL
    pub open_api_url: Option<String>,
    pub output: Option<OutputOverrides>,
    pub naming: Option<NamingOverrides>,
    pub types: Option<TypesOverrides>,
    pub formatting: Option<FormattingOverrides>,
    pub templates: Option<TemplatesOverrides>,
    pub hooks: Option<HooksOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOverrides {
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NamingOverrides {
    pub naming_strategy: Option<NamingStrategy>,
    pub path_depth: Option<usize>,
    pub tag_mapping: Option<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypesOverrides {
    pub type_mapping: Option<IndexMap<String, String>>,
    pub int64_as_union: Option<bool>,
    pub exclude_fields: Option<Vec<String>>,
    pub envelope: Option<EnvelopeOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvelopeOverrides {
    pub enabled: Option<bool>,
    pub void_name: Option<String>,
    pub wide_int_name: Option<String>,
    pub list_prefix: Option<String>,
    pub single_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormattingOverrides {
    pub run_prettier: Option<bool>,
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplatesOverrides {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HooksOverrides {
    pub before_generate: Option<String>,
    pub after_generate: Option<String>,
}

impl Config {
    /// Apply `overrides` on top of `self`.
    ///
    /// Scalars and lists replace the current value. `typeMapping` and
    /// `tagMapping` are merged key by key so a user file only has to name
    /// the entries it changes. The merged result is validated.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(file) = overrides.open_api_file {
            self.open_api_file = file;
        }
        if let Some(raw) = overrides.open_api_url {
            self.open_api_url = parse_url(&raw)?;
        }
        if let Some(output) = overrides.output {
            self.output.apply(output);
        }
        if let Some(naming) = overrides.naming {
            self.naming.apply(naming);
        }
        if let Some(types) = overrides.types {
            self.types.apply(types);
        }
        if let Some(formatting) = overrides.formatting {
            self.formatting.apply(formatting);
        }
        if let Some(templates) = overrides.templates {
            self.templates.apply(templates);
        }
        if let Some(hooks) = overrides.hooks {
            self.hooks.apply(hooks);
        }

        self.validate()?;
        Ok(self)
    }
}

fn parse_url(raw: &str) -> Result<Option<Url>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Url::parse(raw)
        .map(Some)
        .map_err(|e| Error::config(format!("Invalid openApiUrl '{raw}': {e}")))
}

impl OutputConfig {
    fn apply(&mut self, overrides: OutputOverrides) {
        if let Some(base_dir) = overrides.base_dir {
            self.base_dir = base_dir;
        }
    }
}

impl NamingConfig {
    fn apply(&mut self, overrides: NamingOverrides) {
        if let Some(strategy) = overrides.naming_strategy {
            self.naming_strategy = strategy;
        }
        if let Some(depth) = overrides.path_depth {
            self.path_depth = depth;
        }
        if let Some(mapping) = overrides.tag_mapping {
            self.tag_mapping.extend(mapping);
        }
    }
}

impl TypesConfig {
    fn apply(&mut self, overrides: TypesOverrides) {
        if let Some(mapping) = overrides.type_mapping {
            self.type_mapping.extend(mapping);
        }
        if let Some(int64_as_union) = overrides.int64_as_union {
            self.int64_as_union = int64_as_union;
        }
        if let Some(exclude) = overrides.exclude_fields {
            self.exclude_fields = exclude;
        }
        if let Some(envelope) = overrides.envelope {
            self.envelope.apply(envelope);
        }
    }
}

impl EnvelopeConfig {
    fn apply(&mut self, overrides: EnvelopeOverrides) {
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(name) = overrides.void_name {
            self.void_name = name;
        }
        if let Some(name) = overrides.wide_int_name {
            self.wide_int_name = name;
        }
        if let Some(prefix) = overrides.list_prefix {
            self.list_prefix = prefix;
        }
        if let Some(prefix) = overrides.single_prefix {
            self.single_prefix = prefix;
        }
    }
}

impl FormattingConfig {
    fn apply(&mut self, overrides: FormattingOverrides) {
        if let Some(run) = overrides.run_prettier {
            self.run_prettier = run;
        }
        if let Some(command) = overrides.command {
            self.command = command;
        }
    }
}

impl TemplatesConfig {
    fn apply(&mut self, overrides: TemplatesOverrides) {
        if let Some(dir) = overrides.dir {
            self.dir = dir;
        }
    }
}

impl HooksConfig {
    fn apply(&mut self, overrides: HooksOverrides) {
        if overrides.before_generate.is_some() {
            self.before_generate = overrides.before_generate;
        }
        if overrides.after_generate.is_some() {
            self.after_generate = overrides.after_generate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let merged = Config::default()
            .merge(ConfigOverrides::default())
            .unwrap();
        assert_eq!(merged, Config::default());
    }

    #[test]
    fn test_type_mapping_is_extended_not_replaced() {
        let overrides: ConfigOverrides = serde_json::from_str(
            r#"{ "types": { "typeMapping": { "integer": "bigint", "Date": "string" } } }"#,
        )
        .unwrap();

        let merged = Config::default().merge(overrides).unwrap();

        assert_eq!(merged.types.mapped("integer"), Some("bigint"));
        assert_eq!(merged.types.mapped("Date"), Some("string"));
        assert_eq!(merged.types.mapped("boolean"), Some("boolean"));
        assert_eq!(merged.types.mapped("Long"), Some("string | number"));
    }

    #[test]
    fn test_exclude_fields_replace() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{ "types": { "excludeFields": ["tenantId"] } }"#).unwrap();

        let merged = Config::default().merge(overrides).unwrap();
        assert_eq!(merged.types.exclude_fields, vec!["tenantId".to_string()]);
    }

    #[test]
    fn test_naming_overrides() {
        let overrides: ConfigOverrides = serde_json::from_str(
            r#"{
                "naming": {
                    "namingStrategy": "tagMapping",
                    "pathDepth": 2,
                    "tagMapping": { "Org": "hr/org", "default": "common" }
                }
            }"#,
        )
        .unwrap();

        let merged = Config::default().merge(overrides).unwrap();

        assert_eq!(merged.naming.naming_strategy, NamingStrategy::TagMapping);
        assert_eq!(merged.naming.path_depth, 2);
        assert_eq!(
            merged.naming.tag_mapping.get("default").map(String::as_str),
            Some("common")
        );
    }

    #[test]
    fn test_url_override_and_clear() {
        let set = ConfigOverrides {
            open_api_url: Some("http://localhost:4523/openapi.json".to_string()),
            ..Default::default()
        };
        let merged = Config::default().merge(set).unwrap();
        assert_eq!(
            merged.open_api_url.as_ref().map(Url::as_str),
            Some("http://localhost:4523/openapi.json")
        );

        let clear = ConfigOverrides {
            open_api_url: Some(String::new()),
            ..Default::default()
        };
        let cleared = merged.merge(clear).unwrap();
        assert!(cleared.open_api_url.is_none());
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let overrides = ConfigOverrides {
            open_api_url: Some("not a url".to_string()),
            ..Default::default()
        };

        let err = Config::default().merge(overrides).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("openApiUrl"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: std::result::Result<ConfigOverrides, _> =
            serde_json::from_str(r#"{ "naming": { "voSuffix": "VO" } }"#);
        assert!(result.is_err());

        let result: std::result::Result<ConfigOverrides, _> =
            serde_json::from_str(r#"{ "outputDir": "src" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_validates_result() {
        let overrides: ConfigOverrides =
            serde_json::from_str(r#"{ "naming": { "pathDepth": 0 } }"#).unwrap();
        assert!(Config::default().merge(overrides).is_err());
    }

    #[test]
    fn test_later_layers_win() {
        let file: ConfigOverrides = serde_json::from_str(
            r#"{ "output": { "baseDir": "src/services" }, "formatting": { "runPrettier": true } }"#,
        )
        .unwrap();
        let cli = ConfigOverrides {
            formatting: Some(FormattingOverrides {
                run_prettier: Some(false),
                command: None,
            }),
            ..Default::default()
        };

        let merged = Config::default().merge(file).unwrap().merge(cli).unwrap();

        assert_eq!(merged.output.base_dir, PathBuf::from("src/services"));
        assert!(!merged.formatting.run_prettier);
        assert_eq!(merged.formatting.command, "npx prettier --write");
    }

    #[test]
    fn test_envelope_and_hooks_overrides() {
        let overrides: ConfigOverrides = serde_json::from_str(
            r#"{
                "types": { "envelope": { "enabled": false, "singlePrefix": "Result" } },
                "hooks": { "afterGenerate": "echo done" }
            }"#,
        )
        .unwrap();

        let merged = Config::default().merge(overrides).unwrap();

        assert!(!merged.types.envelope.enabled);
        assert_eq!(merged.types.envelope.single_prefix, "Result");
        assert_eq!(merged.types.envelope.list_prefix, "RList");
        assert_eq!(merged.hooks.after_generate.as_deref(), Some("echo done"));
        assert!(merged.hooks.before_generate.is_none());
    }
}
