//! Config file discovery and parsing

use std::path::{Path, PathBuf};
use tokio::fs;

use super::{Config, ConfigOverrides};
use crate::core::error::{Error, Result};

/// File stem searched for in the workspace, with or without a leading dot
pub const CONFIG_BASENAME: &str = "generate-front-api.config";

const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

/// Serialization format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> Result<ConfigOverrides> {
        let overrides: ConfigOverrides = match self {
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(overrides)
    }
}

/// Config file names in lookup order
pub fn candidate_paths(workspace: &Path) -> Vec<PathBuf> {
    let plain = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| workspace.join(format!("{CONFIG_BASENAME}.{ext}")));
    let hidden = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| workspace.join(format!(".{CONFIG_BASENAME}.{ext}")));
    plain.chain(hidden).collect()
}

/// First existing config file in `workspace`
pub fn discover(workspace: &Path) -> Option<PathBuf> {
    candidate_paths(workspace)
        .into_iter()
        .find(|path| path.is_file())
}

async fn read_overrides(path: &Path) -> Result<ConfigOverrides> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| {
        Error::config(format!(
            "Unsupported config file extension: {} (expected .toml, .json, .yaml or .yml)",
            path.display()
        ))
    })?;

    let content = fs::read_to_string(path).await.map_err(|e| {
        Error::config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    format
        .parse(&content)
        .map_err(|e| Error::config(format!("Invalid config file {}: {e}", path.display())))
}

/// Build the effective configuration for `workspace`.
///
/// An `explicit` path (relative paths resolve against `workspace`) must
/// exist. Without one, the workspace is searched and the defaults are used
/// when nothing is found.
pub async fn load_config(workspace: &Path, explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            let path = workspace.join(path);
            if !path.is_file() {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => discover(workspace),
    };

    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            let overrides = read_overrides(&path).await?;
            Config::default().merge(overrides)
        }
        None => {
            tracing::info!(
                workspace = %workspace.display(),
                "No config file found, using defaults"
            );
            Ok(Config::default())
        }
    }
}
