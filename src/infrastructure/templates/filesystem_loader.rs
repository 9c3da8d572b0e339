//! Filesystem-based template loader
//!
//! Looks for user templates in the configured directory. A missing function
//! template falls back to the embedded default; a missing header template
//! means the built-in import block is used.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

use super::traits::TemplateLoader;
use crate::core::{Error, Result};
use crate::generation::{DEFAULT_FUNCTION_TEMPLATE, ModuleTemplates};

/// File name of the per-operation function template
pub const FUNCTION_TEMPLATE_FILE: &str = "api-function.template";
/// File name of the optional index header template
pub const HEADER_TEMPLATE_FILE: &str = "index-header.template";

/// Reads templates from a directory on disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemTemplateLoader;

impl FileSystemTemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TemplateLoader for FileSystemTemplateLoader {
    async fn load_templates(&self, dir: &Path) -> Result<ModuleTemplates> {
        let function = match read_optional(&dir.join(FUNCTION_TEMPLATE_FILE)).await? {
            Some(text) => {
                if text.trim().is_empty() {
                    return Err(Error::template(format!(
                        "{} is empty",
                        dir.join(FUNCTION_TEMPLATE_FILE).display()
                    )));
                }
                tracing::info!(dir = %dir.display(), "Using custom function template");
                text
            }
            None => DEFAULT_FUNCTION_TEMPLATE.to_string(),
        };

        let header = read_optional(&dir.join(HEADER_TEMPLATE_FILE)).await?;
        if header.is_some() {
            tracing::info!(dir = %dir.display(), "Using custom index header template");
        }

        Ok(ModuleTemplates { function, header })
    }
}

/// File content, `None` when the file does not exist
async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::template(format!(
            "Failed to read template {}: {e}",
            path.display()
        ))),
    }
}
