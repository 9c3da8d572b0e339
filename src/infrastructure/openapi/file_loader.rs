//! File-based OpenAPI document loader
//!
//! This loader handles only file I/O. The actual parsing is done by the OpenApiParser.

use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::fs;

use super::parser::OpenApiParser;
use super::types::OpenApiDocument;
use crate::generation::{GenerationError, OpenApiLoader};

/// Loads OpenAPI documents from local JSON files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<OpenApiDocument, GenerationError> {
        let content = fs::read_to_string(source).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                GenerationError::LoadError(format!("OpenAPI file not found: {source}"))
            }
            _ => GenerationError::LoadError(format!("Failed to read {source}: {e}")),
        })?;

        OpenApiParser::from_json_str(&content)?.parse()
    }
}
