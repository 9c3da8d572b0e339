//! Picks the HTTP or file loader from the shape of the source

use async_trait::async_trait;

use super::types::OpenApiDocument;
use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::generation::{GenerationError, OpenApiLoader};

/// Dispatches URLs to the HTTP loader and everything else to the file loader
pub struct CompositeOpenApiLoader {
    http: Box<dyn OpenApiLoader>,
    file: Box<dyn OpenApiLoader>,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Self {
        Self {
            http: Box::new(HttpOpenApiLoader::new()),
            file: Box::new(FileOpenApiLoader::new()),
        }
    }
}

impl Default for CompositeOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<OpenApiDocument, GenerationError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!(source = %source, "Fetching OpenAPI document over HTTP");
            self.http.load(source).await
        } else {
            tracing::debug!(source = %source, "Reading OpenAPI document from file");
            self.file.load(source).await
        }
    }
}
