//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::generation::GenerationError;
use crate::infrastructure::openapi::OpenApiDocument;

/// Loads OpenAPI documents
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load a document from a URL or file path
    async fn load(&self, source: &str) -> Result<OpenApiDocument, GenerationError>;
}

/// Post-processes files once they are on disk
#[async_trait]
pub trait PostProcessor: Send + Sync {
    /// Process the written files, running commands from `working_dir`
    async fn process(&self, files: &[PathBuf], working_dir: &Path)
    -> Result<(), GenerationError>;
}
