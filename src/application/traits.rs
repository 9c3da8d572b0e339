//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::application::{ApplicationError, GenerationSummary};
use crate::generation::Artifact;
use crate::infrastructure::openapi::OpenApiDocument;

/// Service for writing generated artifacts to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts, creating parent directories as needed
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), ApplicationError>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), ApplicationError>;
}

/// Extension points invoked once around a whole run.
///
/// Hooks are observational: they cannot fail the run.
#[async_trait]
pub trait GenerateHooks: Send + Sync {
    async fn before_generate(&self, document: &OpenApiDocument);

    async fn after_generate(&self, summary: &GenerationSummary);
}
