//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur while acquiring the document or finishing a run
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("OpenAPI loading error: {0}")]
    LoadError(String),

    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    #[error("Post-processing error: {0}")]
    PostProcessingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
