//! Data transfer objects for the generate use case

use std::path::PathBuf;

use crate::core::Config;

/// Input of one generation run
#[derive(Debug, Clone)]
pub struct GenerateApiRequest {
    /// Directory that relative paths in the configuration resolve against
    pub workspace: PathBuf,
    pub config: Config,
}

impl GenerateApiRequest {
    pub fn new(workspace: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            workspace: workspace.into(),
            config,
        }
    }
}

/// Outcome of a run, also handed to the after-generate hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub module_count: usize,
    pub generated_files: Vec<PathBuf>,
}
