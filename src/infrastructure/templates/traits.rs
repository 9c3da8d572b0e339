//! Template loading port

use async_trait::async_trait;
use std::path::Path;

use crate::core::Result;
use crate::generation::ModuleTemplates;

/// Supplies the template texts for the index files
#[async_trait]
pub trait TemplateLoader: Send + Sync {
    /// Load templates from `dir`, falling back to the built-in ones
    async fn load_templates(&self, dir: &Path) -> Result<ModuleTemplates>;
}
