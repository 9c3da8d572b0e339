//! Formatter pass over the written files

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::command_executor::CommandExecutor;
use crate::generation::{GenerationError, PostProcessor};

/// Runs a formatter command (`npx prettier --write` by default) with the
/// written files appended as quoted arguments
pub struct FormatterPostProcessor {
    command: String,
    executor: Arc<dyn CommandExecutor>,
}

impl FormatterPostProcessor {
    pub fn new(command: impl Into<String>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            command: command.into(),
            executor,
        }
    }

    /// Full command line for `files`
    pub fn command_line(&self, files: &[PathBuf]) -> String {
        let quoted: Vec<String> = files
            .iter()
            .map(|file| format!("\"{}\"", file.display()))
            .collect();
        format!("{} {}", self.command.trim(), quoted.join(" "))
    }
}

#[async_trait]
impl PostProcessor for FormatterPostProcessor {
    async fn process(&self, files: &[PathBuf], working_dir: &Path) -> Result<(), GenerationError> {
        if files.is_empty() {
            return Ok(());
        }

        let command = self.command_line(files);
        tracing::info!(
            formatter = %self.command,
            files = files.len(),
            "Formatting generated files"
        );

        let result = self.executor.execute(&command, working_dir).await?;
        if !result.is_success() {
            return Err(GenerationError::PostProcessingError(format!(
                "Formatter exited with code {}: {}",
                result.exit_code,
                result.diagnostics()
            )));
        }

        if !result.stdout.trim().is_empty() {
            tracing::debug!(output = %result.stdout.trim(), "Formatter output");
        }
        Ok(())
    }
}
