//! Hooks that log run progress and run the configured shell commands

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use super::command_executor::CommandExecutor;
use crate::application::{GenerateHooks, GenerationSummary};
use crate::core::HooksConfig;
use crate::infrastructure::openapi::OpenApiDocument;

/// [`GenerateHooks`] backed by `hooks.beforeGenerate` / `hooks.afterGenerate`
pub struct CommandHooks {
    config: HooksConfig,
    working_dir: PathBuf,
    executor: Arc<dyn CommandExecutor>,
}

impl CommandHooks {
    pub fn new(
        config: HooksConfig,
        working_dir: impl Into<PathBuf>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            config,
            working_dir: working_dir.into(),
            executor,
        }
    }

    /// Failures are reported and otherwise ignored
    async fn run(&self, hook: &str, command: Option<&str>, env: Vec<(String, String)>) {
        let Some(command) = command.map(str::trim).filter(|c| !c.is_empty()) else {
            return;
        };

        tracing::info!(hook = %hook, command = %command, "Running hook");
        match self
            .executor
            .execute_with_env(command, &self.working_dir, &env)
            .await
        {
            Ok(result) if result.is_success() => {
                if !result.stdout.trim().is_empty() {
                    tracing::info!(hook = %hook, output = %result.stdout.trim(), "Hook output");
                }
            }
            Ok(result) => tracing::warn!(
                hook = %hook,
                exit_code = result.exit_code,
                stderr = %result.diagnostics(),
                "Hook command failed"
            ),
            Err(e) => tracing::warn!(hook = %hook, error = %e, "Hook command could not be run"),
        }
    }
}

/// `GENERATE_FRONT_API_<name>` pair handed to hook commands
fn env_var(name: &str, value: impl ToString) -> (String, String) {
    (format!("GENERATE_FRONT_API_{name}"), value.to_string())
}

#[async_trait]
impl GenerateHooks for CommandHooks {
    async fn before_generate(&self, document: &OpenApiDocument) {
        tracing::info!(
            title = %document.info.title.as_deref().unwrap_or("unknown"),
            version = %document.info.version.as_deref().unwrap_or("unknown"),
            operations = document.operation_count(),
            "Loaded OpenAPI document"
        );
        let env = vec![
            env_var("TITLE", document.info.title.as_deref().unwrap_or_default()),
            env_var("VERSION", document.info.version.as_deref().unwrap_or_default()),
            env_var("OPERATIONS", document.operation_count()),
        ];
        self.run("beforeGenerate", self.config.before_generate.as_deref(), env)
            .await;
    }

    async fn after_generate(&self, summary: &GenerationSummary) {
        tracing::info!(
            modules = summary.module_count,
            files = summary.generated_files.len(),
            "Generation complete"
        );
        let files: Vec<String> = summary
            .generated_files
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        let env = vec![
            env_var("MODULE_COUNT", summary.module_count),
            env_var("FILE_COUNT", files.len()),
            env_var("FILES", files.join("\n")),
        ];
        self.run("afterGenerate", self.config.after_generate.as_deref(), env)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::openapi::ApiInfo;
    use crate::infrastructure::shell::MockCommandExecutor;
    use tracing_test::traced_test;

    fn document() -> OpenApiDocument {
        OpenApiDocument {
            info: ApiInfo {
                title: Some("HR API".to_string()),
                version: Some("3.0".to_string()),
                description: None,
            },
            ..Default::default()
        }
    }

    fn hooks(executor: Arc<MockCommandExecutor>) -> CommandHooks {
        CommandHooks::new(
            HooksConfig {
                before_generate: Some("echo before".to_string()),
                after_generate: Some("  ".to_string()),
            },
            ".",
            executor,
        )
    }

    #[tokio::test]
    #[traced_test]
    async fn test_before_generate_logs_and_runs_command() {
        let executor = Arc::new(MockCommandExecutor::new().with_result("echo before", 0, "before\n", ""));

        hooks(executor.clone()).before_generate(&document()).await;

        assert_eq!(executor.executed(), vec!["echo before"]);
        assert!(logs_contain("Loaded OpenAPI document"));
        assert!(logs_contain("HR API"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_blank_after_command_is_skipped() {
        let executor = Arc::new(MockCommandExecutor::new());
        let summary = GenerationSummary {
            module_count: 2,
            generated_files: vec![PathBuf::from("a/index.ts")],
        };

        hooks(executor.clone()).after_generate(&summary).await;

        assert!(executor.executed().is_empty());
        assert!(logs_contain("Generation complete"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failing_hook_is_swallowed() {
        let executor =
            Arc::new(MockCommandExecutor::new().with_result("echo before", 2, "", "boom"));

        hooks(executor.clone()).before_generate(&document()).await;

        assert!(logs_contain("Hook command failed"));
        assert!(logs_contain("boom"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unrunnable_hook_is_swallowed() {
        // No canned result: the mock reports an execution error
        let executor = Arc::new(MockCommandExecutor::new());

        hooks(executor).before_generate(&document()).await;

        assert!(logs_contain("Hook command could not be run"));
    }

    #[tokio::test]
    async fn test_hook_commands_receive_run_context() {
        let executor = Arc::new(
            MockCommandExecutor::new()
                .with_result("echo before", 0, "", "")
                .with_result("echo after", 0, "", ""),
        );
        let hooks = CommandHooks::new(
            HooksConfig {
                before_generate: Some("echo before".to_string()),
                after_generate: Some("echo after".to_string()),
            },
            ".",
            executor.clone(),
        );
        let summary = GenerationSummary {
            module_count: 1,
            generated_files: vec![
                PathBuf::from("src/api/org/types.ts"),
                PathBuf::from("src/api/org/index.ts"),
            ],
        };

        hooks.before_generate(&document()).await;
        hooks.after_generate(&summary).await;

        fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }
        assert_eq!(
            executor.environments(),
            vec![
                pairs(&[
                    ("GENERATE_FRONT_API_TITLE", "HR API"),
                    ("GENERATE_FRONT_API_VERSION", "3.0"),
                    ("GENERATE_FRONT_API_OPERATIONS", "0"),
                ]),
                pairs(&[
                    ("GENERATE_FRONT_API_MODULE_COUNT", "1"),
                    ("GENERATE_FRONT_API_FILE_COUNT", "2"),
                    (
                        "GENERATE_FRONT_API_FILES",
                        "src/api/org/types.ts\nsrc/api/org/index.ts",
                    ),
                ]),
            ]
        );
    }
}
