//! Shell command execution for the formatter pass and the hooks

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::generation::GenerationError;

/// Runs a command line through the platform shell
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<CommandResult, GenerationError> {
        self.execute_with_env(command, working_dir, &[]).await
    }

    /// Runs `command` with `env` added to the inherited environment
    async fn execute_with_env(
        &self,
        command: &str,
        working_dir: &Path,
        env: &[(String, String)],
    ) -> Result<CommandResult, GenerationError>;
}

/// Captured outcome of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Trimmed stderr, or stdout when stderr is empty
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Executes commands with `sh -c` (`cmd /C` on Windows)
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellCommandExecutor;

impl ShellCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ShellCommandExecutor {
    async fn execute_with_env(
        &self,
        command: &str,
        working_dir: &Path,
        env: &[(String, String)],
    ) -> Result<CommandResult, GenerationError> {
        let (shell, shell_arg) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        tracing::debug!(command = %command, dir = %working_dir.display(), "Running command");

        let output = Command::new(shell)
            .arg(shell_arg)
            .arg(command)
            .current_dir(working_dir)
            .envs(env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                GenerationError::PostProcessingError(format!(
                    "Failed to execute command '{command}': {e}"
                ))
            })?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Records every command and answers with canned results
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockCommandExecutor {
    pub results: std::collections::HashMap<String, CommandResult>,
    pub executed: std::sync::Mutex<Vec<String>>,
    pub environments: std::sync::Mutex<Vec<Vec<(String, String)>>>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, command: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.results.insert(
            command.to_string(),
            CommandResult {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Environment passed with each executed command, in order
    pub fn environments(&self) -> Vec<Vec<(String, String)>> {
        self.environments.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for MockCommandExecutor {
    async fn execute_with_env(
        &self,
        command: &str,
        _working_dir: &Path,
        env: &[(String, String)],
    ) -> Result<CommandResult, GenerationError> {
        self.executed.lock().unwrap().push(command.to_string());
        self.environments.lock().unwrap().push(env.to_vec());
        self.results.get(command).cloned().ok_or_else(|| {
            GenerationError::PostProcessingError(format!(
                "Mock executor has no result for command: {command}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_shell_command_executor_success() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor.execute("echo hello", dir.path()).await.unwrap();

        assert!(result.is_success());
        assert!(result.stdout.contains("hello"));
        assert_eq!(result.diagnostics(), "hello");
    }

    #[tokio::test]
    async fn test_shell_command_executor_runs_in_working_dir() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();

        let result = executor.execute("cat marker.txt", dir.path()).await.unwrap();

        assert_eq!(result.stdout, "here");
    }

    #[tokio::test]
    async fn test_shell_command_executor_passes_env() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();
        let env = vec![("GENERATE_FRONT_API_TITLE".to_string(), "HR API".to_string())];

        let result = executor
            .execute_with_env("echo \"$GENERATE_FRONT_API_TITLE\"", dir.path(), &env)
            .await
            .unwrap();

        assert_eq!(result.stdout, "HR API\n");
    }

    #[tokio::test]
    async fn test_shell_command_executor_failure() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor
            .execute("echo broken >&2; exit 3", dir.path())
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.diagnostics(), "broken");
    }

    #[tokio::test]
    async fn test_mock_command_executor() {
        let executor = MockCommandExecutor::new()
            .with_result("npx prettier --write \"a.ts\"", 0, "a.ts 12ms", "")
            .with_result("false", 1, "", "error");
        let dir = tempdir().unwrap();

        let ok = executor
            .execute("npx prettier --write \"a.ts\"", dir.path())
            .await
            .unwrap();
        assert!(ok.is_success());

        let failed = executor.execute("false", dir.path()).await.unwrap();
        assert_eq!(failed.diagnostics(), "error");

        assert!(executor.execute("unknown", dir.path()).await.is_err());
        assert_eq!(
            executor.executed(),
            vec!["npx prettier --write \"a.ts\"", "false", "unknown"]
        );
    }
}
