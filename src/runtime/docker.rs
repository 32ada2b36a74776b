//! Docker-compatible CLI backend

use super::{CommandRunner, ContainerRuntime};
use crate::error::{ExecutionError, Result, TransferError};
use async_trait::async_trait;

/// [`ContainerRuntime`] backed by a docker-compatible executable
/// (`docker`, `podman`, `nerdctl`, ...) accepting `pull`, `tag` and `push`.
#[derive(Debug, Clone)]
pub struct DockerCli {
    runner: CommandRunner,
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            runner: CommandRunner::new(program),
        }
    }

    /// Send the runtime's stdout to stderr (used when stdout carries JSON)
    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.runner = self.runner.stdout_to_stderr(enabled);
        self
    }

    pub fn program(&self) -> &str {
        self.runner.program()
    }

    /// Verify the executable can be started, returning its version line.
    pub async fn preflight(&self) -> Result<String> {
        self.runner.capture(&["--version"]).await.map_err(|e| {
            TransferError::Preflight(format!(
                "{} is not installed or not available in PATH ({}). Please install it and try again.",
                self.program(),
                e
            ))
        })
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn pull(&self, reference: &str) -> std::result::Result<(), ExecutionError> {
        self.runner.run(&["pull", reference]).await
    }

    async fn tag(&self, source: &str, target: &str) -> std::result::Result<(), ExecutionError> {
        self.runner.run(&["tag", source, target]).await
    }

    async fn push(&self, reference: &str) -> std::result::Result<(), ExecutionError> {
        self.runner.run(&["push", reference]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preflight_fails_for_missing_runtime() {
        let cli = DockerCli::new("image-trans-cli-no-such-runtime");
        let err = cli.preflight().await.unwrap_err();
        assert!(matches!(err, TransferError::Preflight(_)));
        assert!(err.to_string().contains("image-trans-cli-no-such-runtime"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stage_commands_surface_exit_failures() {
        // `false` ignores its arguments and exits 1
        let cli = DockerCli::new("false");
        let err = cli.pull("nginx:latest").await.unwrap_err();
        assert!(matches!(err, ExecutionError::NonZeroExit { code: 1, .. }));
        assert_eq!(err.command(), "false pull nginx:latest");

        let err = cli.tag("a/nginx:1", "reg/nginx:1").await.unwrap_err();
        assert_eq!(err.command(), "false tag a/nginx:1 reg/nginx:1");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stage_commands_succeed_on_zero_exit() {
        let cli = DockerCli::new("true");
        assert!(cli.push("reg/nginx:1").await.is_ok());
        assert!(cli.preflight().await.is_ok());
    }
}
