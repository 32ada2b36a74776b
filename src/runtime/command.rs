//! Subprocess execution for the container runtime

use crate::error::ExecutionError;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Runs one executable with varying arguments.
///
/// Child stdout/stderr are inherited, so the runtime's own progress output
/// reaches the operator while the call is in flight. With
/// `stdout_to_stderr` set, child stdout is sent to our stderr instead and
/// our stdout stays free for a machine-readable report.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    stdout_to_stderr: bool,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            stdout_to_stderr: false,
        }
    }

    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program and wait for it to exit. Zero exit status is success.
    pub async fn run(&self, args: &[&str]) -> Result<(), ExecutionError> {
        let command = self.render(args);
        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ExecutionError::Spawn {
                command: command.clone(),
                source,
            })?;

        check_status(status, command)
    }

    /// Run the program with output captured and return its trimmed stdout.
    pub async fn capture(&self, args: &[&str]) -> Result<String, ExecutionError> {
        let command = self.render(args);
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ExecutionError::Spawn {
                command: command.clone(),
                source,
            })?;

        check_status(output.status, command)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn render(&self, args: &[&str]) -> String {
        let mut parts = Vec::with_capacity(args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend_from_slice(args);
        parts.join(" ")
    }
}

fn check_status(status: ExitStatus, command: String) -> Result<(), ExecutionError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ExecutionError::NonZeroExit { command, code }),
        None => Err(ExecutionError::Terminated { command }),
    }
}
