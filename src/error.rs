//! Error types for the image transfer tool
//!
//! [`TransferError`] is the fatal taxonomy: anything that stops the run before
//! the first image is processed. [`ExecutionError`] describes a single failed
//! container-runtime invocation; those are retried and end up inside a
//! transfer outcome instead of aborting the batch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("Preflight check failed: {0}")]
    Preflight(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of one container-runtime invocation.
///
/// The variants only exist for reporting; the retry policy treats them all
/// the same way.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {code}")]
    NonZeroExit { command: String, code: i32 },
    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },
}

impl ExecutionError {
    /// Command line that failed, as it was rendered for the operator
    pub fn command(&self) -> &str {
        match self {
            ExecutionError::Spawn { command, .. }
            | ExecutionError::NonZeroExit { command, .. }
            | ExecutionError::Terminated { command } => command,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
