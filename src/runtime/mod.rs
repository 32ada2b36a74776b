//! Container runtime access
//!
//! Registry protocols, layers and credentials are all left to an external
//! container-runtime executable. This module wraps it behind the
//! [`ContainerRuntime`] trait so the transfer pipeline only sees three
//! operations that either succeed or fail.

pub mod command;
pub mod docker;

pub use command::CommandRunner;
pub use docker::DockerCli;

use crate::error::ExecutionError;
use async_trait::async_trait;

/// The three operations a transfer needs from a container runtime
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Fetch `reference` into the local image store
    async fn pull(&self, reference: &str) -> Result<(), ExecutionError>;

    /// Give the local image `source` the additional name `target`
    async fn tag(&self, source: &str, target: &str) -> Result<(), ExecutionError>;

    /// Upload the local image `reference` to its registry
    async fn push(&self, reference: &str) -> Result<(), ExecutionError>;
}
