//! Image Transfer Library
//!
//! Batch-transfers container images between registries: every configured
//! image is pulled from its source registry, retagged under the target
//! registry and pushed, with the actual registry work delegated to a local
//! container-runtime executable.

pub mod cli;
pub mod error;
pub mod logging;
pub mod report;
pub mod runtime;
pub mod transfer;

pub use error::{ExecutionError, Result, TransferError};
pub use logging::Logger;
pub use report::{ReportFormat, ReportSummary, TransferReport};
pub use runtime::{CommandRunner, ContainerRuntime, DockerCli};
pub use transfer::{
    RetryPolicy, StageName, TransferOptions, TransferOrchestrator, TransferOutcome,
};
