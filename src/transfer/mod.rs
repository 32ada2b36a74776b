//! Image transfer pipeline
//!
//! For each configured image the [`TransferOrchestrator`] runs a
//! [`TransferStageMachine`]: pull from the source registry, tag under the
//! target registry, push. Every stage is wrapped in the [`RetryPolicy`] and the
//! whole image ends in exactly one [`TransferOutcome`].

pub mod orchestrator;
pub mod outcome;
pub mod reference;
pub mod retry;
pub mod stage;

pub use orchestrator::{TransferOptions, TransferOrchestrator};
pub use outcome::TransferOutcome;
pub use reference::{bare_name, target_reference};
pub use retry::{RetryOutcome, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};
pub use stage::{StageName, TransferStageMachine, TransferState};
