//! Per-image pull → tag → push state machine

use super::outcome::TransferOutcome;
use super::reference::target_reference;
use super::retry::RetryPolicy;
use crate::error::ExecutionError;
use crate::logging::Logger;
use crate::runtime::ContainerRuntime;
use serde::Serialize;
use std::fmt;

/// Stage of a transfer, used to report where an image failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Pull,
    Tag,
    Push,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Pull => "pull",
            StageName::Tag => "tag",
            StageName::Push => "push",
        }
    }

    /// Progressive form used in retry messages
    pub fn label(&self) -> &'static str {
        match self {
            StageName::Pull => "Pulling",
            StageName::Tag => "Tagging",
            StageName::Push => "Pushing",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transfer state. Transitions only move forward; `Succeeded` and `Failed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Pending,
    Pulling,
    Tagging,
    Pushing,
    Succeeded,
    Failed(StageName),
}

impl TransferState {
    /// Stage being executed in this state, if any
    pub fn stage(self) -> Option<StageName> {
        match self {
            TransferState::Pulling => Some(StageName::Pull),
            TransferState::Tagging => Some(StageName::Tag),
            TransferState::Pushing => Some(StageName::Push),
            _ => None,
        }
    }

    pub fn start(self) -> Self {
        match self {
            TransferState::Pending => TransferState::Pulling,
            other => other,
        }
    }

    /// Transition after the current stage finished (retries included)
    pub fn finish_stage(self, succeeded: bool) -> Self {
        match (self.stage(), succeeded) {
            (Some(stage), false) => TransferState::Failed(stage),
            (Some(StageName::Pull), true) => TransferState::Tagging,
            (Some(StageName::Tag), true) => TransferState::Pushing,
            (Some(StageName::Push), true) => TransferState::Succeeded,
            (None, _) => self,
        }
    }
}

/// Drives one image through pull, tag and push, retrying each stage
pub struct TransferStageMachine<'a> {
    runtime: &'a dyn ContainerRuntime,
    retry: &'a RetryPolicy,
    logger: &'a Logger,
}

impl<'a> TransferStageMachine<'a> {
    pub fn new(runtime: &'a dyn ContainerRuntime, retry: &'a RetryPolicy, logger: &'a Logger) -> Self {
        Self {
            runtime,
            retry,
            logger,
        }
    }

    /// Transfer `source` into the `target` registry. Stops at the first stage
    /// whose retries are exhausted; later stages are never attempted.
    pub async fn transfer(&self, source: &str, target: &str) -> TransferOutcome {
        let target_ref = target_reference(source, target);
        let mut state = TransferState::Pending.start();
        let mut last_error = None;

        while let Some(stage) = state.stage() {
            let retried = self
                .retry
                .execute(stage.label(), self.logger, || {
                    self.run_stage(stage, source, &target_ref)
                })
                .await;

            let attempts = retried.attempts;
            match retried.into_result() {
                Ok(()) => {
                    if attempts > 1 {
                        self.logger.detail(&format!(
                            "{} succeeded after {} attempts",
                            stage.label(),
                            attempts
                        ));
                    }
                    state = state.finish_stage(true);
                }
                Err(error) => {
                    self.logger.detail(&format!(
                        "{} gave up after {} attempts: {}",
                        stage.label(),
                        attempts,
                        error.command()
                    ));
                    last_error = Some(error);
                    state = state.finish_stage(false);
                }
            }
        }

        match state {
            TransferState::Failed(stage) => {
                TransferOutcome::failed(source, target_ref, stage, last_error)
            }
            _ => {
                self.logger
                    .detail(&format!("Successfully processed image: {}", source));
                TransferOutcome::succeeded(source, target_ref)
            }
        }
    }

    async fn run_stage(
        &self,
        stage: StageName,
        source: &str,
        target_ref: &str,
    ) -> Result<(), ExecutionError> {
        match stage {
            StageName::Pull => {
                self.logger
                    .detail(&format!("Pulling source image: {}", source));
                self.runtime.pull(source).await
            }
            StageName::Tag => {
                self.logger.detail(&format!("Tagging image as: {}", target_ref));
                self.runtime.tag(source, target_ref).await
            }
            StageName::Push => {
                self.logger
                    .detail(&format!("Pushing image to target repository: {}", target_ref));
                self.runtime.push(target_ref).await
            }
        }
    }
}
