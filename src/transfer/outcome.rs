//! Per-image transfer results

use super::stage::StageName;
use crate::error::ExecutionError;
use serde::{Serialize, Serializer};

/// Result of transferring one configured image. Created once, never mutated.
#[derive(Debug, Serialize)]
pub struct TransferOutcome {
    #[serde(rename = "source")]
    pub source_ref: String,
    #[serde(rename = "target")]
    pub target_ref: String,
    pub success: bool,
    pub failed_stage: Option<StageName>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ExecutionError>,
}

impl TransferOutcome {
    pub fn succeeded(source_ref: impl Into<String>, target_ref: impl Into<String>) -> Self {
        Self {
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
            success: true,
            failed_stage: None,
            error: None,
        }
    }

    pub fn failed(
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
        stage: StageName,
        error: Option<ExecutionError>,
    ) -> Self {
        Self {
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
            success: false,
            failed_stage: Some(stage),
            error,
        }
    }
}

fn serialize_error<S>(error: &Option<ExecutionError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
