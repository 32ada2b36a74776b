//! Final transfer report
//!
//! Groups outcomes into successful and failed transfers (each group keeps the
//! configured order) and renders them as text for the terminal or as JSON.

use crate::error::Result;
use crate::transfer::TransferOutcome;
use clap::ValueEnum;
use serde::Serialize;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Aggregate counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct TransferReport<'a> {
    pub summary: ReportSummary,
    pub successful: Vec<&'a TransferOutcome>,
    pub failed: Vec<&'a TransferOutcome>,
}

impl<'a> TransferReport<'a> {
    pub fn new(outcomes: &'a [TransferOutcome]) -> Self {
        let (successful, failed): (Vec<_>, Vec<_>) =
            outcomes.iter().partition(|outcome| outcome.success);
        let summary = ReportSummary {
            total: outcomes.len(),
            successful: successful.len(),
            failed: failed.len(),
        };
        Self {
            summary,
            successful,
            failed,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    /// Human-readable report. `verbose` adds the error text of failed images.
    pub fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str("\nProcessing Results:\n");
        out.push_str("==================\n");

        out.push_str("\nSuccessful Transfers:\n");
        for outcome in &self.successful {
            out.push_str(&format!(
                "✅ {} -> {}\n",
                outcome.source_ref, outcome.target_ref
            ));
        }

        out.push_str("\nFailed Transfers:\n");
        for outcome in &self.failed {
            let stage = outcome
                .failed_stage
                .map(|stage| stage.as_str())
                .unwrap_or("unknown");
            out.push_str(&format!(
                "❌ {} -> {} [Failed at: {}]\n",
                outcome.source_ref, outcome.target_ref, stage
            ));
            if verbose {
                if let Some(error) = &outcome.error {
                    out.push_str(&format!("   Error: {}\n", error));
                }
            }
        }

        out.push_str("\nSummary:\n");
        out.push_str(&format!("Total: {}\n", self.summary.total));
        out.push_str(&format!("Successful: {}\n", self.summary.successful));
        out.push_str(&format!("Failed: {}\n", self.summary.failed));
        out
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render outcomes as the text report
pub fn render(outcomes: &[TransferOutcome], verbose: bool) -> String {
    TransferReport::new(outcomes).render_text(verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutionError;
    use crate::transfer::StageName;

    fn failure(source: &str, target: &str, stage: StageName) -> TransferOutcome {
        TransferOutcome::failed(
            source,
            target,
            stage,
            Some(ExecutionError::NonZeroExit {
                command: format!("docker {} {}", stage, source),
                code: 1,
            }),
        )
    }

    fn mixed_outcomes() -> Vec<TransferOutcome> {
        vec![
            TransferOutcome::succeeded("src.io/a:1", "dst.io/a:1"),
            failure("src.io/b:1", "dst.io/b:1", StageName::Pull),
            TransferOutcome::succeeded("src.io/c:1", "dst.io/c:1"),
            failure("src.io/d:1", "dst.io/d:1", StageName::Push),
        ]
    }

    #[test]
    fn test_grouping_preserves_relative_order() {
        let outcomes = mixed_outcomes();
        let report = TransferReport::new(&outcomes);

        let successful: Vec<_> = report.successful.iter().map(|o| o.source_ref.as_str()).collect();
        let failed: Vec<_> = report.failed.iter().map(|o| o.source_ref.as_str()).collect();
        assert_eq!(successful, vec!["src.io/a:1", "src.io/c:1"]);
        assert_eq!(failed, vec!["src.io/b:1", "src.io/d:1"]);
        assert_eq!(
            report.summary,
            ReportSummary {
                total: 4,
                successful: 2,
                failed: 2
            }
        );
        assert!(report.has_failures());
    }

    #[test]
    fn test_text_rendering() {
        let outcomes = mixed_outcomes();
        let text = render(&outcomes, false);

        let ok_section = text.find("Successful Transfers:").unwrap();
        let failed_section = text.find("Failed Transfers:").unwrap();
        let a = text.find("✅ src.io/a:1 -> dst.io/a:1").unwrap();
        let c = text.find("✅ src.io/c:1 -> dst.io/c:1").unwrap();
        let b = text.find("❌ src.io/b:1 -> dst.io/b:1 [Failed at: pull]").unwrap();
        let d = text.find("❌ src.io/d:1 -> dst.io/d:1 [Failed at: push]").unwrap();

        assert!(ok_section < a && a < c && c < failed_section);
        assert!(failed_section < b && b < d);
        assert!(text.contains("Total: 4\nSuccessful: 2\nFailed: 2\n"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_verbose_text_shows_errors() {
        let outcomes = mixed_outcomes();
        let text = render(&outcomes, true);
        assert!(text.contains("   Error: `docker pull src.io/b:1` exited with status 1"));
        assert!(text.contains("   Error: `docker push src.io/d:1` exited with status 1"));
    }

    #[test]
    fn test_empty_report() {
        let report = TransferReport::new(&[]);
        assert_eq!(report.summary.total, 0);
        assert!(!report.has_failures());
        assert!(report.render_text(false).contains("Total: 0"));
    }

    #[test]
    fn test_json_rendering() {
        let outcomes = mixed_outcomes();
        let json = TransferReport::new(&outcomes).render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total"], 4);
        assert_eq!(value["summary"]["successful"], 2);
        assert_eq!(value["summary"]["failed"], 2);
        assert_eq!(value["successful"][1]["target"], "dst.io/c:1");
        assert_eq!(value["failed"][0]["failed_stage"], "pull");
        assert_eq!(value["failed"][1]["failed_stage"], "push");
    }
}
