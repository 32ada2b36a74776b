//! Wires configuration, preflight, the transfer pipeline and the report

use crate::cli::args::Args;
use crate::cli::config::TransferConfig;
use crate::error::Result;
use crate::logging::Logger;
use crate::report::{self, ReportFormat, ReportSummary, TransferReport};
use crate::runtime::DockerCli;
use crate::transfer::{TransferOptions, TransferOrchestrator};
use std::sync::Arc;

pub struct Runner {
    args: Args,
    logger: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        // stdout belongs to the JSON document in json mode
        let logger = match args.output {
            ReportFormat::Json => Logger::new_quiet(),
            ReportFormat::Text => Logger::new(args.verbose),
        };
        Self { args, logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run the whole batch. Errors returned here are fatal; per-image
    /// failures are part of the report and the returned summary.
    pub async fn run(&self) -> Result<ReportSummary> {
        self.logger.info("Starting image processing...");

        let config = self.load_config()?;
        let json = self.args.output == ReportFormat::Json;
        let runtime = DockerCli::new(config.runtime.clone()).stdout_to_stderr(json);
        if !self.args.dry_run {
            self.preflight(&runtime).await?;
        }

        let orchestrator = TransferOrchestrator::new(
            Arc::new(runtime),
            config.retry.policy(),
            TransferOptions {
                dry_run: self.args.dry_run,
                concurrency: config.concurrency,
            },
            self.logger.clone(),
        );
        let outcomes = orchestrator.run(&config.images, &config.target).await;

        let report = TransferReport::new(&outcomes);
        match self.args.output {
            ReportFormat::Text => print!("{}", report::render(&outcomes, self.args.verbose)),
            ReportFormat::Json => println!("{}", report.render_json()?),
        }

        if report.has_failures() {
            self.logger.info(&format!(
                "{} of {} images failed to transfer.",
                report.summary.failed, report.summary.total
            ));
        }
        self.logger.info("Image processing completed.");
        self.logger
            .verbose(&format!("Finished in {}", self.logger.elapsed_time()));
        Ok(report.summary)
    }

    /// Load the file, layer environment and flag overrides, then validate.
    /// Nothing is executed before this succeeds.
    fn load_config(&self) -> Result<TransferConfig> {
        let config = TransferConfig::load(&self.args.config)?.from_env();
        let config = self.args.override_config(config);
        config.validate()?;

        if self.args.verbose {
            let retry = config.retry.policy();
            self.logger.summary_kv(
                "Configuration",
                &[
                    ("Config file", self.args.config.display().to_string()),
                    ("Images", config.images.len().to_string()),
                    ("Target", config.target.clone()),
                    ("Runtime", config.runtime.clone()),
                    ("Concurrency", config.concurrency.to_string()),
                    ("Max attempts", retry.max_attempts().to_string()),
                    ("Retry interval", self.logger.format_duration(retry.interval())),
                ],
            );
        }
        Ok(config)
    }

    async fn preflight(&self, runtime: &DockerCli) -> Result<()> {
        let version = runtime.preflight().await?;
        self.logger
            .verbose(&format!("Using {}: {}", runtime.program(), version));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferError;
    use clap::Parser;
    use std::path::Path;

    fn write_config(dir: &Path, yaml: &str) -> String {
        let path = dir.join("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        path.display().to_string()
    }

    #[tokio::test]
    async fn test_dry_run_reports_every_image_as_successful() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "images: [a.io/x/nginx:1, redis:6]\ntarget: mirror.io\nruntime: image-trans-cli-missing-runtime\n",
        );
        let args = Args::try_parse_from(["image-trans-cli", "-c", config.as_str(), "--dry-run"]).unwrap();

        // the runtime does not exist, so any invocation would fail the run
        let summary = Runner::new(args).run().await.unwrap();
        assert_eq!(
            summary,
            ReportSummary {
                total: 2,
                successful: 2,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_config_aborts_before_preflight() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            "images: []\ntarget: mirror.io\nruntime: image-trans-cli-missing-runtime\n",
        );
        let args = Args::try_parse_from(["image-trans-cli", "-c", config.as_str()]).unwrap();

        let err = Runner::new(args).run().await.unwrap_err();
        assert!(matches!(err, TransferError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_runtime_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "images: [nginx]\ntarget: mirror.io\n");
        let args = Args::try_parse_from([
            "image-trans-cli",
            "-c",
            config.as_str(),
            "--runtime",
            "image-trans-cli-missing-runtime",
            "-o",
            "json",
        ])
        .unwrap();

        let err = Runner::new(args).run().await.unwrap_err();
        assert!(matches!(err, TransferError::Preflight(_)));
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let args = Args::try_parse_from(["image-trans-cli", "-c", "/nonexistent/config.yaml"]).unwrap();
        let err = Runner::new(args).run().await.unwrap_err();
        assert!(matches!(err, TransferError::ConfigRead { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_full_run_against_succeeding_runtime() {
        let dir = tempfile::tempdir().unwrap();
        // `true` passes preflight and every stage regardless of arguments
        let config = write_config(
            dir.path(),
            "images: [docker.vaniot.net/nginx:latest, redis:6]\ntarget: mirror.io\nretry:\n  interval_secs: 0\n",
        );
        let args = Args::try_parse_from(["image-trans-cli", "-c", config.as_str(), "--runtime", "true", "-v"]).unwrap();

        let summary = Runner::new(args).run().await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 0);
    }
}
