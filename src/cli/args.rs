//! Command-line argument parsing

use super::config::TransferConfig;
use crate::report::ReportFormat;
use clap::Parser;
use std::path::PathBuf;

const LONG_ABOUT: &str = "A CLI tool to transfer container images between registries.

For every image in the configuration file it will:
- Pull the image from its source registry
- Tag it under the target registry
- Push it to the target registry

Failed stages are retried; one failing image never stops the rest of the batch.

Configuration file (config.yaml) format:
  images:
    - docker.vaniot.net/nginx:latest
    - docker.vaniot.net/redis:6
  target: my-registry.com
  # optional
  runtime: docker
  concurrency: 1
  retry:
    max_attempts: 3
    interval_secs: 3";

const AFTER_HELP: &str = "Examples:
  # Process images using configuration file
  image-trans-cli -c ./config.yaml

  # Preview the target mapping without pulling or pushing anything
  image-trans-cli --config /path/to/config.yaml --dry-run

  # Use podman, two images at a time, JSON report
  image-trans-cli -c config.yaml --runtime podman -j 2 -o json";

#[derive(Parser, Debug, Clone)]
#[command(name = "image-trans-cli")]
#[command(about = "A CLI tool to transfer container images between registries")]
#[command(long_about = LONG_ABOUT, after_help = AFTER_HELP)]
#[command(version)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(long = "config", short = 'c')]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Preview actions without executing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Container runtime executable (overrides the config file)
    #[arg(long = "runtime")]
    pub runtime: Option<String>,

    /// Number of images transferred at once
    #[arg(long = "concurrency", short = 'j')]
    pub concurrency: Option<usize>,

    /// Attempts per stage before an image is marked failed
    #[arg(long = "retries")]
    pub retries: Option<usize>,

    /// Seconds to wait between attempts
    #[arg(long = "retry-interval")]
    pub retry_interval: Option<u64>,

    /// Report format
    #[arg(long = "output", short = 'o', value_enum, default_value_t = ReportFormat::Text)]
    pub output: ReportFormat,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Command-line values win over the file and the environment
    pub fn override_config(&self, mut config: TransferConfig) -> TransferConfig {
        if let Some(runtime) = &self.runtime {
            config.runtime = runtime.trim().to_string();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(retries) = self.retries {
            config.retry.max_attempts = retries;
        }
        if let Some(interval) = self.retry_interval {
            config.retry.interval_secs = interval;
        }
        config
    }
}
