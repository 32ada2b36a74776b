//! Transfer configuration file
//!
//! The YAML file lists the images to transfer and the registry they go to.
//! Runtime executable, worker count and retry settings are optional and fall
//! back to the defaults below; environment variables and command-line flags
//! can override them.

use crate::error::{Result, TransferError};
use crate::transfer::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_RUNTIME: &str = "docker";
pub const DEFAULT_CONCURRENCY: usize = 1;

pub const ENV_RUNTIME: &str = "IMAGE_TRANS_RUNTIME";
pub const ENV_MAX_RETRIES: &str = "IMAGE_TRANS_MAX_RETRIES";
pub const ENV_RETRY_INTERVAL: &str = "IMAGE_TRANS_RETRY_INTERVAL";
pub const ENV_CONCURRENCY: &str = "IMAGE_TRANS_CONCURRENCY";

/// Retry settings for each transfer stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.interval_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub target: String,
    #[serde(default = "default_runtime")]
    pub runtime: String,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default)]
    pub retry: RetrySettings,
}

impl TransferConfig {
    /// Read and parse the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TransferError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut config: TransferConfig = serde_yaml::from_str(content)?;
        config.target = config.target.trim().to_string();
        config.runtime = config.runtime.trim().to_string();
        for image in &mut config.images {
            *image = image.trim().to_string();
        }
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn from_env(self) -> Self {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    /// Unparsable numbers are ignored.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(runtime) = lookup(ENV_RUNTIME) {
            if !runtime.trim().is_empty() {
                self.runtime = runtime.trim().to_string();
            }
        }
        if let Some(Ok(max_attempts)) = lookup(ENV_MAX_RETRIES).map(|v| v.trim().parse::<usize>()) {
            self.retry.max_attempts = max_attempts;
        }
        if let Some(Ok(interval)) = lookup(ENV_RETRY_INTERVAL).map(|v| v.trim().parse::<u64>()) {
            self.retry.interval_secs = interval;
        }
        if let Some(Ok(concurrency)) = lookup(ENV_CONCURRENCY).map(|v| v.trim().parse::<usize>()) {
            self.concurrency = concurrency;
        }
        self
    }

    /// Checks run before any image is touched. Every failure is fatal.
    pub fn validate(&self) -> Result<()> {
        if self.images.is_empty() {
            return Err(TransferError::Config(
                "No images specified in the config file.".to_string(),
            ));
        }
        if let Some(index) = self.images.iter().position(|image| image.is_empty()) {
            return Err(TransferError::Config(format!(
                "Image entry {} in the config file is empty.",
                index + 1
            )));
        }
        if self.target.is_empty() {
            return Err(TransferError::Config(
                "Target repository is not specified in the config file.".to_string(),
            ));
        }
        if self.runtime.is_empty() {
            return Err(TransferError::Config(
                "Container runtime executable cannot be empty.".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(TransferError::Config(
                "concurrency must be greater than 0".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(TransferError::Config(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

fn default_interval_secs() -> u64 {
    DEFAULT_RETRY_INTERVAL.as_secs()
}
