//! Fixed-interval retry for transfer stages

use crate::logging::Logger;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// Runs an operation up to `max_attempts` times with a constant wait between
/// failed attempts. No backoff, no jitter, no wait after the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    interval: Duration,
}

/// Result of a retried operation along with how many attempts it took
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub attempts: usize,
    pub result: Result<T, E>,
}

impl<T, E> RetryOutcome<T, E> {
    pub fn into_result(self) -> Result<T, E> {
        self.result
    }
}

impl RetryPolicy {
    /// `max_attempts` below 1 is raised to 1; the operation always runs once.
    pub fn new(max_attempts: usize, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Verbose line logged after failed attempt number `attempt`
    pub fn retry_message(&self, label: &str, attempt: usize, error: &dyn Display) -> String {
        format!(
            "{} failed (attempt {}/{}): {}. Retrying in {} seconds...",
            label,
            attempt,
            self.max_attempts,
            error,
            self.interval.as_secs_f64()
        )
    }

    /// Run `operation` until it succeeds or attempts run out.
    ///
    /// On exhaustion the error of the final attempt is returned and earlier
    /// errors are dropped. `label` names the operation in the verbose retry
    /// lines (e.g. "Pulling").
    pub async fn execute<F, Fut, T, E>(
        &self,
        label: &str,
        logger: &Logger,
        mut operation: F,
    ) -> RetryOutcome<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => {
                    return RetryOutcome {
                        attempts: attempt,
                        result: Ok(value),
                    };
                }
                Err(error) if attempt < self.max_attempts => {
                    logger.detail(&self.retry_message(label, attempt, &error));
                    sleep(self.interval).await;
                    attempt += 1;
                }
                Err(error) => {
                    return RetryOutcome {
                        attempts: attempt,
                        result: Err(error),
                    };
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL)
    }
}
