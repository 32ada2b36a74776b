//! Operator-facing output control
//!
//! This module provides the [`Logger`] used for every progress line the tool
//! prints. Verbosity is carried by the value itself and handed to whoever needs
//! it, so nothing in the pipeline reads process-wide flags.

use std::time::{Duration, Instant};

/// Logger responsible for all user-visible progress output
#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
    pub start_time: Option<Instant>,
    /// Tag put in front of verbose lines, e.g. the image they belong to
    pub prefix: Option<String>,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            start_time: Some(Instant::now()),
            prefix: None,
        }
    }

    /// Logger that only lets errors through. Used when stdout must carry
    /// nothing but the machine-readable report.
    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            start_time: Some(Instant::now()),
            prefix: None,
        }
    }

    /// Copy of this logger whose verbose lines are tagged with `prefix`
    pub fn scoped(&self, prefix: &str) -> Self {
        Self {
            prefix: Some(prefix.to_string()),
            ..self.clone()
        }
    }

    fn tagged(&self, message: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("[{}] {}", prefix, message),
            None => message.to_string(),
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("📝 {}", self.tagged(message));
        }
    }

    /// Information message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Error message, always shown
    pub fn error(&self, message: &str) {
        eprintln!("❌ ERROR: {}", message);
    }

    /// Detailed information (only shown in verbose mode)
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("  {}", self.tagged(message));
        }
    }

    /// Key-value pair summary display
    pub fn summary_kv(&self, title: &str, items: &[(&str, String)]) {
        if !self.quiet {
            println!("\n📋 {}", title);
            println!("{}", "─".repeat(title.len() + 3));
            for (key, value) in items {
                println!("  {}: {}", key, value);
            }
        }
    }

    /// Format duration in human-readable format
    pub fn format_duration(&self, duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs < 60 {
            format!("{:.1}s", duration.as_secs_f64())
        } else if secs < 3600 {
            format!("{}m{:02}s", secs / 60, secs % 60)
        } else {
            format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }

    pub fn elapsed_time(&self) -> String {
        match self.start_time {
            Some(start_time) => self.format_duration(start_time.elapsed()),
            None => "Unknown".to_string(),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}
