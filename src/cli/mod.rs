//! Command line interface module
//!
//! Argument parsing, configuration loading and the [`Runner`] that turns a
//! parsed command line into a finished transfer batch.

pub mod args;
pub mod config;
pub mod runner;

pub use args::Args;
pub use config::{RetrySettings, TransferConfig};
pub use runner::Runner;
