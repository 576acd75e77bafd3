//! Pacer CLI library.
//!
//! This library provides the core functionality for the `pacer` command-line
//! interface: configuration, credential resolution, startup wiring, the
//! predict trigger and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod repl;
pub mod services;

pub use cli::{Cli, Command};
pub use commands::{trigger, PredictionOutcome};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
