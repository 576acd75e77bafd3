//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pacer - predict a half-marathon finish time from a short self-description.
#[derive(Debug, Parser)]
#[command(name = "pacer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Chat model to extract with
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Regression artifact to predict with
    #[arg(short, long, global = true)]
    pub artifact: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict a finish time from a self-description
    Predict(TextArgs),

    /// Extract sex, age and pace without predicting
    Extract(TextArgs),

    /// Inspect or initialize the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Free text taken from the arguments or stdin.
#[derive(Debug, Parser)]
pub struct TextArgs {
    /// Self-description, e.g. "jestem mężczyzną, mam 37 lat, 5 km biegam w tempie 5.23 min/km"
    #[arg(required_unless_present = "stdin")]
    pub text: Vec<String>,

    /// Read the description from stdin
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,
}

impl TextArgs {
    /// Join the positional words into one description.
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
