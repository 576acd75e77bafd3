//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use pacer_extractor::ExtractorConfig;
use pacer_predictor::DEFAULT_ARTIFACT_PATH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction model parameters
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Regression artifact settings
    #[serde(default)]
    pub predictor: PredictorSettings,

    /// Tracing settings; credentials come from the environment only
    #[serde(default)]
    pub langfuse: LangfuseSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Where the regression artifact lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorSettings {
    /// Path to the pipeline JSON, relative to the working directory
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,
}

/// Langfuse sink settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangfuseSettings {
    /// Record traces when keys are available
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Host override; `LANGFUSE_HOST` and then the cloud host otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(pacer_home()?.join("config.toml"))
    }

    /// Resolve an explicit path, falling back to the default one.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::path(),
        }
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;

        if self.predictor.artifact_path.as_os_str().is_empty() {
            return Err(CliError::Config(
                "[predictor] artifact_path must not be empty".to_string(),
            ));
        }
        if matches!(&self.langfuse.host, Some(host) if host.trim().is_empty()) {
            return Err(CliError::Config("[langfuse] host must not be empty".to_string()));
        }
        Ok(())
    }
}

/// `~/.pacer`
pub fn pacer_home() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".pacer"))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
        }
    }
}

impl Default for LangfuseSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            host: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_PATH)
}
