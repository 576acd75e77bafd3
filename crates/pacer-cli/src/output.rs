//! Output formatting for the CLI.

use crate::commands::PredictionOutcome;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use pacer_extractor::{ExtractedFields, ExtractionResult};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Placeholder for an unknown field.
const UNKNOWN: &str = "-";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether output is machine-readable JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Format the result of one trigger.
    pub fn format_outcome(&self, outcome: &PredictionOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_outcome_json(outcome),
            OutputFormat::Table | OutputFormat::Quiet => Ok(self.format_outcome_line(outcome)),
        }
    }

    /// Format an extraction on its own.
    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match (self.format, result) {
            (OutputFormat::Json, _) => Ok(serde_json::to_string_pretty(&result.to_json())?),
            (_, ExtractionResult::Failed { error }) => Ok(self.failure(error)),
            (OutputFormat::Table, ExtractionResult::Parsed(fields)) => {
                Ok(self.format_fields_table(fields))
            }
            (OutputFormat::Quiet, ExtractionResult::Parsed(fields)) => {
                Ok(format_fields_quiet(fields))
            }
        }
    }

    fn format_outcome_json(&self, outcome: &PredictionOutcome) -> Result<String> {
        let extraction = outcome.extraction();
        let extracted = match extraction.fields() {
            Some(_) => extraction.to_json(),
            None => Value::Null,
        };

        let value = match outcome {
            PredictionOutcome::Predicted { seconds, .. } => json!({
                "extracted": extracted,
                "prediction_seconds": seconds,
            }),
            PredictionOutcome::Rejected { reason, .. } => json!({
                "extracted": extracted,
                "error": reason,
            }),
        };

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_outcome_line(&self, outcome: &PredictionOutcome) -> String {
        match outcome {
            PredictionOutcome::Predicted { seconds, .. } => {
                if self.format == OutputFormat::Quiet {
                    return format!("{:.2}", seconds);
                }
                self.colorize(
                    &format!(
                        "🏁 Predicted half-marathon time: {:.2} seconds ({})",
                        seconds,
                        format_duration(*seconds)
                    ),
                    "green",
                )
            }
            PredictionOutcome::Rejected { reason, .. } => self.failure(reason),
        }
    }

    fn format_fields_table(&self, fields: &ExtractedFields) -> String {
        let sex = fields
            .sex
            .map(|s| format!("{} ({})", s.code(), s))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let age = fields
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let pace = fields
            .pace
            .map(|p| format!("{} min/km", p))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Sex", sex.as_str()]);
        builder.push_record(["Age", age.as_str()]);
        builder.push_record(["5 km pace", pace.as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a "could not read" line.
    pub fn failure(&self, reason: &str) -> String {
        self.colorize(
            &format!("❌ Could not read all required data: {}", reason),
            "red",
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render seconds as `h:mm:ss`, rounded to the nearest second.
///
/// Negative and non-finite inputs render as `0:00:00`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

fn format_fields_quiet(fields: &ExtractedFields) -> String {
    [
        fields.sex.map(|s| s.code().to_string()),
        fields.age.map(|a| a.to_string()),
        fields.pace.map(|p| p.to_string()),
    ]
    .into_iter()
    .map(|v| v.unwrap_or_else(|| UNKNOWN.to_string()))
    .collect::<Vec<_>>()
    .join(" ")
}
