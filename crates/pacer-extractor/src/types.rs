//! Request and response types for extraction

use crate::parser::{AGE_KEY, PACE_KEY, SEX_KEY};
use pacer_domain::{RunnerProfile, Sex};
use serde_json::{json, Value};

/// Request to extract fields from text
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    /// Free-form self-description, passed through unvalidated
    pub text: String,

    /// Model override; `None` uses the configured model
    pub model: Option<String>,
}

impl ExtractionRequest {
    /// Create a request using the configured model
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Use a specific model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Fields read from the model's reply; any of them may be unknown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractedFields {
    /// Sex of the runner
    pub sex: Option<Sex>,

    /// Age in years
    pub age: Option<u32>,

    /// 5 km pace in minutes per kilometre
    pub pace: Option<f64>,
}

/// Outcome of one extraction call
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// The reply was a well-formed object; fields may still be missing
    Parsed(ExtractedFields),

    /// The call or the parse failed; no fields are available
    Failed {
        /// Human-readable reason
        error: String,
    },
}

impl ExtractionResult {
    /// Build a failed result
    pub fn failed(error: impl Into<String>) -> Self {
        ExtractionResult::Failed {
            error: error.into(),
        }
    }

    /// The complete profile, if every field is present and truthy
    ///
    /// Age `0` and pace `0.0` count as missing.
    pub fn complete(&self) -> Option<RunnerProfile> {
        match self {
            ExtractionResult::Parsed(fields) => {
                RunnerProfile::from_parts(fields.sex, fields.age, fields.pace)
            }
            ExtractionResult::Failed { .. } => None,
        }
    }

    /// The failure reason, if the extraction failed
    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResult::Failed { error } => Some(error),
            ExtractionResult::Parsed(_) => None,
        }
    }

    /// The parsed fields, if the reply was well-formed
    pub fn fields(&self) -> Option<&ExtractedFields> {
        match self {
            ExtractionResult::Parsed(fields) => Some(fields),
            ExtractionResult::Failed { .. } => None,
        }
    }

    /// JSON view: `{"sex": .., "age": .., "pace": ..}` or `{"error": ..}`
    pub fn to_json(&self) -> Value {
        match self {
            ExtractionResult::Parsed(fields) => json!({
                SEX_KEY: fields.sex.map(|s| s.code()),
                AGE_KEY: fields.age,
                PACE_KEY: fields.pace,
            }),
            ExtractionResult::Failed { error } => json!({ "error": error }),
        }
    }
}
