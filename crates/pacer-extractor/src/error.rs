//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// These never leave `FieldExtractor::extract`; they are rendered into
/// `ExtractionResult::Failed`.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The language-model call failed (network, auth, rate limit, server error)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model replied, but not with the expected JSON object
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// The blocking extraction task could not complete
    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::MalformedOutput(format!("JSON parse error: {}", e))
    }
}
