//! Error types for trace sinks

use thiserror::Error;

/// Errors that can occur while recording a trace
#[derive(Error, Debug)]
pub enum TraceError {
    /// Network or HTTP error talking to the tracing service
    #[error("Tracing service error: {0}")]
    Http(String),

    /// The service accepted the request but rejected some events
    #[error("Tracing service rejected {0} event(s)")]
    Rejected(usize),

    /// Payload could not be built
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Sink is configured to fail (tests)
    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for TraceError {
    fn from(e: serde_json::Error) -> Self {
        TraceError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for TraceError {
    fn from(e: reqwest::Error) -> Self {
        TraceError::Http(e.to_string())
    }
}
