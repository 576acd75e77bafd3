//! Observed extraction calls

use std::time::{Duration, SystemTime};

/// How an observed call ended
#[derive(Debug, Clone, PartialEq)]
pub enum TraceOutcome {
    /// The call produced output (rendered as text)
    Output(String),

    /// The call failed with a message
    Error(String),
}

/// One observed call, ready to hand to a trace sink
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    /// Span name
    pub name: String,

    /// Model identifier used for the call
    pub model: String,

    /// Input passed to the call
    pub input: String,

    /// Output or failure
    pub outcome: TraceOutcome,

    /// Wall-clock start of the call
    pub started_at: SystemTime,

    /// Time spent in the call
    pub duration: Duration,
}

impl TraceRecord {
    /// Wall-clock end of the call
    pub fn ended_at(&self) -> SystemTime {
        self.started_at + self.duration
    }

    /// Whether the call failed
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, TraceOutcome::Error(_))
    }
}
