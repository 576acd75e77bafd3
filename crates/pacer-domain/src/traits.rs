//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ChatRequest, PredictionRow, TraceRecord};

/// Trait for language-model provider operations
///
/// Implemented by the infrastructure layer (pacer-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Run a chat completion and return the first choice's text content
    fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error>;
}

/// Trait for recording observed calls
///
/// Implemented by the infrastructure layer (pacer-observe). Recording is
/// best-effort: callers log failures and carry on.
pub trait TraceSink {
    /// Error type for sink operations
    type Error;

    /// Record one observed call
    fn record(&self, record: &TraceRecord) -> Result<(), Self::Error>;
}

/// A missing sink records nothing
impl<T: TraceSink> TraceSink for Option<T> {
    type Error = T::Error;

    fn record(&self, record: &TraceRecord) -> Result<(), Self::Error> {
        match self {
            Some(sink) => sink.record(record),
            None => Ok(()),
        }
    }
}

/// Trait for scoring a single row with a pre-trained regression artifact
///
/// Implemented by the infrastructure layer (pacer-predictor)
pub trait FinishTimePredictor {
    /// Error type for prediction operations
    type Error;

    /// Score a row, returning it augmented with the prediction column
    fn predict(&self, row: &PredictionRow) -> Result<PredictionRow, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceOutcome;
    use std::cell::Cell;
    use std::time::{Duration, SystemTime};

    struct CountingSink {
        calls: Cell<usize>,
    }

    impl TraceSink for CountingSink {
        type Error = ();

        fn record(&self, _record: &TraceRecord) -> Result<(), Self::Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    fn sample_record() -> TraceRecord {
        TraceRecord {
            name: "extract_fields".to_string(),
            model: "test".to_string(),
            input: "hello".to_string(),
            outcome: TraceOutcome::Error("boom".to_string()),
            started_at: SystemTime::now(),
            duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_optional_sink_forwards() {
        let sink = Some(CountingSink { calls: Cell::new(0) });
        sink.record(&sample_record()).unwrap();
        sink.record(&sample_record()).unwrap();
        assert_eq!(sink.as_ref().unwrap().calls.get(), 2);
    }

    #[test]
    fn test_missing_sink_is_noop() {
        let sink: Option<CountingSink> = None;
        assert!(sink.record(&sample_record()).is_ok());
    }
}
