//! In-memory trace sink

use crate::error::TraceError;
use pacer_domain::{TraceRecord, TraceSink};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sink that keeps every record in memory
///
/// Clones share the same storage, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<TraceRecord>>>,
    failure: Option<String>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that refuses every record with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Arc::default(),
            failure: Some(message.into()),
        }
    }

    /// Snapshot of the records received so far
    pub fn records(&self) -> Vec<TraceRecord> {
        self.lock().clone()
    }

    /// Number of records received so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TraceSink for RecordingSink {
    type Error = TraceError;

    fn record(&self, record: &TraceRecord) -> Result<(), Self::Error> {
        if let Some(message) = &self.failure {
            return Err(TraceError::Unavailable(message.clone()));
        }
        self.lock().push(record.clone());
        Ok(())
    }
}
