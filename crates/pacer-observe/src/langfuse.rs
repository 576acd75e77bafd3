//! Langfuse ingestion sink
//!
//! Each `TraceRecord` becomes one trace with a single generation observation,
//! sent as a two-event batch to `POST {host}/api/public/ingestion`.

use crate::config::LangfuseConfig;
use crate::error::TraceError;
use chrono::{DateTime, SecondsFormat, Utc};
use pacer_domain::{TraceOutcome, TraceRecord, TraceSink};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, SystemTime};
use tracing::debug;
use uuid::Uuid;

/// Default timeout for ingestion requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Trace sink backed by the Langfuse ingestion API
#[derive(Debug)]
pub struct LangfuseSink {
    config: LangfuseConfig,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize, Default)]
struct IngestionResponse {
    #[serde(default)]
    errors: Vec<Value>,
}

impl LangfuseSink {
    /// Create a new sink
    ///
    /// # Errors
    ///
    /// Returns `TraceError::Http` if the HTTP client cannot be built.
    pub fn new(config: LangfuseConfig) -> Result<Self, TraceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a sink from the process environment, if it is configured
    pub fn from_env() -> Result<Option<Self>, TraceError> {
        LangfuseConfig::from_env().map(Self::new).transpose()
    }

    /// The sink configuration
    pub fn config(&self) -> &LangfuseConfig {
        &self.config
    }
}

impl TraceSink for LangfuseSink {
    type Error = TraceError;

    fn record(&self, record: &TraceRecord) -> Result<(), Self::Error> {
        let payload = build_batch(record);

        let response = self
            .client
            .post(self.config.ingestion_url())
            .basic_auth(&self.config.public_key, Some(&self.config.secret_key))
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TraceError::Http(format!("HTTP {}: {}", status, body)));
        }

        // 207 Multi-Status lists per-event failures
        let parsed: IngestionResponse = response.json().unwrap_or_default();
        if !parsed.errors.is_empty() {
            return Err(TraceError::Rejected(parsed.errors.len()));
        }

        debug!("Recorded trace '{}' ({} ms)", record.name, record.duration.as_millis());
        Ok(())
    }
}

/// Build the ingestion batch for one record
fn build_batch(record: &TraceRecord) -> Value {
    let trace_id = Uuid::now_v7().to_string();
    let now = timestamp(SystemTime::now());
    let input = json!({ "text": record.input });

    let (output, level, status_message) = match &record.outcome {
        TraceOutcome::Output(text) => (render_output(text), "DEFAULT", None),
        TraceOutcome::Error(message) => (json!({ "error": message }), "ERROR", Some(message.clone())),
    };

    json!({
        "batch": [
            {
                "id": Uuid::now_v7().to_string(),
                "timestamp": now,
                "type": "trace-create",
                "body": {
                    "id": trace_id,
                    "name": record.name,
                    "timestamp": timestamp(record.started_at),
                    "input": input,
                    "output": output,
                },
            },
            {
                "id": Uuid::now_v7().to_string(),
                "timestamp": now,
                "type": "generation-create",
                "body": {
                    "id": Uuid::now_v7().to_string(),
                    "traceId": trace_id,
                    "name": record.name,
                    "model": record.model,
                    "startTime": timestamp(record.started_at),
                    "endTime": timestamp(record.ended_at()),
                    "input": input,
                    "output": output,
                    "level": level,
                    "statusMessage": status_message,
                },
            },
        ]
    })
}

/// Keep structured output structured; anything else goes in as text
fn render_output(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}
