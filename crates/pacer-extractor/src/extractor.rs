//! Core Field Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_fields;
use crate::prompt::PromptBuilder;
use crate::types::{ExtractedFields, ExtractionRequest, ExtractionResult};
use pacer_domain::{ChatRequest, LlmProvider, TraceOutcome, TraceRecord, TraceSink};
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tracing::{debug, info, warn};

/// Span name recorded for every extraction call
pub const SPAN_NAME: &str = "extract_fields";

/// Extracts `{sex, age, pace}` from free text via a chat model
///
/// The provider and the trace sink are built once by the caller and shared
/// read-only for the lifetime of the extractor.
pub struct FieldExtractor<L, S>
where
    L: LlmProvider,
    S: TraceSink,
{
    llm_provider: Arc<L>,
    sink: Arc<S>,
    config: ExtractorConfig,
}

impl<L, S> FieldExtractor<L, S>
where
    L: LlmProvider + Send + Sync + 'static,
    S: TraceSink + Send + Sync + 'static,
    L::Error: Display,
    S::Error: Display,
{
    /// Create a new FieldExtractor
    pub fn new(llm_provider: L, sink: S, config: ExtractorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            sink: Arc::new(sink),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract fields from text
    ///
    /// Never fails: every error is folded into `ExtractionResult::Failed`.
    /// The blocking provider call runs on tokio's blocking pool. The trace is
    /// recorded in a separate task after the result is settled, so nothing the
    /// sink does can change it.
    pub async fn extract(&self, request: ExtractionRequest) -> ExtractionResult {
        let llm = Arc::clone(&self.llm_provider);
        let config = self.config.clone();

        let task = tokio::task::spawn_blocking(move || run_extraction(llm.as_ref(), &config, request));
        let (result, record) = match task.await {
            Ok(done) => done,
            Err(e) => {
                let error = ExtractorError::Task(e.to_string());
                warn!("{}", error);
                return ExtractionResult::failed(error.to_string());
            }
        };

        let sink = Arc::clone(&self.sink);
        let trace = tokio::task::spawn_blocking(move || record_trace(sink.as_ref(), &record));
        if let Err(e) = trace.await {
            warn!("Trace task failed: {}", e);
        }

        result
    }

    /// Extract fields from text with a specific model
    pub async fn extract_with_model(
        &self,
        text: impl Into<String>,
        model: impl Into<String>,
    ) -> ExtractionResult {
        self.extract(ExtractionRequest::new(text).with_model(model)).await
    }

    /// Extract fields from text on the current thread
    ///
    /// For callers outside an async runtime. Same contract as `extract`,
    /// except that a panicking provider or sink unwinds into the caller.
    pub fn extract_blocking(&self, request: ExtractionRequest) -> ExtractionResult {
        let (result, record) = run_extraction(self.llm_provider.as_ref(), &self.config, request);
        record_trace(self.sink.as_ref(), &record);
        result
    }
}

/// One extraction plus the trace record describing it
fn run_extraction<L>(
    llm: &L,
    config: &ExtractorConfig,
    request: ExtractionRequest,
) -> (ExtractionResult, TraceRecord)
where
    L: LlmProvider,
    L::Error: Display,
{
    let model = request.model.unwrap_or_else(|| config.model.clone());

    info!(
        "Starting extraction with model '{}', text length {}",
        model,
        request.text.len()
    );

    let started_at = SystemTime::now();
    let clock = Instant::now();
    let result = match extract_fields(llm, config, &model, &request.text) {
        Ok(fields) => ExtractionResult::Parsed(fields),
        Err(e) => {
            warn!("Extraction failed: {}", e);
            ExtractionResult::failed(e.to_string())
        }
    };
    let duration = clock.elapsed();

    info!(
        "Extraction finished in {} ms (complete: {})",
        duration.as_millis(),
        result.complete().is_some()
    );

    let outcome = match result.error() {
        Some(error) => TraceOutcome::Error(error.to_string()),
        None => TraceOutcome::Output(result.to_json().to_string()),
    };
    let record = TraceRecord {
        name: SPAN_NAME.to_string(),
        model,
        input: request.text,
        outcome,
        started_at,
        duration,
    };

    (result, record)
}

/// Hand the record to the sink; failures are only logged
fn record_trace<S>(sink: &S, record: &TraceRecord)
where
    S: TraceSink,
    S::Error: Display,
{
    if let Err(e) = sink.record(record) {
        warn!("Failed to record trace: {}", e);
    }
}

/// Call the model and parse its reply
fn extract_fields<L>(
    llm: &L,
    config: &ExtractorConfig,
    model: &str,
    text: &str,
) -> Result<ExtractedFields, ExtractorError>
where
    L: LlmProvider,
    L::Error: Display,
{
    let request = ChatRequest {
        model: model.to_string(),
        messages: PromptBuilder::new(text).build(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let reply = llm
        .complete(&request)
        .map_err(|e| ExtractorError::Provider(e.to_string()))?;

    debug!("LLM response length: {} chars", reply.len());

    parse_fields(&reply)
}
