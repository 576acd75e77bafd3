//! Pacer Extractor
//!
//! Turns a free-text self-description into a structured `{sex, age, pace}`
//! record by asking a chat model to act as the parser.
//!
//! # Overview
//!
//! The extractor sends a fixed few-shot instruction plus the user's text to the
//! language model and parses the reply strictly as one JSON object with exactly
//! the keys `sex`, `age` and `pace`. Anything else (prose, code fences, extra
//! keys, numbers sent as strings) is a failure, not something to salvage.
//!
//! # Architecture
//!
//! ```text
//! Text → FieldExtractor → LLM → strict parser → ExtractionResult
//!                  └──────────→ TraceSink (best-effort)
//! ```
//!
//! # Failure semantics
//!
//! `extract` never returns `Err` and never panics across its boundary: provider
//! errors and malformed replies become `ExtractionResult::Failed`. A reply that
//! parses but leaves fields empty is `Parsed` and simply not complete.
//!
//! # Example Usage
//!
//! ```no_run
//! use pacer_extractor::{ExtractionRequest, ExtractorConfig, FieldExtractor};
//! use pacer_llm::MockProvider;
//! use pacer_observe::RecordingSink;
//!
//! # async fn example() {
//! let llm = MockProvider::new(r#"{"sex": "M", "age": 37, "pace": 5.23}"#);
//! let extractor = FieldExtractor::new(llm, RecordingSink::new(), ExtractorConfig::default());
//!
//! let result = extractor
//!     .extract(ExtractionRequest::new("I am a man, 37 years old, 5km pace 5.23 min/km"))
//!     .await;
//!
//! if let Some(profile) = result.complete() {
//!     println!("{} years, {} min/km", profile.age, profile.pace_per_km);
//! }
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{FieldExtractor, SPAN_NAME};
pub use parser::{parse_fields, AGE_KEY, PACE_KEY, SEX_KEY};
pub use prompt::PromptBuilder;
pub use types::{ExtractedFields, ExtractionRequest, ExtractionResult};
