//! Pacer Domain Layer
//!
//! This crate contains the domain model for Pacer, the half-marathon finish-time
//! predictor. It has ZERO external dependencies and defines the value objects and
//! trait interfaces that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Sex**: The runner's sex, carried on the wire as a single-letter code
//! - **RunnerProfile**: A complete `{sex, age, pace}` record ready for prediction
//! - **PredictionRow**: The single-row tabular record the regression artifact scores
//! - **ChatRequest**: A provider-neutral chat completion request
//! - **TraceRecord**: One observed extraction call, handed to a trace sink
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod profile;
pub mod row;
pub mod trace;
pub mod traits;

// Re-exports for convenience
pub use chat::{ChatMessage, ChatRequest, ChatRole};
pub use profile::{RunnerProfile, Sex};
pub use row::{Cell, PredictionRow, AGE_COLUMN, PACE_COLUMN, PREDICTION_COLUMN, SEX_COLUMN};
pub use trace::{TraceOutcome, TraceRecord};
pub use traits::{FinishTimePredictor, LlmProvider, TraceSink};
