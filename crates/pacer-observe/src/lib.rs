//! Pacer Observability
//!
//! Trace sinks that record each extraction call: its inputs, outputs and timing.
//!
//! # Overview
//!
//! Recording is best-effort. A sink that fails returns an error, and the caller
//! logs it and carries on; a trace never changes what the traced call returns.
//!
//! # Sinks
//!
//! - `LangfuseSink`: Sends each record to the Langfuse ingestion API
//! - `RecordingSink`: Keeps records in memory (tests and dry runs)
//!
//! A disabled sink is simply `None`: `Option<S>` implements `TraceSink` for any
//! sink `S` and records nothing when empty.
//!
//! # Configuration
//!
//! ```
//! use pacer_observe::LangfuseConfig;
//!
//! let config = LangfuseConfig::from_lookup(|key| match key {
//!     "LANGFUSE_PUBLIC_KEY" => Some("pk-lf-123".to_string()),
//!     "LANGFUSE_SECRET_KEY" => Some("sk-lf-456".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.host, "https://cloud.langfuse.com");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod langfuse;
mod recording;

pub use config::{LangfuseConfig, DEFAULT_HOST};
pub use error::TraceError;
pub use langfuse::LangfuseSink;
pub use recording::RecordingSink;
