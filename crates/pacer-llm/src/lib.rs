//! Pacer LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `pacer-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use pacer_llm::MockProvider;
//! use pacer_domain::{ChatMessage, ChatRequest, LlmProvider};
//!
//! let provider = MockProvider::new(r#"{"sex":"M","age":37,"pace":5.23}"#);
//! let request = ChatRequest {
//!     model: "gpt-4o".to_string(),
//!     messages: vec![ChatMessage::user("hej")],
//!     temperature: 0.2,
//!     max_tokens: 300,
//! };
//! let reply = provider.complete(&request).unwrap();
//! assert!(reply.contains("5.23"));
//! ```

#![warn(missing_docs)]

pub mod openai;

use pacer_domain::{ChatRequest, LlmProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use openai::{OpenAiProvider, DEFAULT_BASE_URL};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success HTTP status from the provider
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body as returned by the provider
        body: String,
    },

    /// The provider rejected the credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls. Replies can
/// be keyed by the content of the last user message.
///
/// # Examples
///
/// ```
/// use pacer_llm::MockProvider;
/// use pacer_domain::{ChatMessage, ChatRequest, LlmProvider};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("hello", "{}");
/// provider.add_error("slow", "timeout");
///
/// let request = |text: &str| ChatRequest {
///     model: "m".to_string(),
///     messages: vec![ChatMessage::user(text)],
///     temperature: 0.2,
///     max_tokens: 300,
/// };
///
/// assert_eq!(provider.complete(&request("hello")).unwrap(), "{}");
/// assert!(provider.complete(&request("slow")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<ChatRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider that fails every request with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Error(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given user message
    pub fn add_response(&mut self, user_text: impl Into<String>, response: impl Into<String>) {
        lock(&self.replies).insert(user_text.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific user message
    pub fn add_error(&mut self, user_text: impl Into<String>, message: impl Into<String>) {
        lock(&self.replies).insert(user_text.into(), MockReply::Error(message.into()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request received
    pub fn last_request(&self) -> Option<ChatRequest> {
        lock(&self.last_request).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        let reply = request
            .last_user_content()
            .and_then(|text| lock(&self.replies).get(text).cloned())
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
