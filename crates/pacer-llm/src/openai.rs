//! OpenAI Provider Implementation
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint.
//!
//! # Features
//!
//! - Blocking HTTP communication (callers run it off the async runtime)
//! - Configurable base URL, so compatible gateways work too
//! - Timeout handling
//!
//! No retries are attempted: a failed call is reported once and the caller
//! decides what to do with it.
//!
//! # Examples
//!
//! ```no_run
//! use pacer_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("https://api.openai.com/v1", "sk-...").unwrap();
//! ```

use crate::LlmError;
use pacer_domain::{ChatRequest, LlmProvider};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Chat completions provider for the OpenAI API
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API base (e.g., "https://api.openai.com/v1")
    /// - `api_key`: Bearer credential
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Communication` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new provider with an explicit request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Run a chat completion
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The network call fails or times out
    /// - The provider answers with a non-success status
    /// - The response has no choices or no text content
    pub fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let body = build_request_body(request);

        debug!(
            "POST {} (model {}, {} messages)",
            self.completions_url(),
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(error_for_status(status, text));
        }

        let parsed: CompletionResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_choice_content(parsed)
    }
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    fn complete(&self, request: &ChatRequest) -> Result<String, Self::Error> {
        self.chat(request)
    }
}

fn build_request_body(request: &ChatRequest) -> CompletionRequest<'_> {
    CompletionRequest {
        model: &request.model,
        messages: request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

fn first_choice_content(response: CompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| LlmError::InvalidResponse("First choice has no text content".to_string()))
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(e.to_string())
    } else {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

fn error_for_status(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication(body),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_domain::ChatMessage;

    fn sample_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("hej")],
            temperature: 0.2,
            max_tokens: 300,
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("https://api.openai.com/v1/", "sk-test").unwrap();
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = OpenAiProvider::new(DEFAULT_BASE_URL, "sk-secret").unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_request_body_shape() {
        let request = sample_request();
        let body = serde_json::to_value(build_request_body(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 300);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hej");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_first_choice_content() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"{\"age\":37}"}},
                           {"message":{"role":"assistant","content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_content(response).unwrap(), r#"{"age":37}"#);
    }

    #[test]
    fn test_no_choices_is_invalid_response() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice_content(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_null_content_is_invalid_response() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(
            first_choice_content(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, "bad key".to_string()),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            LlmError::RateLimitExceeded
        ));

        let err = error_for_status(StatusCode::BAD_GATEWAY, "upstream".to_string());
        assert!(matches!(err, LlmError::Http { status: 502, .. }));
        assert_eq!(err.to_string(), "HTTP 502: upstream");
    }

    #[test]
    fn test_error_handling() {
        // Use invalid endpoint to trigger error
        let provider = OpenAiProvider::new("http://localhost:99999", "sk-test").unwrap();

        let result = provider.complete(&sample_request());
        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }

    // Integration test (requires network and a real key)
    #[test]
    #[ignore]
    fn test_openai_integration() {
        let key = std::env::var("OPENAI_API_KEY").unwrap();
        let provider = OpenAiProvider::new(DEFAULT_BASE_URL, key).unwrap();
        let reply = provider.complete(&sample_request()).unwrap();
        assert!(!reply.is_empty());
    }
}
