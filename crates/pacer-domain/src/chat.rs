//! Provider-neutral chat completion request types

/// Role of a chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// Instructions that frame the task
    System,

    /// End-user content
    User,

    /// Model output
    Assistant,
}

impl ChatRole {
    /// Get the role name as used by chat completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Author role
    pub role: ChatRole,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,

    /// Ordered conversation
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Content of the last user message, if any
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}
