//! OpenAI API key resolution.

use crate::error::{CliError, Result};
use std::io;
use tracing::debug;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Resolve the API key from the environment, else prompt once without echo.
pub fn api_key() -> Result<String> {
    resolve_api_key(
        |key| std::env::var(key).ok(),
        || rpassword::prompt_password("OpenAI API key: "),
    )
}

/// Resolve the API key through a lookup, falling back to a prompt.
///
/// An empty environment value counts as absent. An empty prompt answer is a
/// credential error: nothing can be done without a key.
pub fn resolve_api_key<F, P>(lookup: F, prompt: P) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
    P: FnOnce() -> io::Result<String>,
{
    if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
        debug!("Using API key from {}", API_KEY_VAR);
        return Ok(key.trim().to_string());
    }

    let entered = prompt()
        .map_err(|e| CliError::Credential(format!("Failed to read API key: {}", e)))?;
    let entered = entered.trim();
    if entered.is_empty() {
        return Err(CliError::Credential(format!(
            "No API key provided. Set {} or enter a key when prompted.",
            API_KEY_VAR
        )));
    }

    Ok(entered.to_string())
}
