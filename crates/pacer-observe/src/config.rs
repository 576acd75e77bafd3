//! Configuration for the Langfuse sink

use std::fmt;

/// Default Langfuse host
pub const DEFAULT_HOST: &str = "https://cloud.langfuse.com";

/// Credentials and endpoint for the Langfuse ingestion API
#[derive(Clone, PartialEq)]
pub struct LangfuseConfig {
    /// Project public key (`LANGFUSE_PUBLIC_KEY`)
    pub public_key: String,

    /// Project secret key (`LANGFUSE_SECRET_KEY`)
    pub secret_key: String,

    /// Service host (`LANGFUSE_HOST`)
    pub host: String,
}

impl LangfuseConfig {
    /// Read the configuration from the process environment
    ///
    /// Returns `None` unless both keys are set and non-empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a lookup function
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Some(Self {
            public_key: non_empty("LANGFUSE_PUBLIC_KEY")?,
            secret_key: non_empty("LANGFUSE_SECRET_KEY")?,
            host: non_empty("LANGFUSE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        })
    }

    /// Override the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Full URL of the batch ingestion endpoint
    pub fn ingestion_url(&self) -> String {
        format!("{}/api/public/ingestion", self.host.trim_end_matches('/'))
    }
}

impl fmt::Debug for LangfuseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LangfuseConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}
