//! Startup wiring: the provider, the trace sink and the regression model.

use crate::config::Config;
use crate::credentials::{self, BASE_URL_VAR};
use anyhow::{Context, Result};
use pacer_extractor::FieldExtractor;
use pacer_llm::{OpenAiProvider, DEFAULT_BASE_URL};
use pacer_observe::{LangfuseConfig, LangfuseSink};
use pacer_predictor::LinearPipeline;
use tracing::{info, warn};

/// The extractor used by the binary.
pub type AppExtractor = FieldExtractor<OpenAiProvider, Option<LangfuseSink>>;

/// Build the extractor, resolving the API key.
///
/// The blocking HTTP clients refuse to start inside the async runtime, so the
/// whole construction runs on the blocking pool.
pub async fn build_extractor(config: &Config) -> Result<AppExtractor> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || connect(&config))
        .await
        .context("Extractor setup task failed")?
}

fn connect(config: &Config) -> Result<AppExtractor> {
    let api_key = credentials::api_key()?;
    let base_url = std::env::var(BASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let provider = OpenAiProvider::new(&base_url, api_key)
        .with_context(|| format!("Failed to create provider for {}", base_url))?;
    info!("Using chat endpoint {}", provider.completions_url());

    let sink = build_sink(config)?;

    Ok(FieldExtractor::new(provider, sink, config.extractor.clone()))
}

/// Build the Langfuse sink, or `None` when tracing is off or unconfigured.
fn build_sink(config: &Config) -> Result<Option<LangfuseSink>> {
    if !config.langfuse.enabled {
        info!("Tracing disabled in configuration");
        return Ok(None);
    }

    let Some(mut langfuse) = LangfuseConfig::from_env() else {
        warn!("LANGFUSE_PUBLIC_KEY or LANGFUSE_SECRET_KEY not set; tracing disabled");
        return Ok(None);
    };
    if let Some(host) = &config.langfuse.host {
        langfuse = langfuse.with_host(host.clone());
    }

    info!("Recording traces to {}", langfuse.host);
    let sink = LangfuseSink::new(langfuse).context("Failed to create Langfuse sink")?;
    Ok(Some(sink))
}

/// Load the regression model named by the configuration.
pub fn load_predictor(config: &Config) -> Result<LinearPipeline> {
    let path = &config.predictor.artifact_path;
    LinearPipeline::load(path)
        .with_context(|| format!("Failed to load regression model from {}", path.display()))
}
