//! Pacer CLI - predict a half-marathon finish time from a self-description.

use anyhow::Context;
use clap::Parser;
use pacer_cli::cli::TextArgs;
use pacer_cli::commands;
use pacer_cli::repl;
use pacer_cli::services;
use pacer_cli::{Cli, CliError, Command, Config, Formatter};
use std::io::Read;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // .env first so RUST_LOG and the API keys in it apply
    let dotenv = dotenvy::dotenv();
    init_logging(cli.verbose);
    if let Err(e) = dotenv {
        debug!("No .env loaded: {}", e);
    }

    // Load or create config
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = if config_path.exists() {
        Config::load_from(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        let cfg = Config::default();
        if let Err(e) = cfg.save_to(&config_path) {
            warn!("Could not write default config to {}: {}", config_path.display(), e);
        }
        cfg
    };

    // Command line overrides
    if let Some(model) = cli.model {
        config.extractor = config.extractor.with_model(model);
    }
    if let Some(artifact) = cli.artifact {
        config.predictor.artifact_path = artifact;
    }
    config.validate()?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
        Some(Command::Extract(args)) => {
            let text = read_text(&args)?;
            let extractor = services::build_extractor(&config).await?;
            commands::execute_extract(&text, &extractor, &formatter).await?;
        }
        Some(Command::Predict(args)) => {
            let text = read_text(&args)?;
            let predictor = services::load_predictor(&config)?;
            let extractor = services::build_extractor(&config).await?;
            commands::execute_predict(&text, &extractor, &predictor, &formatter).await?;
        }
        None | Some(Command::Repl) => {
            let predictor = services::load_predictor(&config)?;
            let extractor = services::build_extractor(&config).await?;
            repl::run_repl(&extractor, &predictor, &config.settings, &formatter).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Log to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn read_text(args: &TextArgs) -> Result<String, CliError> {
    if !args.stdin {
        return Ok(args.joined());
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}
