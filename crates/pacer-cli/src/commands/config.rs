//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `config` is the effective configuration, command line overrides included.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init { force } => init_config(path, force, formatter),
    }
}

/// Print the effective configuration.
fn show_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
        );
        return Ok(());
    }

    Config::default().save_to(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}
