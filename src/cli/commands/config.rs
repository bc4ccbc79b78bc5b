//! Config command implementation.
//!
//! Shows, locates and initializes the configuration file.

use std::path::PathBuf;

use crate::cli::{Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::{default_config_path, Config};
use crate::error::Result;

/// Run the config command.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_config_path(cli),
        ConfigAction::Init { force } => init_config(cli, *force),
    }
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

/// Show effective configuration, including command-line overrides.
fn show_config(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        _ => print!("{}", config.to_toml()?),
    }

    Ok(())
}

fn show_config_path(cli: &Cli) -> Result<()> {
    println!("{}", config_path(cli)?.display());
    Ok(())
}

/// Write a default configuration file.
fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = config_path(cli)?;

    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use 'metaview config init --force' to overwrite it.");
        return Ok(());
    }

    Config::default().save_to(&path)?;
    if !cli.quiet {
        println!("Created configuration file at: {}", path.display());
    }

    Ok(())
}
