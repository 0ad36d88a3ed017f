//! Command execution handlers

use anyhow::{Context, Result};
use clap::CommandFactory;
use colored::*;
use std::path::Path;

use mountcfg_core::{resolve_with, Layer, Strictness};

use super::commands::{Cli, OutputFormat};

/// Load a user layer from a configuration file.
pub fn load_layer(path: &Path) -> Result<Layer> {
    Layer::from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn strictness(lenient: bool) -> Strictness {
    if lenient {
        Strictness::Lenient
    } else {
        Strictness::Strict
    }
}

/// Handle the validate command
pub fn handle_validate(file: &Path, lenient: bool, format: &OutputFormat) -> Result<()> {
    let user = load_layer(file)?;
    let config = resolve_with(&user, strictness(lenient))
        .with_context(|| format!("Configuration {} failed validation", file.display()))?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "valid": true,
                    "file": file.display().to_string(),
                    "pinmap": config.pinmap,
                    "file_version": config.file_version,
                }))?
            );
        }
        OutputFormat::Table => {
            println!("{} {}", "OK".green().bold(), file.display());
            println!("{}", crate::format::format_summary(&config));
        }
    }

    Ok(())
}

/// Handle the resolve command
pub fn handle_resolve(file: &Path, lenient: bool, format: &OutputFormat) -> Result<()> {
    let user = load_layer(file)?;
    let config = resolve_with(&user, strictness(lenient))
        .with_context(|| format!("Configuration {} failed to resolve", file.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Table => {
            println!("{}", crate::format::format_namespace(&config));
        }
    }

    Ok(())
}

/// Handle the boards command
pub fn handle_boards(format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let tables: Vec<_> = mountcfg_core::Pinmap::ALL
                .iter()
                .map(|b| b.pin_table())
                .collect();
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
        OutputFormat::Table => {
            println!("{}", crate::format::format_boards());
        }
    }

    Ok(())
}

/// Handle the defaults command
pub fn handle_defaults(format: &OutputFormat) -> Result<()> {
    let defaults = mountcfg_core::extended_layer();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&defaults)?);
        }
        OutputFormat::Table => {
            println!("{}", crate::format::format_layer(&defaults));
        }
    }

    Ok(())
}

/// Generate shell completion scripts
pub fn generate_completion(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
