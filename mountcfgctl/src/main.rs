//! MountCfg CLI
//!
//! Command-line tool for validating and resolving mount controller firmware
//! configurations before a build.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mountcfgctl::cli::{
    generate_completion, handle_boards, handle_defaults, handle_resolve, handle_validate, Cli,
    Commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate { ref file, lenient } => handle_validate(file, lenient, &cli.format),
        Commands::Resolve { ref file, lenient } => handle_resolve(file, lenient, &cli.format),
        Commands::Boards => handle_boards(&cli.format),
        Commands::Defaults => handle_defaults(&cli.format),
        Commands::Completion { shell } => {
            generate_completion(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
