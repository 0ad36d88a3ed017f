//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MountCfg CLI
#[derive(Parser, Debug)]
#[command(name = "mountcfgctl")]
#[command(version, about = "Mount firmware configuration resolver", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file without printing the namespace
    Validate {
        /// Configuration file (.h header dialect or flat TOML)
        file: PathBuf,

        /// Drop unrecognized options with a warning instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Resolve a configuration file and print the flat constant namespace
    Resolve {
        /// Configuration file (.h header dialect or flat TOML)
        file: PathBuf,

        /// Drop unrecognized options with a warning instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// List the known boards and their pin tables
    Boards,

    /// Print the extended defaults layer
    Defaults,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
