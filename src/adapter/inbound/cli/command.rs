//! Command-line interface definitions.
//!
//! Defines the CLI structure for dropgate using `clap`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Route dropped files by rule and live venue account state
#[derive(Parser, Debug)]
#[command(name = "dropgate")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the inbound directory and route files (foreground)
    Run(RunArgs),

    /// Validate configuration without starting the watcher
    Check(CheckArgs),
}

/// Arguments for `dropgate run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Route files already present in the inbound directory at startup
    #[arg(long)]
    pub sweep_existing: bool,
}

/// Arguments for `dropgate check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Also query every configured account once
    #[arg(long)]
    pub connect: bool,
}
