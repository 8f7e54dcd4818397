//! Command-line interface for deskvault.

use clap::{Parser, Subcommand};

pub mod check;
pub mod run;

/// deskvault - workstation profile backup to a network share
#[derive(Parser)]
#[command(name = "deskvault")]
#[command(about = "Back up user profile folders to a network share")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the backup
    Run(run::RunArgs),
    /// Resolve the backup identity and probe the share without copying
    Check(check::CheckArgs),
}
