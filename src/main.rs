//! deskvault - workstation profile backup to a network share
//!
//! Main binary entry point for the command-line interface.

use clap::Parser;
use deskvault::cli::{Cli, Commands};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    deskvault::logging::init_logging(cli.verbose)?;

    let start = std::time::Instant::now();
    let result = match cli.command {
        Commands::Run(args) => deskvault::cli::run::run(args).await,
        Commands::Check(args) => deskvault::cli::check::run(args).await,
    };

    info!("Total run time: {:.2}s", start.elapsed().as_secs_f64());
    result
}
