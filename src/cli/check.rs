//! Pre-flight check command: shows what a run would use, copies nothing.

use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::share::ShareMount;
use crate::user::{UserContext, EXPECTED_SUBFOLDERS};

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Use a specific config file instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the check command
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let ctx = UserContext::resolve(&config.backup)?;
    println!("Backup identity: {}", ctx.backup_name);
    println!("Account: {}", ctx.account_name);
    println!("Profile: {}", ctx.profile.display());
    for name in EXPECTED_SUBFOLDERS {
        let status = if ctx.subfolder(name).exists() {
            "present"
        } else {
            "missing"
        };
        println!("  {}: {}", name, status);
    }

    let share = ShareMount::from_config(&config.share);
    println!("Share root: {}", share.root().display());
    println!(
        "Credentials: {}",
        if share.has_credentials() {
            "supplied"
        } else {
            "none"
        }
    );

    match share.connect(share.root()) {
        Ok(()) => println!("Share reachable"),
        Err(e) => println!("Share check failed: {}", e),
    }

    Ok(())
}
