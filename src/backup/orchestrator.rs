//! Runs the three fixed folder jobs against the share.
//!
//! Identity resolution and share reachability gate the run; after that the
//! jobs are independent. A failed folder is recorded and logged, never
//! retried, and never cancels its siblings.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::naming;
use crate::share::ShareMount;
use crate::user::UserContext;

use super::engine::CopyEngine;
use super::filter::CopyMode;
use super::report::{BackupSummary, FolderOutcome};

/// One top-level (source, destination, mode) backup unit.
#[derive(Debug, Clone)]
struct FolderJob {
    source: PathBuf,
    destination: PathBuf,
    mode: CopyMode,
}

pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolve the backup identity from the environment, then run.
    pub async fn run(&self) -> Result<BackupSummary> {
        let ctx = UserContext::resolve(&self.config.backup)?;
        self.run_for_user(&ctx).await
    }

    /// Run the three folder jobs for an already-resolved identity.
    pub async fn run_for_user(&self, ctx: &UserContext) -> Result<BackupSummary> {
        info!("Starting backup for {}", ctx.backup_name);
        let started = Utc::now();

        let share = ShareMount::from_config(&self.config.share);
        share.connect(share.root())?;

        let destination_root =
            naming::unique_folder_name(&share.root().join(&ctx.backup_name));
        let jobs = folder_jobs(ctx, &destination_root);

        let workers = self.config.backup.file_workers;
        let mut handles = Vec::with_capacity(jobs.len());
        for job in jobs {
            handles.push(task::spawn_blocking(move || run_job(job, workers)));
        }

        let mut folders = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(outcome) => folders.push(outcome),
                Err(e) => error!("Folder job aborted: {}", e),
            }
        }

        let summary = BackupSummary {
            backup_name: ctx.backup_name.clone(),
            destination_root,
            started,
            finished: Utc::now(),
            folders,
        };

        let totals = summary.totals();
        info!(
            "Backup finished: {} files copied, {} failed, {} filtered out",
            totals.files_copied, totals.files_failed, totals.files_filtered
        );
        Ok(summary)
    }
}

fn folder_jobs(ctx: &UserContext, destination_root: &Path) -> Vec<FolderJob> {
    vec![
        FolderJob {
            source: ctx.subfolder("Desktop"),
            destination: destination_root.join("Desktop"),
            mode: CopyMode::Desktop,
        },
        FolderJob {
            source: ctx.subfolder("Documents"),
            destination: destination_root.join("Documents"),
            mode: CopyMode::Documents,
        },
        FolderJob {
            source: ctx.subfolder("Downloads"),
            destination: destination_root.join("Downloads"),
            mode: CopyMode::Documents,
        },
    ]
}

fn run_job(job: FolderJob, workers: usize) -> FolderOutcome {
    let engine = CopyEngine::with_workers(workers);
    let completed = engine.copy_folder(&job.source, &job.destination, job.mode);
    if !completed {
        error!("Backup of {} did not complete", job.source.display());
    }

    FolderOutcome {
        source: job.source,
        destination: job.destination,
        mode: job.mode,
        completed,
        counts: engine.stats().snapshot(),
    }
}
