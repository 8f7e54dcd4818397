//! Per-run backup accounting.
//!
//! Counters are incremented concurrently by the copy workers and snapshotted
//! into serializable outcomes once a folder job finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

use super::filter::CopyMode;

/// Live counters for one engine instance. Safe for concurrent increments
/// from the file-copy workers.
#[derive(Debug, Default)]
pub struct CopyStats {
    files_copied: AtomicU64,
    files_filtered: AtomicU64,
    files_failed: AtomicU64,
    folders_skipped: AtomicU64,
    bytes_copied: AtomicU64,
}

impl CopyStats {
    pub fn record_copied(&self, bytes: u64) {
        self.files_copied.fetch_add(1, Ordering::Relaxed);
        self.bytes_copied.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_filtered(&self) {
        self.files_filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_folder_skipped(&self) {
        self.folders_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CopyCounts {
        CopyCounts {
            files_copied: self.files_copied.load(Ordering::Relaxed),
            files_filtered: self.files_filtered.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            folders_skipped: self.folders_skipped.load(Ordering::Relaxed),
            bytes_copied: self.bytes_copied.load(Ordering::Relaxed),
        }
    }
}

/// Frozen counter values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyCounts {
    pub files_copied: u64,
    pub files_filtered: u64,
    pub files_failed: u64,
    pub folders_skipped: u64,
    pub bytes_copied: u64,
}

impl CopyCounts {
    fn add(&mut self, other: &CopyCounts) {
        self.files_copied += other.files_copied;
        self.files_filtered += other.files_filtered;
        self.files_failed += other.files_failed;
        self.folders_skipped += other.folders_skipped;
        self.bytes_copied += other.bytes_copied;
    }
}

/// Result of one top-level folder job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: CopyMode,
    /// False when the source could not be listed at the top level.
    pub completed: bool,
    pub counts: CopyCounts,
}

/// Summary of a whole backup run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSummary {
    pub backup_name: String,
    pub destination_root: PathBuf,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub folders: Vec<FolderOutcome>,
}

impl BackupSummary {
    pub fn totals(&self) -> CopyCounts {
        let mut totals = CopyCounts::default();
        for folder in &self.folders {
            totals.add(&folder.counts);
        }
        totals
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(counts: CopyCounts) -> FolderOutcome {
        FolderOutcome {
            source: PathBuf::from("/home/jdupont/Documents"),
            destination: PathBuf::from("/mnt/backups/jdupont/Documents"),
            mode: CopyMode::Documents,
            completed: true,
            counts,
        }
    }

    #[test]
    fn stats_snapshot_reflects_recorded_events() {
        let stats = CopyStats::default();
        stats.record_copied(10);
        stats.record_copied(5);
        stats.record_filtered();
        stats.record_failed();
        stats.record_folder_skipped();

        let counts = stats.snapshot();
        assert_eq!(counts.files_copied, 2);
        assert_eq!(counts.bytes_copied, 15);
        assert_eq!(counts.files_filtered, 1);
        assert_eq!(counts.files_failed, 1);
        assert_eq!(counts.folders_skipped, 1);
    }

    #[test]
    fn totals_sum_over_folders() {
        let summary = BackupSummary {
            backup_name: "jdupont".to_string(),
            destination_root: PathBuf::from("/mnt/backups/jdupont"),
            started: Utc::now(),
            finished: Utc::now(),
            folders: vec![
                outcome(CopyCounts {
                    files_copied: 3,
                    bytes_copied: 30,
                    ..Default::default()
                }),
                outcome(CopyCounts {
                    files_copied: 2,
                    files_failed: 1,
                    bytes_copied: 20,
                    ..Default::default()
                }),
            ],
        };

        let totals = summary.totals();
        assert_eq!(totals.files_copied, 5);
        assert_eq!(totals.files_failed, 1);
        assert_eq!(totals.bytes_copied, 50);
    }

    #[test]
    fn summary_round_trips_through_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        let summary = BackupSummary {
            backup_name: "WKSTATION07".to_string(),
            destination_root: PathBuf::from("/mnt/backups/WKSTATION07"),
            started: Utc::now(),
            finished: Utc::now(),
            folders: vec![outcome(CopyCounts::default())],
        };

        summary.save_json(&path).unwrap();
        let parsed: BackupSummary =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.backup_name, "WKSTATION07");
        assert_eq!(parsed.folders.len(), 1);
    }
}
