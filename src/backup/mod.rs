//! Backup module providing the folder-copy engine and run orchestration.

pub mod engine;
pub mod filter;
pub mod orchestrator;
pub mod report;

// Re-export main types
pub use engine::CopyEngine;
pub use filter::CopyMode;
pub use orchestrator::Orchestrator;
pub use report::{BackupSummary, CopyCounts, FolderOutcome};
