//! # deskvault
//!
//! Workstation profile backup to a network share.
//!
//! deskvault mirrors a fixed set of per-user folders (Desktop, Documents,
//! Downloads) into a per-user directory on a network share. Desktop-like
//! sources keep their subfolder structure; documents-like sources are
//! flattened. Files are filtered by extension and copied in parallel.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deskvault::backup::{CopyEngine, CopyMode};
//! use std::path::Path;
//!
//! let engine = CopyEngine::new();
//! let ok = engine.copy_folder(
//!     Path::new("/home/jdupont/Desktop"),
//!     Path::new("/mnt/backups/jdupont/Desktop"),
//!     CopyMode::Desktop,
//! );
//! assert!(ok);
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod share;
pub mod user;

// Re-export commonly used types
pub use backup::{BackupSummary, CopyEngine, CopyMode, Orchestrator};
pub use config::Config;
pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
