//! Core folder-copy engine: recursive traversal with bounded parallel file
//! copies.
//!
//! Recursion into subfolders is synchronous and depth-first so that a
//! destination directory always exists before anything is copied into it.
//! Only the file copies collected at each directory level fan out onto a
//! bounded worker pool.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::filter::{self, CopyMode};
use super::report::CopyStats;

/// Concurrent file copies per directory level.
pub const DEFAULT_FILE_WORKERS: usize = 4;

/// One (source file, destination file) copy unit. Created during traversal,
/// discarded after the level's dispatch.
#[derive(Debug, Clone)]
struct FileTask {
    source: PathBuf,
    destination: PathBuf,
}

/// Folder-copy engine. One instance per top-level folder job; the counters
/// accumulate across the whole recursion.
#[derive(Debug)]
pub struct CopyEngine {
    file_workers: usize,
    stats: CopyStats,
}

impl Default for CopyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyEngine {
    pub fn new() -> Self {
        Self::with_workers(DEFAULT_FILE_WORKERS)
    }

    pub fn with_workers(file_workers: usize) -> Self {
        Self {
            file_workers: file_workers.max(1),
            stats: CopyStats::default(),
        }
    }

    pub fn stats(&self) -> &CopyStats {
        &self.stats
    }

    /// Copy the eligible contents of `src` into `dest` under the given mode.
    ///
    /// Returns false when this directory could not be listed or created.
    /// Individual file failures are logged and counted but do not fail the
    /// folder, and a failed subfolder does not fail its parent.
    pub fn copy_folder(&self, src: &Path, dest: &Path, mode: CopyMode) -> bool {
        match self.copy_level(src, dest, mode) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to copy folder {}: {}", src.display(), e);
                false
            }
        }
    }

    fn copy_level(&self, src: &Path, dest: &Path, mode: CopyMode) -> io::Result<()> {
        fs::create_dir_all(dest)?;

        let mut tasks: Vec<FileTask> = Vec::new();
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if filter::is_ignored(&name) {
                continue;
            }

            let destination = dest.join(&name);
            if entry.file_type()?.is_dir() {
                if mode.recurse_into_subfolders() {
                    // Depth-first: the subfolder is fully handled before the
                    // rest of this level is dispatched.
                    self.copy_folder(&entry.path(), &destination, mode);
                } else {
                    info!("Skipping subfolder in flat copy: {}", name);
                    self.stats.record_folder_skipped();
                }
                continue;
            }

            tasks.push(FileTask {
                source: entry.path(),
                destination,
            });
        }

        self.dispatch_file_tasks(tasks, mode);
        Ok(())
    }

    /// Fan the level's file tasks out onto a fresh bounded pool. Each level
    /// builds its own pool, so peak concurrency scales with tree shape rather
    /// than being capped globally.
    fn dispatch_file_tasks(&self, tasks: Vec<FileTask>, mode: CopyMode) {
        if tasks.is_empty() {
            return;
        }

        let pool = match ThreadPoolBuilder::new()
            .num_threads(self.file_workers)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Thread pool unavailable ({}), copying serially", e);
                for task in &tasks {
                    self.copy_file(task, mode);
                }
                return;
            }
        };

        pool.install(|| {
            tasks.par_iter().for_each(|task| {
                self.copy_file(task, mode);
            });
        });
    }

    /// Copy one file if its extension is allowed. Never propagates a failure
    /// past this boundary.
    fn copy_file(&self, task: &FileTask, mode: CopyMode) -> bool {
        if !mode.allows(&task.source) {
            self.stats.record_filtered();
            return false;
        }

        match copy_file_with_times(&task.source, &task.destination) {
            Ok(bytes) => {
                self.stats.record_copied(bytes);
                info!("Copied {}", task.source.display());
                true
            }
            Err(e) => {
                warn!("Failed to copy {}: {}", task.source.display(), e);
                self.stats.record_failed();
                false
            }
        }
    }
}

/// `fs::copy` carries contents and permissions; the source's modification
/// time is restored on the destination afterwards.
fn copy_file_with_times(source: &Path, destination: &Path) -> io::Result<u64> {
    let bytes = fs::copy(source, destination)?;

    let metadata = fs::metadata(source)?;
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(destination, mtime)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn desktop_mode_mirrors_structure_and_filters_extensions() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Desktop");
        let dest = tmp.path().join("backup");

        write(&src.join("a.pdf"), "pdf");
        write(&src.join("b.exe"), "exe");
        write(&src.join("AppData").join("x.txt"), "hidden");
        write(&src.join("Projects").join("c.docx"), "doc");

        let engine = CopyEngine::new();
        assert!(engine.copy_folder(&src, &dest, CopyMode::Desktop));

        assert!(dest.join("a.pdf").exists());
        assert!(dest.join("Projects").join("c.docx").exists());
        assert!(!dest.join("b.exe").exists());
        assert!(!dest.join("AppData").exists());

        let counts = engine.stats().snapshot();
        assert_eq!(counts.files_copied, 2);
        assert_eq!(counts.files_filtered, 1);
        assert_eq!(counts.files_failed, 0);
    }

    #[test]
    fn documents_mode_flattens_and_logs_skipped_subfolders() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("Documents");
        let dest = tmp.path().join("backup");

        write(&src.join("report.docx"), "report");
        write(&src.join("Archive").join("old.xls"), "old");

        let engine = CopyEngine::new();
        assert!(engine.copy_folder(&src, &dest, CopyMode::Documents));

        assert!(dest.join("report.docx").exists());
        assert!(!dest.join("Archive").exists());

        let counts = engine.stats().snapshot();
        assert_eq!(counts.files_copied, 1);
        assert_eq!(counts.folders_skipped, 1);
    }

    #[test]
    fn ignored_folders_are_never_visited_in_either_mode() {
        for mode in [CopyMode::Desktop, CopyMode::Documents] {
            let tmp = TempDir::new().unwrap();
            let src = tmp.path().join("src");
            let dest = tmp.path().join("dest");

            write(&src.join("keep.txt"), "keep");
            write(&src.join("Ma musique").join("song.txt"), "nope");
            write(&src.join("Local Settings").join("cache.doc"), "nope");

            let engine = CopyEngine::new();
            assert!(engine.copy_folder(&src, &dest, mode));

            assert!(dest.join("keep.txt").exists());
            assert!(!dest.join("Ma musique").exists());
            assert!(!dest.join("Local Settings").exists());
        }
    }

    #[test]
    fn pre_existing_destination_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("dest");

        write(&src.join("notes.txt"), "v2");
        fs::create_dir_all(&dest).unwrap();
        write(&dest.join("notes.txt"), "v1");

        let engine = CopyEngine::new();
        assert!(engine.copy_folder(&src, &dest, CopyMode::Documents));
        assert_eq!(fs::read_to_string(dest.join("notes.txt")).unwrap(), "v2");
    }

    #[test]
    fn missing_source_fails_the_folder_without_panicking() {
        let tmp = TempDir::new().unwrap();
        let engine = CopyEngine::new();

        let ok = engine.copy_folder(
            &tmp.path().join("does-not-exist"),
            &tmp.path().join("dest"),
            CopyMode::Desktop,
        );
        assert!(!ok);
    }

    #[test]
    fn one_failing_file_does_not_fail_the_folder() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("dest");

        for name in ["a.docx", "b.docx", "c.docx", "d.docx", "e.docx"] {
            write(&src.join(name), name);
        }
        // A directory squatting on the destination path makes that one copy
        // fail while its siblings go through.
        fs::create_dir_all(dest.join("c.docx")).unwrap();

        let engine = CopyEngine::new();
        assert!(engine.copy_folder(&src, &dest, CopyMode::Documents));

        let counts = engine.stats().snapshot();
        assert_eq!(counts.files_copied, 4);
        assert_eq!(counts.files_failed, 1);
        for name in ["a.docx", "b.docx", "d.docx", "e.docx"] {
            assert!(dest.join(name).is_file());
        }
    }

    #[test]
    fn modification_time_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("dest");

        let file = src.join("stamped.txt");
        write(&file, "stamped");
        let mtime = filetime::FileTime::from_unix_time(1_700_000_000, 0);
        filetime::set_file_mtime(&file, mtime).unwrap();

        let engine = CopyEngine::new();
        assert!(engine.copy_folder(&src, &dest, CopyMode::Documents));

        let copied = fs::metadata(dest.join("stamped.txt")).unwrap();
        assert_eq!(filetime::FileTime::from_last_modification_time(&copied), mtime);
    }

    #[test]
    fn single_worker_copies_everything() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("dest");

        for name in ["a.txt", "b.txt", "c.txt"] {
            write(&src.join(name), name);
        }

        let engine = CopyEngine::with_workers(1);
        assert!(engine.copy_folder(&src, &dest, CopyMode::Documents));
        assert_eq!(engine.stats().snapshot().files_copied, 3);
    }
}
