//! Collision-free destination folder naming.

use std::path::{Path, PathBuf};

/// Return `base` if it does not exist yet, otherwise the first `base_N`
/// (N >= 1) that does not exist.
///
/// Check-then-create is not atomic; the orchestrator is the only writer of
/// top-level backup folders at a given time.
pub fn unique_folder_name(base: &Path) -> PathBuf {
    if !base.exists() {
        return base.to_path_buf();
    }

    let mut counter = 1u32;
    loop {
        let candidate = numbered(base, counter);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn numbered(base: &Path, n: u32) -> PathBuf {
    let name = base
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{name}_{n}"))
}
