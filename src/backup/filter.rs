//! Extension allow-lists and ignored folder names.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

static DOCUMENT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["txt", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "pps", "ppsx"]
        .into_iter()
        .collect()
});

static DESKTOP_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    DOCUMENT_EXTENSIONS
        .iter()
        .copied()
        .chain(["pdf", "rtf"])
        .collect()
});

/// Folder names excluded from any traversal, in either mode.
static IGNORED_FOLDERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Ma musique",
        "Mes images",
        "Mes vidéos",
        "AppData",
        "Application Data",
        "Local Settings",
    ]
    .into_iter()
    .collect()
});

/// Copy policy: which extensions are eligible and whether subfolders are
/// recursed into or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyMode {
    /// Mirror the subfolder structure; allow the wider extension set.
    Desktop,
    /// Flatten: subfolders are skipped and logged.
    Documents,
}

impl CopyMode {
    /// Extension gate. The suffix after the last `.` decides, lowercased;
    /// files without one are never eligible.
    pub fn allows(&self, file: &Path) -> bool {
        let Some(ext) = file.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();

        match self {
            CopyMode::Desktop => DESKTOP_EXTENSIONS.contains(ext.as_str()),
            CopyMode::Documents => DOCUMENT_EXTENSIONS.contains(ext.as_str()),
        }
    }

    pub fn recurse_into_subfolders(&self) -> bool {
        matches!(self, CopyMode::Desktop)
    }
}

pub fn is_ignored(name: &str) -> bool {
    IGNORED_FOLDERS.contains(name)
}
