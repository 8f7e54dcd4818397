//! Backup identity resolution.
//!
//! The name used to group backups on the share is not always the account
//! name: shared or default sessions are grouped under the machine name
//! instead. The profile path, on the other hand, is always built from the raw
//! account name.

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::BackupConfig;
use crate::error::{Error, Result};

/// Session names that identify a shared or default account rather than a
/// person. Matched case-insensitively.
const GENERIC_SESSION_NAMES: [&str; 3] = ["user", "administrator", "administrateur"];

/// Account names that are never valid backup identities.
const RESERVED_NAMES: [&str; 3] = ["Default", "Public", "All Users"];

/// Profile subfolders a backup run expects to find.
pub const EXPECTED_SUBFOLDERS: [&str; 3] = ["Desktop", "Documents", "Downloads"];

/// Resolved backup identity, read-only after startup.
#[derive(Debug, Clone)]
pub struct UserContext {
    /// Name grouping this run's backups on the share. Diverges from the
    /// account name when the session is generic.
    pub backup_name: String,
    /// Raw OS account name, the one the profile path is built from.
    pub account_name: String,
    /// Local profile root for the account.
    pub profile: PathBuf,
}

impl UserContext {
    /// Resolve the identity from the environment and validate the profile.
    pub fn resolve(config: &BackupConfig) -> Result<Self> {
        let account_name = raw_account_name().ok_or_else(|| Error::Resolution {
            reason: "no username in the environment and no home directory".to_string(),
        })?;

        Self::for_account(&account_name, config)
    }

    /// Resolve for a known account name. Fails when the profile directory
    /// does not exist; missing subfolders only warn.
    pub fn for_account(account_name: &str, config: &BackupConfig) -> Result<Self> {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_default();
        let backup_name = resolve_backup_name(account_name, &host)?;

        let profile = config.profiles_dir.join(account_name);
        if !profile.exists() {
            return Err(Error::Resolution {
                reason: format!("user profile not found: {}", profile.display()),
            });
        }

        let ctx = Self {
            backup_name,
            account_name: account_name.to_string(),
            profile,
        };
        ctx.warn_missing_subfolders();
        Ok(ctx)
    }

    pub fn subfolder(&self, name: &str) -> PathBuf {
        self.profile.join(name)
    }

    fn warn_missing_subfolders(&self) {
        for name in EXPECTED_SUBFOLDERS {
            let path = self.subfolder(name);
            if !path.exists() {
                warn!("{} folder not found: {}", name, path.display());
            }
        }
    }
}

/// Substitute generic session names with the machine name and reject reserved
/// accounts. The raw name stays in use for the profile path regardless.
pub fn resolve_backup_name(raw: &str, host: &str) -> Result<String> {
    let mut name = raw.to_string();

    if GENERIC_SESSION_NAMES.contains(&name.to_lowercase().as_str()) {
        info!(
            "Generic session detected ({}), grouping backups under machine name: {}",
            name, host
        );
        name = host.to_string();
    }

    if name.is_empty() || RESERVED_NAMES.contains(&name.as_str()) {
        return Err(Error::Resolution {
            reason: format!("invalid backup identity: {name:?}"),
        });
    }

    Ok(name)
}

fn raw_account_name() -> Option<String> {
    env::var("USERNAME")
        .ok()
        .filter(|name| !name.is_empty())
        .or_else(|| env::var("USER").ok().filter(|name| !name.is_empty()))
        .or_else(|| {
            dirs::home_dir()
                .and_then(|home| home.file_name().map(|n| n.to_string_lossy().to_string()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn personal_account_is_kept() {
        let name = resolve_backup_name("jdupont", "WKSTATION07").unwrap();
        assert_eq!(name, "jdupont");
    }

    #[test]
    fn generic_sessions_group_under_machine_name() {
        assert_eq!(
            resolve_backup_name("Administrator", "WKSTATION07").unwrap(),
            "WKSTATION07"
        );
        assert_eq!(
            resolve_backup_name("administrateur", "WKSTATION07").unwrap(),
            "WKSTATION07"
        );
        assert_eq!(resolve_backup_name("USER", "WKSTATION07").unwrap(), "WKSTATION07");
    }

    #[test]
    fn reserved_names_are_rejected() {
        for name in ["Default", "Public", "All Users"] {
            assert!(resolve_backup_name(name, "WKSTATION07").is_err());
        }
    }

    #[test]
    fn generic_session_without_host_name_fails() {
        assert!(resolve_backup_name("Administrator", "").is_err());
    }

    #[test]
    fn missing_profile_fails_resolution() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = BackupConfig {
            profiles_dir: dir.path().to_path_buf(),
            file_workers: 4,
        };

        let err = UserContext::for_account("jdupont", &config).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn profile_path_uses_raw_account_name() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("administrateur")).unwrap();
        let config = BackupConfig {
            profiles_dir: dir.path().to_path_buf(),
            file_workers: 4,
        };

        let ctx = UserContext::for_account("administrateur", &config).unwrap();
        assert_eq!(ctx.profile, dir.path().join("administrateur"));
        assert_ne!(ctx.backup_name, "administrateur");
    }
}
