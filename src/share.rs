//! Network share mount and reachability.
//!
//! Thin wrapper over the platform's network client. Credentials come from the
//! configuration layer; the copy engine never sees them. A failed check is
//! fatal to the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::config::ShareConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ShareMount {
    root: PathBuf,
    username: Option<String>,
    password: Option<String>,
}

impl ShareMount {
    pub fn from_config(config: &ShareConfig) -> Self {
        Self {
            root: config.root.clone(),
            username: config.username(),
            password: config.password(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }

    /// Mount the share if the platform needs it, then make sure `target`
    /// exists. Everything after this call assumes the share stays reachable.
    pub fn connect(&self, target: &Path) -> Result<()> {
        self.mount()?;

        fs::create_dir_all(target).map_err(|e| {
            error!("Cannot access share destination {}: {}", target.display(), e);
            Error::ShareUnreachable {
                path: target.display().to_string(),
            }
        })?;

        debug!("Share destination ready: {}", target.display());
        Ok(())
    }

    #[cfg(windows)]
    fn mount(&self) -> Result<()> {
        use std::process::Command;

        // Drop any stale session before authenticating again.
        let _ = Command::new("net")
            .args(["use", "*", "/delete", "/y"])
            .output();
        std::thread::sleep(std::time::Duration::from_secs(1));

        let mut command = Command::new("net");
        command.arg("use").arg(&self.root);
        if let Some(username) = &self.username {
            command.arg(format!("/user:{username}"));
        }
        if let Some(password) = &self.password {
            command.arg(password);
        }

        let status = command.status().map_err(|e| {
            error!("Failed to run net use: {}", e);
            Error::ShareUnreachable {
                path: self.root.display().to_string(),
            }
        })?;

        if !status.success() {
            error!("Share authentication failed: {}", self.root.display());
            return Err(Error::ShareUnreachable {
                path: self.root.display().to_string(),
            });
        }

        Ok(())
    }

    #[cfg(not(windows))]
    fn mount(&self) -> Result<()> {
        // Mounting is the OS's job on non-Windows hosts; reachability is
        // checked through the destination directory in connect().
        debug!("No mount step for {} on this platform", self.root.display());
        Ok(())
    }
}
