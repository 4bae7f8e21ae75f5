// SPDX-License-Identifier: Apache-2.0

//! npm-backed package manager.

use crate::domain::{ConfigError, Result};
use crate::ports::PackageManager;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// A [`PackageManager`] shelling out to `npm` in the project directory.
///
/// Output is inherited so the user sees npm's own progress; a command that
/// cannot be spawned or exits non-zero becomes a
/// [`ConfigError::PackageError`].
#[derive(Clone, Debug)]
pub struct NpmPackageManager {
    project_root: PathBuf,
}

impl NpmPackageManager {
    /// Creates a manager running npm inside `project_root`.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        NpmPackageManager {
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    fn run(&self, verb: &str, packages: &[&str]) -> Result<()> {
        let command = format!("npm {} {}", verb, packages.join(" "));
        info!(%command, "running package manager");

        let status = Command::new("npm")
            .arg(verb)
            .args(packages)
            .current_dir(&self.project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|error| ConfigError::PackageError {
                command: command.clone(),
                message: error.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ConfigError::PackageError {
                command,
                message: format!("exit status: {}", status),
            })
        }
    }
}

impl PackageManager for NpmPackageManager {
    fn install(&self, packages: &[&str]) -> Result<()> {
        self.run("install", packages)
    }

    fn uninstall(&self, packages: &[&str]) -> Result<()> {
        self.run("uninstall", packages)
    }
}
