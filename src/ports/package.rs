// SPDX-License-Identifier: Apache-2.0

//! Package manager trait definition.

use crate::domain::Result;

/// Installs and uninstalls the npm packages feature modules depend on.
///
/// Implementations shell out to a real package manager or record calls for
/// tests; handlers treat install failures as fatal and uninstall failures
/// as warnings.
pub trait PackageManager {
    /// Installs `packages` into the target project.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PackageError`](crate::domain::ConfigError::PackageError)
    /// when the underlying command cannot be run or exits non-zero.
    fn install(&self, packages: &[&str]) -> Result<()>;

    /// Uninstalls `packages` from the target project.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PackageError`](crate::domain::ConfigError::PackageError)
    /// when the underlying command cannot be run or exits non-zero.
    fn uninstall(&self, packages: &[&str]) -> Result<()>;
}
