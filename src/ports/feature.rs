// SPDX-License-Identifier: Apache-2.0

//! Feature module trait definition.
//!
//! A feature module bundles everything the CLI needs to install or remove
//! one optional capability of the target application: the configuration
//! value written into the modules section, the npm packages to install, the
//! environment variables to announce, and any file scaffolding.

use crate::domain::{ModuleManifest, ModuleName, ModuleValue, Result};
use crate::ports::Prompter;
use std::path::Path;

/// One installable feature of the target application.
///
/// Implementations are stateless descriptors; all project state lives on
/// disk under the project root passed to each method.
pub trait FeatureModule {
    /// The key this module occupies in the modules section.
    fn name(&self) -> ModuleName;

    /// A one-line, user-facing description.
    fn summary(&self) -> &str;

    /// npm packages this module depends on.
    fn packages(&self) -> &[&str] {
        &[]
    }

    /// The environment variables this module reads at runtime.
    fn manifest(&self) -> ModuleManifest;

    /// The configuration value written when the user accepts defaults.
    fn default_config(&self) -> ModuleValue;

    /// Builds the configuration value, optionally asking the user questions.
    ///
    /// The default implementation returns [`default_config`] without
    /// prompting.
    ///
    /// [`default_config`]: FeatureModule::default_config
    fn configure(&self, prompter: &mut dyn Prompter) -> Result<ModuleValue> {
        let _ = prompter;
        Ok(self.default_config())
    }

    /// Whether the module's files already exist under `project_root`.
    fn is_scaffolded(&self, project_root: &Path) -> bool {
        let _ = project_root;
        false
    }

    /// Creates the module's files under `project_root`.
    ///
    /// Called after the configuration entry has been written. The default
    /// implementation does nothing.
    fn scaffold(&self, project_root: &Path, prompter: &mut dyn Prompter) -> Result<()> {
        let _ = (project_root, prompter);
        Ok(())
    }

    /// Removes files this module owns exclusively under `project_root`.
    ///
    /// User content (articles, uploads) is never touched; the default
    /// implementation does nothing.
    fn teardown(&self, project_root: &Path) -> Result<()> {
        let _ = project_root;
        Ok(())
    }
}
