// SPDX-License-Identifier: Apache-2.0

//! Per-module environment variable declarations.
//!
//! Each feature module declares the environment variables it needs so the
//! CLI can print setup instructions after an install. The declarations are
//! plain data returned by the module's manifest and aggregated by the
//! composition root; nothing here is persisted or registered globally.

use crate::domain::module_name::ModuleName;
use serde::{Deserialize, Serialize};

/// A single declared environment variable requirement.
///
/// # Examples
///
/// ```
/// use modcfg::domain::manifest::EnvVarSpec;
///
/// let spec = EnvVarSpec::optional("BETTER_AUTH_URL", "Base URL for the auth server")
///     .with_default("http://localhost:3000");
/// assert!(!spec.required);
/// assert_eq!(spec.default_value.as_deref(), Some("http://localhost:3000"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVarSpec {
    /// The environment variable name.
    pub key: String,
    /// Whether the module cannot function without it.
    pub required: bool,
    /// Value assumed when the variable is unset.
    pub default_value: Option<String>,
    /// User-facing description of what the variable is for.
    pub description: String,
}

impl EnvVarSpec {
    /// Declares a required variable.
    pub fn required(key: impl Into<String>, description: impl Into<String>) -> Self {
        EnvVarSpec {
            key: key.into(),
            required: true,
            default_value: None,
            description: description.into(),
        }
    }

    /// Declares an optional variable.
    pub fn optional(key: impl Into<String>, description: impl Into<String>) -> Self {
        EnvVarSpec {
            key: key.into(),
            required: false,
            default_value: None,
            description: description.into(),
        }
    }

    /// Sets the default value assumed when the variable is unset.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// The environment variable declarations of one feature module.
///
/// # Examples
///
/// ```
/// use modcfg::domain::manifest::{EnvVarSpec, ModuleManifest};
/// use modcfg::domain::module_name::ModuleName;
///
/// let manifest = ModuleManifest::new(ModuleName::new("auth").unwrap())
///     .with_var(EnvVarSpec::required("MONGODB_URI", "MongoDB connection string"))
///     .with_var(EnvVarSpec::optional("RESEND_API_KEY", "Resend API key for OTP emails"));
///
/// assert_eq!(manifest.required_vars().count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// The module these declarations belong to.
    pub module: ModuleName,
    /// The declared variables, in declaration order.
    pub env_vars: Vec<EnvVarSpec>,
}

impl ModuleManifest {
    /// Creates an empty manifest for `module`.
    pub fn new(module: ModuleName) -> Self {
        ModuleManifest {
            module,
            env_vars: Vec::new(),
        }
    }

    /// Appends a variable declaration.
    pub fn with_var(mut self, spec: EnvVarSpec) -> Self {
        self.env_vars.push(spec);
        self
    }

    /// Iterates over the required variables only.
    pub fn required_vars(&self) -> impl Iterator<Item = &EnvVarSpec> {
        self.env_vars.iter().filter(|v| v.required)
    }

    /// Whether the manifest declares no variables at all.
    pub fn is_empty(&self) -> bool {
        self.env_vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ModuleName {
        ModuleName::new(s).unwrap()
    }

    #[test]
    fn test_required_constructor() {
        let spec = EnvVarSpec::required("MONGODB_URI", "connection string");
        assert!(spec.required);
        assert!(spec.default_value.is_none());
        assert_eq!(spec.key, "MONGODB_URI");
    }

    #[test]
    fn test_optional_with_default() {
        let spec = EnvVarSpec::optional("BETTER_AUTH_URL", "base url")
            .with_default("http://localhost:3000");
        assert!(!spec.required);
        assert_eq!(spec.default_value.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_manifest_preserves_order() {
        let manifest = ModuleManifest::new(name("auth"))
            .with_var(EnvVarSpec::required("A", ""))
            .with_var(EnvVarSpec::optional("B", ""))
            .with_var(EnvVarSpec::required("C", ""));

        let keys: Vec<&str> = manifest.env_vars.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_required_vars_filter() {
        let manifest = ModuleManifest::new(name("auth"))
            .with_var(EnvVarSpec::required("A", ""))
            .with_var(EnvVarSpec::optional("B", ""));

        let required: Vec<&str> = manifest.required_vars().map(|v| v.key.as_str()).collect();
        assert_eq!(required, vec!["A"]);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ModuleManifest::new(name("blog"));
        assert!(manifest.is_empty());
        assert_eq!(manifest.required_vars().count(), 0);
    }
}
