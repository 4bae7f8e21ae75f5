// SPDX-License-Identifier: Apache-2.0

//! Module name newtype for type-safe key handling.
//!
//! This module provides the `ModuleName` type, a newtype wrapper around
//! `String` for the keys of the modules section. Keys are bare TypeScript
//! identifiers (`blog`, `auth`, `organizations`), so the constructor
//! validates the identifier shape instead of accepting arbitrary strings.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-safe wrapper for module names.
///
/// `ModuleName` wraps a `String` to prevent accidental mixing of module keys
/// with other string values. A valid name is a non-empty ASCII identifier:
/// a letter or underscore followed by letters, digits, or underscores. This
/// matches the subset of keys the entry parser recognizes, so any name that
/// passes validation can round-trip through the configuration document.
///
/// # Examples
///
/// ```
/// use modcfg::domain::module_name::ModuleName;
///
/// let name = ModuleName::new("blog").unwrap();
/// assert_eq!(name.as_str(), "blog");
///
/// assert!(ModuleName::new("my-module").is_err());
/// assert!(ModuleName::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a new `ModuleName`, validating the identifier shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidModuleName`] if the name is empty, does
    /// not start with a letter or underscore, or contains characters other
    /// than ASCII letters, digits, and underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg::domain::module_name::ModuleName;
    ///
    /// let name = ModuleName::new("organizations").unwrap();
    /// assert_eq!(name.as_str(), "organizations");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::InvalidModuleName {
                name,
                reason: "name is empty".to_string(),
            });
        }
        let mut chars = name.chars();
        let first = chars.next().unwrap_or('\0');
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(ConfigError::InvalidModuleName {
                name,
                reason: "must start with a letter or underscore".to_string(),
            });
        }
        if let Some(bad) = name.chars().find(|c| !is_ident_char(*c)) {
            return Err(ConfigError::InvalidModuleName {
                name,
                reason: format!("contains invalid character '{}'", bad),
            });
        }
        Ok(ModuleName(name))
    }

    /// Creates a `ModuleName` without validation.
    ///
    /// Reserved for the entry parser, which only produces identifiers by
    /// construction.
    pub(crate) fn new_unchecked(name: impl Into<String>) -> Self {
        ModuleName(name.into())
    }

    /// Returns the name as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg::domain::module_name::ModuleName;
    ///
    /// let name = ModuleName::new("auth").unwrap();
    /// assert_eq!(name.as_str(), "auth");
    /// ```
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ModuleName` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Returns true for characters allowed inside an identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ModuleName> for String {
    fn from(name: ModuleName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_valid() {
        let name = ModuleName::new("blog").unwrap();
        assert_eq!(name.as_str(), "blog");
    }

    #[test]
    fn test_module_name_with_underscore_and_digits() {
        let name = ModuleName::new("user_management2").unwrap();
        assert_eq!(name.as_str(), "user_management2");
    }

    #[test]
    fn test_module_name_leading_underscore() {
        assert!(ModuleName::new("_internal").is_ok());
    }

    #[test]
    fn test_module_name_empty() {
        let err = ModuleName::new("").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidModuleName { .. }));
    }

    #[test]
    fn test_module_name_leading_digit() {
        assert!(ModuleName::new("1blog").is_err());
    }

    #[test]
    fn test_module_name_hyphen_rejected() {
        let err = ModuleName::new("my-module").unwrap_err();
        assert!(err.to_string().contains("'-'"));
    }

    #[test]
    fn test_module_name_whitespace_rejected() {
        assert!(ModuleName::new("my module").is_err());
    }

    #[test]
    fn test_module_name_display() {
        let name = ModuleName::new("auth").unwrap();
        assert_eq!(format!("{}", name), "auth");
    }

    #[test]
    fn test_module_name_into_string() {
        let name = ModuleName::new("auth").unwrap();
        let inner: String = name.into_string();
        assert_eq!(inner, "auth");
    }

    #[test]
    fn test_module_name_equality_and_hash() {
        use std::collections::HashSet;
        let a = ModuleName::new("blog").unwrap();
        let b = ModuleName::new("blog").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
