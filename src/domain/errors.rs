// SPDX-License-Identifier: Apache-2.0

//! Error types for the modcfg crate.
//!
//! This module defines the error types that can occur when locating, parsing,
//! or rewriting the modules section of a configuration document, and when
//! performing the side effects driven by the CLI. All errors use `thiserror`.
//!
//! Not every failure surfaces as an error: lookups such as
//! [`ConfigManager::has_module`](crate::service::ConfigManager::has_module)
//! deliberately degrade to a negative answer instead, per the crate's
//! soft-fail policy. The variants here represent broken invariants that the
//! caller must handle.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all hard failures in the crate: precondition
/// violations on the backup guard, a post-mutation validation failure (which
/// always follows an automatic rollback), malformed input that a mutating
/// operation refuses to touch, and failed external side effects. It is marked
/// `#[non_exhaustive]` to allow future additions without breaking callers.
///
/// # Examples
///
/// ```
/// use modcfg::domain::errors::ConfigError;
///
/// fn restore() -> Result<(), ConfigError> {
///     Err(ConfigError::MissingBackup {
///         path: "/tmp/project/config.ts.backup".into(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file does not exist, so there is nothing to back up
    /// or mutate.
    #[error("Configuration file not found: {path}")]
    MissingConfigFile {
        /// Path that was expected to hold the configuration document
        path: PathBuf,
    },

    /// A restore was attempted but no backup snapshot exists.
    #[error("No backup to restore: {path}")]
    MissingBackup {
        /// Path that was expected to hold the backup snapshot
        path: PathBuf,
    },

    /// The document failed the post-mutation integrity check. The original
    /// content has already been restored from the backup snapshot when this
    /// error is returned.
    #[error("Validation failed after rewriting {path}; original content restored")]
    ValidationFailed {
        /// Path of the configuration document that was rolled back
        path: PathBuf,
    },

    /// The modules section anchor was found but its content is not a
    /// well-formed block (for example, the braces never close). Mutating
    /// operations refuse to touch such a document.
    #[error("Malformed modules section: {reason}")]
    MalformedSection {
        /// Human-readable description of what is wrong with the section
        reason: String,
    },

    /// The content of the modules section could not be parsed into entries.
    #[error("Failed to parse modules content: {message}")]
    ParseError {
        /// The error message
        message: String,
    },

    /// A module name is not a valid bare identifier.
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName {
        /// The rejected name
        name: String,
        /// Why the name was rejected
        reason: String,
    },

    /// The document has no `} as const` closing marker, so there is no
    /// insertion point for a synthesized modules section.
    #[error("Config document has no '}} as const' closing marker")]
    MissingClosingMarker,

    /// The requested module is not one of the built-in feature modules.
    #[error("Unknown module: {name}")]
    UnknownModule {
        /// The requested module name
        name: String,
    },

    /// A package manager invocation failed.
    #[error("Package manager command '{command}' failed: {message}")]
    PackageError {
        /// The command that was executed
        command: String,
        /// The error message or exit status
        message: String,
    },

    /// A scaffolding step could not complete.
    #[error("Scaffold step failed: {message}")]
    ScaffoldError {
        /// The error message
        message: String,
    },

    /// The input stream closed while an interactive prompt was waiting for
    /// a response.
    #[error("Input stream closed while awaiting a response")]
    PromptClosed,

    /// An I/O error occurred while reading or writing project files.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for modcfg operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_message() {
        let error = ConfigError::MissingConfigFile {
            path: "/project/config.ts".into(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /project/config.ts"
        );
    }

    #[test]
    fn test_missing_backup_message() {
        let error = ConfigError::MissingBackup {
            path: "/project/config.ts.backup".into(),
        };
        assert_eq!(
            error.to_string(),
            "No backup to restore: /project/config.ts.backup"
        );
    }

    #[test]
    fn test_validation_failed_message() {
        let error = ConfigError::ValidationFailed {
            path: "/project/config.ts".into(),
        };
        assert!(error.to_string().contains("original content restored"));
    }

    #[test]
    fn test_malformed_section_message() {
        let error = ConfigError::MalformedSection {
            reason: "unbalanced braces".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed modules section: unbalanced braces"
        );
    }

    #[test]
    fn test_missing_closing_marker_message() {
        let error = ConfigError::MissingClosingMarker;
        assert!(error.to_string().contains("as const"));
    }

    #[test]
    fn test_unknown_module_message() {
        let error = ConfigError::UnknownModule {
            name: "payments".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown module: payments");
    }

    #[test]
    fn test_package_error_message() {
        let error = ConfigError::PackageError {
            command: "npm install better-auth".to_string(),
            message: "exit status: 1".to_string(),
        };
        assert!(error.to_string().contains("npm install better-auth"));
        assert!(error.to_string().contains("exit status: 1"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }
}
