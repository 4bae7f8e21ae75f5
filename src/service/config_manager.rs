// SPDX-License-Identifier: Apache-2.0

//! Configuration document mutation with backup-guarded rewrites.
//!
//! `ConfigManager` owns the paths to a project's `config.ts` and its backup
//! snapshot, and exposes the mutation surface: add or update a module entry,
//! remove one, list entries, and check for presence. Every mutation follows
//! the same protocol: snapshot the file, rewrite it, re-validate the result,
//! and roll the snapshot back on any failure, so no error path can leave a
//! corrupt document behind.

use crate::domain::module_value::{render_entries, ENTRY_LEVEL};
use crate::domain::object::parse_entries;
use crate::domain::scan::is_balanced;
use crate::domain::section::{locate_modules_section, SectionQuery, MODULES_ANCHOR};
use crate::domain::{ConfigError, ModuleName, ModuleValue, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

static DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+const\s+config\s*=").expect("declaration pattern is valid")
});

static CLOSING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}\s*as\s+const\s*;?\s*$").expect("closing pattern is valid"));

/// File name of the configuration document under the project root.
pub const CONFIG_FILE: &str = "config.ts";

/// File name of the backup snapshot under the project root.
pub const BACKUP_FILE: &str = "config.ts.backup";

/// Mutates the modules section of a project's configuration document.
///
/// Operations are not guarded against concurrent invocations on the same
/// project; the tool assumes one interactive session at a time.
///
/// # Examples
///
/// ```no_run
/// use modcfg::domain::{ModuleName, ModuleValue};
/// use modcfg::service::ConfigManager;
///
/// # fn main() -> modcfg::domain::Result<()> {
/// let manager = ConfigManager::new("/path/to/project");
/// let blog = ModuleName::new("blog")?;
/// manager.add_module(&blog, &ModuleValue::Bool(true))?;
/// assert!(manager.has_module(&blog));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
    backup_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the project at `project_root`.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref();
        ConfigManager {
            config_path: root.join(CONFIG_FILE),
            backup_path: root.join(BACKUP_FILE),
        }
    }

    /// The path of the configuration document.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Snapshots the configuration document to the backup path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfigFile`] when the document does not
    /// exist.
    pub fn create_backup(&self) -> Result<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::MissingConfigFile {
                path: self.config_path.clone(),
            });
        }
        fs::copy(&self.config_path, &self.backup_path)?;
        debug!(backup = %self.backup_path.display(), "created backup snapshot");
        Ok(())
    }

    /// Restores the configuration document from the backup snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBackup`] when no snapshot exists.
    pub fn restore_backup(&self) -> Result<()> {
        if !self.backup_path.exists() {
            return Err(ConfigError::MissingBackup {
                path: self.backup_path.clone(),
            });
        }
        fs::copy(&self.backup_path, &self.config_path)?;
        warn!(config = %self.config_path.display(), "restored document from backup");
        Ok(())
    }

    /// Deletes the backup snapshot. Doing so when none exists is a no-op.
    pub fn remove_backup(&self) -> Result<()> {
        if self.backup_path.exists() {
            fs::remove_file(&self.backup_path)?;
        }
        Ok(())
    }

    /// Checks the structural integrity of the configuration document.
    ///
    /// The document must contain an `export const config =` declaration,
    /// end with a `} as const` marker, and have balanced braces, parens,
    /// and brackets outside of string literals and comments. Never errors;
    /// an unreadable file is simply invalid.
    pub fn validate_config(&self) -> bool {
        let document = match fs::read_to_string(&self.config_path) {
            Ok(document) => document,
            Err(_) => return false,
        };
        if !DECL_RE.is_match(&document) {
            debug!("validation failed: no config declaration");
            return false;
        }
        if !CLOSING_RE.is_match(&document) {
            debug!("validation failed: no 'as const' closing marker");
            return false;
        }
        is_balanced(&document, '{', '}')
            && is_balanced(&document, '(', ')')
            && is_balanced(&document, '[', ']')
    }

    /// Whether `name` is present in the modules section.
    ///
    /// Degrades to `false` on any problem: missing file, absent or
    /// malformed section, unparseable content.
    pub fn has_module(&self, name: &ModuleName) -> bool {
        let document = match fs::read_to_string(&self.config_path) {
            Ok(document) => document,
            Err(_) => return false,
        };
        match locate_modules_section(&document) {
            SectionQuery::Found(section) => parse_entries(&section.content)
                .map(|entries| entries.iter().any(|(n, _)| n == name))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Returns every module entry in document order.
    ///
    /// An absent modules section yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedSection`] when the anchor is present
    /// but the block is broken, or a parse/I/O error.
    pub fn list_modules(&self) -> Result<Vec<(ModuleName, ModuleValue)>> {
        let document = self.read_document()?;
        match locate_modules_section(&document) {
            SectionQuery::Absent => Ok(Vec::new()),
            SectionQuery::Malformed { reason } => Err(ConfigError::MalformedSection { reason }),
            SectionQuery::Found(section) => parse_entries(&section.content),
        }
    }

    /// Adds `name` to the modules section, or updates it in place.
    ///
    /// When no modules section exists one is synthesized before the
    /// `} as const` marker. The whole operation runs under the backup
    /// guard: on any failure the document is restored byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfigFile`] when the document does not
    /// exist, [`ConfigError::MalformedSection`] when the section is broken,
    /// [`ConfigError::MissingClosingMarker`] when there is nowhere to insert
    /// a synthesized section, and [`ConfigError::ValidationFailed`] when the
    /// rewritten document fails the integrity check (already rolled back).
    pub fn add_module(&self, name: &ModuleName, value: &ModuleValue) -> Result<()> {
        self.create_backup()?;
        match self.rewrite_with_entry(name, value) {
            Ok(()) => self.commit_or_rollback(|| {
                info!(module = %name, "module entry written");
            }),
            Err(error) => self.rollback(error),
        }
    }

    /// Removes `name` from the modules section.
    ///
    /// Returns `false`, leaving the document untouched, when the section or
    /// the entry does not exist. Removing the last entry excises the whole
    /// section including its anchor comment. Runs under the backup guard.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedSection`] when the anchor is present
    /// but the block is broken, and [`ConfigError::ValidationFailed`] when
    /// the rewritten document fails the integrity check (already rolled
    /// back).
    pub fn remove_module(&self, name: &ModuleName) -> Result<bool> {
        self.create_backup()?;
        match self.rewrite_without_entry(name) {
            Ok(false) => {
                self.remove_backup()?;
                Ok(false)
            }
            Ok(true) => self
                .commit_or_rollback(|| {
                    info!(module = %name, "module entry removed");
                })
                .map(|()| true),
            Err(error) => self.rollback(error),
        }
    }

    fn read_document(&self) -> Result<String> {
        if !self.config_path.exists() {
            return Err(ConfigError::MissingConfigFile {
                path: self.config_path.clone(),
            });
        }
        Ok(fs::read_to_string(&self.config_path)?)
    }

    /// Validates the rewritten document; commits the mutation or restores
    /// the snapshot.
    fn commit_or_rollback(&self, on_success: impl FnOnce()) -> Result<()> {
        if self.validate_config() {
            self.remove_backup()?;
            on_success();
            Ok(())
        } else {
            self.restore_backup()?;
            self.remove_backup()?;
            Err(ConfigError::ValidationFailed {
                path: self.config_path.clone(),
            })
        }
    }

    fn rollback<T>(&self, error: ConfigError) -> Result<T> {
        self.restore_backup()?;
        self.remove_backup()?;
        Err(error)
    }

    fn rewrite_with_entry(&self, name: &ModuleName, value: &ModuleValue) -> Result<()> {
        let document = self.read_document()?;
        let rewritten = match locate_modules_section(&document) {
            SectionQuery::Absent => synthesize_section(&document, name, value)?,
            SectionQuery::Malformed { reason } => {
                return Err(ConfigError::MalformedSection { reason });
            }
            SectionQuery::Found(section) => {
                let mut entries = parse_entries(&section.content)?;
                match entries.iter_mut().find(|(n, _)| n == name) {
                    Some(entry) => entry.1 = value.clone(),
                    None => entries.push((name.clone(), value.clone())),
                }
                splice_entries(&document, section.start, section.end, &entries)
            }
        };
        fs::write(&self.config_path, rewritten)?;
        Ok(())
    }

    /// Rewrites the document without `name`. Returns `false` without
    /// writing when there is nothing to remove.
    fn rewrite_without_entry(&self, name: &ModuleName) -> Result<bool> {
        let document = self.read_document()?;
        let section = match locate_modules_section(&document) {
            SectionQuery::Absent => return Ok(false),
            SectionQuery::Malformed { reason } => {
                return Err(ConfigError::MalformedSection { reason });
            }
            SectionQuery::Found(section) => section,
        };

        let mut entries = parse_entries(&section.content)?;
        let before_len = entries.len();
        entries.retain(|(n, _)| n != name);
        if entries.len() == before_len {
            return Ok(false);
        }

        let rewritten = if entries.is_empty() {
            excise_section(&document, &section)
        } else {
            splice_entries(&document, section.start, section.end, &entries)
        };
        fs::write(&self.config_path, rewritten)?;
        Ok(true)
    }
}

/// Builds a document with `start..end` replaced by the rendered entries.
fn splice_entries(
    document: &str,
    start: usize,
    end: usize,
    entries: &[(ModuleName, ModuleValue)],
) -> String {
    format!(
        "{}\n{}\n  {}",
        &document[..start],
        render_entries(entries),
        &document[end..]
    )
}

/// Builds a document with a brand-new modules section holding one entry,
/// inserted just before the `} as const` closing marker.
fn synthesize_section(document: &str, name: &ModuleName, value: &ModuleValue) -> Result<String> {
    let closer = CLOSING_RE
        .find(document)
        .ok_or(ConfigError::MissingClosingMarker)?;

    let before = document[..closer.start()].trim_end();
    // The new section becomes another property of the config object, so the
    // preceding property needs a separating comma.
    let separator = if before.ends_with('{') || before.ends_with(',') {
        ""
    } else {
        ","
    };

    Ok(format!(
        "{}{}\n\n  {}\n  modules: {{\n    {}: {}\n  }}\n{}",
        before,
        separator,
        MODULES_ANCHOR,
        name,
        value.render(ENTRY_LEVEL),
        &document[closer.start()..]
    ))
}

/// Builds a document with the whole modules section removed, anchor comment
/// included, repairing the property comma that separated it from its
/// neighbors.
fn excise_section(
    document: &str,
    section: &crate::domain::ModulesSection,
) -> String {
    let mut before = document[..section.anchor_start].trim_end().to_string();
    let mut after = document[section.end + 1..].to_string();

    let trimmed = after.trim_start();
    if trimmed.starts_with(',') {
        // The section was followed by another property; drop the separator.
        let comma = after.len() - trimmed.len();
        after.remove(comma);
    } else if trimmed.starts_with('}') && before.ends_with(',') {
        // The section was the last property; the preceding comma dangles.
        before.pop();
    }
    format!("{}{}", before, after)
}
