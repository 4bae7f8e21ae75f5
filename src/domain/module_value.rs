// SPDX-License-Identifier: Apache-2.0

//! Module entry values and their source-text serialization.
//!
//! A module entry maps a name to either a boolean flag or a configuration
//! object. Object values are TypeScript object literals, not JSON: keys are
//! bare identifiers and values may be expressions such as
//! `process.env.GOOGLE_CLIENT_ID`. `ModuleValue` therefore keeps a tagged
//! representation where anything that is not a boolean or a parsed object is
//! carried as verbatim source text and re-emitted unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of spaces per indentation level in rendered output.
const INDENT: usize = 2;

/// Indentation level of an entry line inside the modules block
/// (`config` → `modules` → entry).
pub(crate) const ENTRY_LEVEL: usize = 2;

/// The value of a single module entry.
///
/// - `Bool` is the plain enabled/disabled flag (`blog: true`).
/// - `Raw` is any scalar or expression carried verbatim: quoted strings,
///   numbers, arrays, and bare references like `process.env.X`. Raw text is
///   never reinterpreted, so non-JSON constructs survive a rewrite.
/// - `Object` is an ordered list of `key: value` pairs parsed from an object
///   literal (or built programmatically) that is re-serialized structurally
///   with correct indentation.
///
/// # Examples
///
/// ```
/// use modcfg::domain::module_value::ModuleValue;
///
/// let value = ModuleValue::object([
///     ("enabled", ModuleValue::Bool(true)),
///     ("loginPath", ModuleValue::string("/auth/signin")),
///     ("clientId", ModuleValue::env("GOOGLE_CLIENT_ID")),
/// ]);
///
/// let rendered = value.render(2);
/// assert!(rendered.contains("loginPath: \"/auth/signin\""));
/// assert!(rendered.contains("clientId: process.env.GOOGLE_CLIENT_ID"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ModuleValue {
    /// A boolean flag.
    Bool(bool),
    /// Verbatim source text for a scalar or expression value.
    Raw(String),
    /// An ordered object literal.
    Object(Vec<(String, ModuleValue)>),
}

impl ModuleValue {
    /// Builds a `Raw` value holding a quoted string literal.
    ///
    /// Double quotes and backslashes in the input are escaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg::domain::module_value::ModuleValue;
    ///
    /// let value = ModuleValue::string("/blog");
    /// assert_eq!(value.render(0), "\"/blog\"");
    /// ```
    pub fn string(s: impl AsRef<str>) -> Self {
        let escaped = s.as_ref().replace('\\', "\\\\").replace('"', "\\\"");
        ModuleValue::Raw(format!("\"{}\"", escaped))
    }

    /// Builds a `Raw` value referencing an environment variable.
    ///
    /// The reference is emitted bare (`process.env.KEY`), never quoted,
    /// matching how configuration documents consume environment values.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg::domain::module_value::ModuleValue;
    ///
    /// let value = ModuleValue::env("MONGODB_URI");
    /// assert_eq!(value.render(0), "process.env.MONGODB_URI");
    /// ```
    pub fn env(key: impl AsRef<str>) -> Self {
        ModuleValue::Raw(format!("process.env.{}", key.as_ref()))
    }

    /// Builds a `Raw` value holding an integer literal.
    pub fn number(n: i64) -> Self {
        ModuleValue::Raw(n.to_string())
    }

    /// Builds an `Object` value from `(key, value)` pairs, preserving order.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg::domain::module_value::ModuleValue;
    ///
    /// let value = ModuleValue::object([("enabled", ModuleValue::Bool(true))]);
    /// assert!(value.as_object().is_some());
    /// ```
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ModuleValue)>,
    {
        ModuleValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Returns the boolean flag if this value is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ModuleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the object entries if this value is an `Object`.
    pub fn as_object(&self) -> Option<&[(String, ModuleValue)]> {
        match self {
            ModuleValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a key in an `Object` value.
    ///
    /// Returns `None` for non-object values or missing keys.
    pub fn get(&self, key: &str) -> Option<&ModuleValue> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether the module this value configures is enabled.
    ///
    /// A bare `true` enables the module; an object enables it unless it
    /// carries an explicit `enabled: false`.
    pub fn is_enabled(&self) -> bool {
        match self {
            ModuleValue::Bool(b) => *b,
            ModuleValue::Object(_) => !matches!(self.get("enabled"), Some(ModuleValue::Bool(false))),
            ModuleValue::Raw(_) => true,
        }
    }

    /// Renders this value as source text.
    ///
    /// `level` is the indentation level (in 2-space units) of the line the
    /// value appears on; nested object members are indented one level
    /// deeper and the closing brace returns to `level`. `Raw` text is
    /// emitted verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg::domain::module_value::ModuleValue;
    ///
    /// assert_eq!(ModuleValue::Bool(true).render(2), "true");
    ///
    /// let obj = ModuleValue::object([("enabled", ModuleValue::Bool(true))]);
    /// assert_eq!(obj.render(2), "{\n      enabled: true\n    }");
    /// ```
    pub fn render(&self, level: usize) -> String {
        match self {
            ModuleValue::Bool(b) => b.to_string(),
            ModuleValue::Raw(text) => text.clone(),
            ModuleValue::Object(entries) => {
                if entries.is_empty() {
                    return "{}".to_string();
                }
                let inner = " ".repeat((level + 1) * INDENT);
                let outer = " ".repeat(level * INDENT);
                let mut out = String::from("{\n");
                for (i, (key, value)) in entries.iter().enumerate() {
                    let comma = if i + 1 == entries.len() { "" } else { "," };
                    out.push_str(&format!(
                        "{}{}: {}{}\n",
                        inner,
                        key,
                        value.render(level + 1),
                        comma
                    ));
                }
                out.push_str(&outer);
                out.push('}');
                out
            }
        }
    }
}

impl From<bool> for ModuleValue {
    fn from(b: bool) -> Self {
        ModuleValue::Bool(b)
    }
}

impl fmt::Display for ModuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0))
    }
}

/// Renders a full set of module entries as the content of the modules block.
///
/// Each entry becomes an indented `key: value` line; entries are separated
/// by commas, with no comma after the last one. The returned text carries no
/// leading or trailing newline; the caller splices it between the braces.
///
/// # Examples
///
/// ```
/// use modcfg::domain::module_name::ModuleName;
/// use modcfg::domain::module_value::{render_entries, ModuleValue};
///
/// let entries = vec![
///     (ModuleName::new("blog").unwrap(), ModuleValue::Bool(true)),
///     (ModuleName::new("auth").unwrap(), ModuleValue::Bool(false)),
/// ];
/// assert_eq!(render_entries(&entries), "    blog: true,\n    auth: false");
/// ```
pub fn render_entries(entries: &[(crate::domain::ModuleName, ModuleValue)]) -> String {
    let indent = " ".repeat(ENTRY_LEVEL * INDENT);
    let mut out = String::new();
    for (i, (name, value)) in entries.iter().enumerate() {
        let comma = if i + 1 == entries.len() { "" } else { "," };
        out.push_str(&format!(
            "{}{}: {}{}",
            indent,
            name,
            value.render(ENTRY_LEVEL),
            comma
        ));
        if i + 1 != entries.len() {
            out.push('\n');
        }
    }
    out
}
