// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser for the modules block content.
//!
//! The grammar is the small subset of TypeScript object-literal syntax that
//! tool-generated configuration actually uses: `identifier: value` entries,
//! `true`/`false`, nested object literals, and arbitrary scalar expressions
//! (quoted strings, numbers, arrays, `process.env.X` references). Booleans
//! and well-formed objects are parsed structurally; everything else is
//! captured verbatim as a [`ModuleValue::Raw`] span so it survives a
//! rewrite unchanged. Object bodies that fall outside the subset degrade to
//! a raw capture of the balanced braces rather than failing the whole
//! parse.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::module_name::{is_ident_char, ModuleName};
use crate::domain::module_value::ModuleValue;
use crate::domain::scan::block_end;

/// Parses the content of a modules block into an ordered entry list.
///
/// `src` is the text between the braces of `modules: { … }`. Keys are
/// unique in the result; if the input repeats a key, the last occurrence
/// wins (logged at debug level).
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] when the content cannot be read as
/// `identifier: value` entries — for example a key without a value, or an
/// object value whose braces never close.
///
/// # Examples
///
/// ```
/// use modcfg::domain::object::parse_entries;
/// use modcfg::domain::module_value::ModuleValue;
///
/// let entries = parse_entries("\n    blog: true,\n    auth: {\n      enabled: false\n    }\n  ").unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].1, ModuleValue::Bool(true));
/// assert_eq!(entries[1].1.get("enabled"), Some(&ModuleValue::Bool(false)));
/// ```
pub fn parse_entries(src: &str) -> Result<Vec<(ModuleName, ModuleValue)>> {
    let mut cursor = Cursor { src, pos: 0 };
    let mut entries: Vec<(ModuleName, ModuleValue)> = Vec::new();

    loop {
        cursor.skip_trivia();
        match cursor.peek() {
            None => break,
            Some(',') => {
                cursor.bump();
                continue;
            }
            Some(_) => {}
        }

        let key = cursor.parse_ident().ok_or_else(|| ConfigError::ParseError {
            message: format!("expected identifier at byte {}", cursor.pos),
        })?;
        cursor.skip_trivia();
        if cursor.peek() != Some(':') {
            return Err(ConfigError::ParseError {
                message: format!("expected ':' after '{}' at byte {}", key, cursor.pos),
            });
        }
        cursor.bump();

        let value = cursor.parse_value()?;
        let name = ModuleName::new_unchecked(key.to_string());
        if let Some(existing) = entries.iter_mut().find(|(n, _)| *n == name) {
            tracing::debug!(module = %name, "duplicate key in modules block, last occurrence wins");
            existing.1 = value;
        } else {
            entries.push((name, value));
        }
    }

    Ok(entries)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.src[self.pos..].starts_with(pat)
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            if self.starts_with("//") {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else if self.starts_with("/*") {
                self.pos += 2;
                let mut star = false;
                while let Some(c) = self.bump() {
                    if star && c == '/' {
                        break;
                    }
                    star = c == '*';
                }
            } else {
                return;
            }
        }
    }

    fn parse_ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return None,
        }
        while matches!(self.peek(), Some(c) if is_ident_char(c)) {
            self.bump();
        }
        Some(&self.src[start..self.pos])
    }

    fn parse_value(&mut self) -> Result<ModuleValue> {
        self.skip_trivia();
        match self.peek() {
            Some('{') => self.parse_object(),
            Some(_) => {
                let raw = self.capture_raw()?;
                Ok(match raw {
                    "true" => ModuleValue::Bool(true),
                    "false" => ModuleValue::Bool(false),
                    other => ModuleValue::Raw(other.to_string()),
                })
            }
            None => Err(ConfigError::ParseError {
                message: format!("missing value at byte {}", self.pos),
            }),
        }
    }

    /// Parses an object literal, degrading to a raw capture of the balanced
    /// braces when the body is outside the subset grammar.
    fn parse_object(&mut self) -> Result<ModuleValue> {
        let brace_pos = self.pos;
        match self.try_parse_object() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.pos = brace_pos;
                let after_open = brace_pos + 1;
                let rel = block_end(&self.src[after_open..]).ok_or_else(|| {
                    ConfigError::ParseError {
                        message: format!("object at byte {} never closes", brace_pos),
                    }
                })?;
                let end = after_open + rel + 1;
                self.pos = end;
                Ok(ModuleValue::Raw(self.src[brace_pos..end].to_string()))
            }
        }
    }

    fn try_parse_object(&mut self) -> Result<ModuleValue> {
        debug_assert_eq!(self.peek(), Some('{'));
        self.bump();
        let mut members: Vec<(String, ModuleValue)> = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(ModuleValue::Object(members));
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                Some(_) => {}
                None => {
                    return Err(ConfigError::ParseError {
                        message: "object never closes".to_string(),
                    })
                }
            }

            let key = self.parse_ident().ok_or_else(|| ConfigError::ParseError {
                message: format!("expected member name at byte {}", self.pos),
            })?;
            self.skip_trivia();
            if self.peek() != Some(':') {
                return Err(ConfigError::ParseError {
                    message: format!("expected ':' after member '{}'", key),
                });
            }
            self.bump();
            let value = self.parse_value()?;
            members.push((key.to_string(), value));
        }
    }

    /// Captures a scalar value verbatim up to the next top-level `,` or `}`.
    ///
    /// Nested `()`, `[]`, and `{}` groups and string literals are tracked so
    /// delimiters inside them do not terminate the capture.
    fn capture_raw(&mut self) -> Result<&'a str> {
        let start = self.pos;
        let mut parens: i32 = 0;
        let mut brackets: i32 = 0;
        let mut braces: i32 = 0;

        while let Some(c) = self.peek() {
            match c {
                ',' | '}' if parens == 0 && brackets == 0 && braces == 0 => break,
                '(' => parens += 1,
                ')' => parens -= 1,
                '[' => brackets += 1,
                ']' => brackets -= 1,
                '{' => braces += 1,
                '\'' | '"' | '`' => {
                    self.bump();
                    while let Some(sc) = self.bump() {
                        match sc {
                            '\\' => {
                                self.bump();
                            }
                            _ if sc == c => break,
                            _ => {}
                        }
                    }
                    continue;
                }
                '/' if self.starts_with("//") || self.starts_with("/*") => {
                    self.skip_trivia();
                    continue;
                }
                _ => {}
            }
            if c == '}' {
                braces -= 1;
            }
            self.bump();
        }

        let raw = self.src[start..self.pos].trim();
        if raw.is_empty() {
            return Err(ConfigError::ParseError {
                message: format!("missing value at byte {}", start),
            });
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[(ModuleName, ModuleValue)]) -> Vec<&str> {
        entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_entries("").unwrap().is_empty());
        assert!(parse_entries("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_single_bool() {
        let entries = parse_entries("\n    blog: true\n  ").unwrap();
        assert_eq!(names(&entries), vec!["blog"]);
        assert_eq!(entries[0].1, ModuleValue::Bool(true));
    }

    #[test]
    fn test_parse_two_bools() {
        let entries = parse_entries("\n    blog: true,\n    auth: false\n  ").unwrap();
        assert_eq!(names(&entries), vec!["blog", "auth"]);
        assert_eq!(entries[1].1, ModuleValue::Bool(false));
    }

    #[test]
    fn test_parse_trailing_comma() {
        let entries = parse_entries("blog: true,").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_parse_object_value() {
        let entries =
            parse_entries("\n    auth: {\n      enabled: true,\n      limit: 5\n    }\n  ")
                .unwrap();
        let auth = &entries[0].1;
        assert_eq!(auth.get("enabled"), Some(&ModuleValue::Bool(true)));
        assert_eq!(auth.get("limit"), Some(&ModuleValue::Raw("5".to_string())));
    }

    #[test]
    fn test_parse_nested_object() {
        let entries = parse_entries(
            "organizations: {\n  teams: {\n    enabled: true,\n    maximumTeams: 10\n  }\n}",
        )
        .unwrap();
        let teams = entries[0].1.get("teams").unwrap();
        assert_eq!(teams.get("enabled"), Some(&ModuleValue::Bool(true)));
    }

    #[test]
    fn test_parse_env_reference_kept_raw() {
        let entries = parse_entries(
            "auth: {\n  clientId: process.env.GOOGLE_CLIENT_ID,\n  enabled: true\n}",
        )
        .unwrap();
        assert_eq!(
            entries[0].1.get("clientId"),
            Some(&ModuleValue::Raw("process.env.GOOGLE_CLIENT_ID".to_string()))
        );
    }

    #[test]
    fn test_parse_string_value_kept_raw() {
        let entries = parse_entries("auth: {\n  loginPath: \"/auth/signin\"\n}").unwrap();
        assert_eq!(
            entries[0].1.get("loginPath"),
            Some(&ModuleValue::Raw("\"/auth/signin\"".to_string()))
        );
    }

    #[test]
    fn test_parse_string_with_comma_inside() {
        let entries = parse_entries("blog: {\n  title: \"a, b\"\n}").unwrap();
        assert_eq!(
            entries[0].1.get("title"),
            Some(&ModuleValue::Raw("\"a, b\"".to_string()))
        );
    }

    #[test]
    fn test_parse_array_value_kept_raw() {
        let entries =
            parse_entries("admin: {\n  adminEmails: [\"a@x.io\", \"b@x.io\"]\n}").unwrap();
        assert_eq!(
            entries[0].1.get("adminEmails"),
            Some(&ModuleValue::Raw("[\"a@x.io\", \"b@x.io\"]".to_string()))
        );
    }

    #[test]
    fn test_parse_multiline_array_kept_raw() {
        let entries = parse_entries("roles: {\n  permissions: [\n    \"a\",\n    \"b\"\n  ]\n}")
            .unwrap();
        let perms = entries[0].1.get("permissions").unwrap();
        match perms {
            ModuleValue::Raw(text) => {
                assert!(text.starts_with('['));
                assert!(text.ends_with(']'));
            }
            other => panic!("expected Raw, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_skips_comments() {
        let entries =
            parse_entries("// enabled modules\nblog: true, /* legacy */ auth: false").unwrap();
        assert_eq!(names(&entries), vec!["blog", "auth"]);
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let entries = parse_entries("blog: true,\nblog: false").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1, ModuleValue::Bool(false));
    }

    #[test]
    fn test_parse_preserves_order() {
        let entries = parse_entries("c: true, a: true, b: true").unwrap();
        assert_eq!(names(&entries), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_parse_missing_colon_fails() {
        let err = parse_entries("blog true").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_parse_missing_value_fails() {
        assert!(parse_entries("blog:").is_err());
    }

    #[test]
    fn test_parse_unclosed_object_fails() {
        assert!(parse_entries("auth: {\n  enabled: true\n").is_err());
    }

    #[test]
    fn test_parse_non_identifier_key_fails() {
        assert!(parse_entries("\"blog\": true").is_err());
    }

    #[test]
    fn test_parse_object_outside_subset_degrades_to_raw() {
        // Spread syntax is not in the subset grammar; the balanced braces
        // are captured verbatim instead.
        let entries = parse_entries("auth: { ...defaults, enabled: true }").unwrap();
        match &entries[0].1 {
            ModuleValue::Raw(text) => assert_eq!(text, "{ ...defaults, enabled: true }"),
            other => panic!("expected Raw fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_roundtrip_through_renderer() {
        use crate::domain::module_value::render_entries;

        let src = "\n    blog: true,\n    auth: {\n      enabled: true,\n      loginPath: \"/auth/signin\"\n    }\n  ";
        let entries = parse_entries(src).unwrap();
        let rendered = render_entries(&entries);
        let reparsed = parse_entries(&rendered).unwrap();
        assert_eq!(entries, reparsed);
    }
}
