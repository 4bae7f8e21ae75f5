// SPDX-License-Identifier: Apache-2.0

//! Lexical-state-aware delimiter scanning.
//!
//! The configuration document is TypeScript source, so a naive character
//! count mistakes braces inside string literals or comments for structural
//! delimiters. The scanner in this module walks the text with a minimal
//! lexical state machine — string literals (`'…'`, `"…"`, `` `…` `` with
//! backslash escapes) and comments (`// …`, `/* … */`) are skipped — and
//! yields only characters in code position. Balance checks and brace
//! matching are built on top of it.
//!
//! Template-literal interiors are treated as opaque text: `${ … }`
//! interpolations are not re-entered. That subset is sufficient for the
//! tool-generated shape of real configuration files.

use std::iter::Peekable;
use std::str::CharIndices;

/// Iterator over the characters of a text that are in code position.
///
/// Created by [`code_chars`]. String literal and comment interiors are
/// skipped entirely, including their delimiters.
#[derive(Debug)]
pub struct CodeChars<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Iterator for CodeChars<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((i, c)) = self.chars.next() {
            match c {
                '\'' | '"' | '`' => {
                    // Skip the string literal; an unterminated literal
                    // swallows the rest of the text.
                    while let Some((_, sc)) = self.chars.next() {
                        match sc {
                            '\\' => {
                                self.chars.next();
                            }
                            _ if sc == c => break,
                            _ => {}
                        }
                    }
                }
                '/' => match self.chars.peek() {
                    Some(&(_, '/')) => {
                        for (_, sc) in self.chars.by_ref() {
                            if sc == '\n' {
                                break;
                            }
                        }
                    }
                    Some(&(_, '*')) => {
                        self.chars.next();
                        let mut star = false;
                        for (_, sc) in self.chars.by_ref() {
                            if star && sc == '/' {
                                break;
                            }
                            star = sc == '*';
                        }
                    }
                    _ => return Some((i, c)),
                },
                _ => return Some((i, c)),
            }
        }
        None
    }
}

/// Returns an iterator over the characters of `text` in code position.
///
/// # Examples
///
/// ```
/// use modcfg::domain::scan::code_chars;
///
/// let braces: Vec<char> = code_chars("{ a: \"}\" } // }")
///     .map(|(_, c)| c)
///     .filter(|c| *c == '{' || *c == '}')
///     .collect();
/// assert_eq!(braces, vec!['{', '}']);
/// ```
pub fn code_chars(text: &str) -> CodeChars<'_> {
    CodeChars {
        chars: text.char_indices().peekable(),
    }
}

/// Checks that a delimiter pair is balanced in `text`.
///
/// Returns true iff every prefix of the text has a non-negative running
/// open-count and the total count is zero at the end. Delimiters inside
/// string literals and comments are not counted.
///
/// # Examples
///
/// ```
/// use modcfg::domain::scan::is_balanced;
///
/// assert!(is_balanced("{ a: { b: 1 } }", '{', '}'));
/// assert!(!is_balanced("{ a: 1", '{', '}'));
/// assert!(!is_balanced("} {", '{', '}'));
/// assert!(is_balanced("{ label: \"}\" }", '{', '}'));
/// ```
pub fn is_balanced(text: &str, open: char, close: char) -> bool {
    let mut count: i64 = 0;
    for (_, c) in code_chars(text) {
        if c == open {
            count += 1;
        } else if c == close {
            count -= 1;
            if count < 0 {
                return false;
            }
        }
    }
    count == 0
}

/// Finds the closing brace matching an already-open `{`.
///
/// `text` is the source immediately after the opening brace; the returned
/// offset is the byte index of the matching `}` within `text`, or `None`
/// when the braces never close.
///
/// # Examples
///
/// ```
/// use modcfg::domain::scan::block_end;
///
/// let inner = " blog: true }, rest";
/// assert_eq!(block_end(inner), Some(12));
/// assert_eq!(block_end(" no close"), None);
/// ```
pub fn block_end(text: &str) -> Option<usize> {
    let mut depth: u32 = 1;
    for (i, c) in code_chars(text) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
