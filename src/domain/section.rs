// SPDX-License-Identifier: Apache-2.0

//! Modules-section locator.
//!
//! The modules block is the only subtree of the configuration document this
//! crate mutates. It is recognized by a labeled comment anchor immediately
//! followed by `modules: {`; everything outside it is passed through as
//! opaque text. The locator reports three distinct outcomes — absent,
//! malformed, and found — so callers can tell "nothing to do" apart from
//! "the file is corrupt, abort".

use crate::domain::scan::block_end;
use once_cell::sync::Lazy;
use regex::Regex;

/// The comment anchor that labels the modules section.
pub const MODULES_ANCHOR: &str = "// === APPLICATION MODULES ===";

static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"//\s*===\s*APPLICATION\s+MODULES\s*===\s*\n\s*modules:\s*\{")
        .expect("anchor pattern is valid")
});

/// Byte range and content of a located modules section.
///
/// Offsets are into the full document text: `anchor_start` is where the
/// anchor comment begins, `start` is just inside the opening brace, and
/// `end` is the offset of the matching closing brace (so `start..end` is
/// the section content).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulesSection {
    /// Offset of the `//` that starts the anchor comment.
    pub anchor_start: usize,
    /// Offset just after the opening `{`.
    pub start: usize,
    /// Offset of the matching `}`.
    pub end: usize,
    /// The text between the braces.
    pub content: String,
}

/// Result of locating the modules section in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionQuery {
    /// No anchored modules section exists.
    Absent,
    /// The anchor is present but the section is not a well-formed block.
    Malformed {
        /// What is wrong with the section
        reason: String,
    },
    /// The section was found.
    Found(ModulesSection),
}

impl SectionQuery {
    /// Returns the located section, if any.
    pub fn found(self) -> Option<ModulesSection> {
        match self {
            SectionQuery::Found(section) => Some(section),
            _ => None,
        }
    }
}

/// Locates the anchored modules section in `document`.
///
/// The anchor comment and the `modules: {` opener are matched textually;
/// the extent of the block is then determined by a code-aware brace scan,
/// so braces inside string literals or comments within the section do not
/// corrupt the match.
///
/// # Examples
///
/// ```
/// use modcfg::domain::section::{locate_modules_section, SectionQuery};
///
/// let doc = "export const config = {\n  appName: \"X\",\n\n  \
///     // === APPLICATION MODULES ===\n  modules: {\n    blog: true\n  }\n} as const;\n";
///
/// match locate_modules_section(doc) {
///     SectionQuery::Found(section) => assert!(section.content.contains("blog: true")),
///     other => panic!("expected Found, got {:?}", other),
/// }
///
/// assert_eq!(
///     locate_modules_section("export const config = {} as const;"),
///     SectionQuery::Absent
/// );
/// ```
pub fn locate_modules_section(document: &str) -> SectionQuery {
    let m = match ANCHOR_RE.find(document) {
        Some(m) => m,
        None => return SectionQuery::Absent,
    };

    let start = m.end();
    match block_end(&document[start..]) {
        Some(rel) => {
            let end = start + rel;
            SectionQuery::Found(ModulesSection {
                anchor_start: m.start(),
                start,
                end,
                content: document[start..end].to_string(),
            })
        }
        None => SectionQuery::Malformed {
            reason: "modules block never closes".to_string(),
        },
    }
}
