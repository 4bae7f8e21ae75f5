// SPDX-License-Identifier: Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests verify the delimiter scanner against a naive model and the
//! parse/render pair against each other on arbitrary inputs.

use modcfg::domain::module_value::{render_entries, ModuleValue};
use modcfg::domain::object::parse_entries;
use modcfg::domain::scan::is_balanced;
use modcfg::domain::ModuleName;
use proptest::prelude::*;
use std::collections::HashSet;

/// Naive balance check, only valid for text without string literals or
/// comments.
fn naive_balanced(text: &str, open: char, close: char) -> bool {
    let mut depth: i64 = 0;
    for c in text.chars() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth < 0 {
                return false;
            }
        }
    }
    depth == 0
}

// On text with no strings or comments the code-aware scanner must agree
// with plain counting.
proptest! {
    #[test]
    fn test_balance_matches_naive_model(s in r"[\{\}\(\)\[\]a-z,: \n]{0,60}") {
        prop_assert_eq!(is_balanced(&s, '{', '}'), naive_balanced(&s, '{', '}'));
        prop_assert_eq!(is_balanced(&s, '(', ')'), naive_balanced(&s, '(', ')'));
        prop_assert_eq!(is_balanced(&s, '[', ']'), naive_balanced(&s, '[', ']'));
    }
}

// Braces inside string literals never affect the balance verdict.
proptest! {
    #[test]
    fn test_balance_ignores_string_contents(inner in r"[\{\}\(\)a-z ]{0,20}") {
        let text = format!("{{ key: \"{}\" }}", inner);
        prop_assert!(is_balanced(&text, '{', '}'), "braces unbalanced in {:?}", text);
        prop_assert!(is_balanced(&text, '(', ')'), "parens unbalanced in {:?}", text);
    }
}

fn value_strategy() -> impl Strategy<Value = ModuleValue> {
    prop_oneof![
        prop::bool::ANY.prop_map(ModuleValue::Bool),
        any::<i32>().prop_map(|n| ModuleValue::number(n as i64)),
    ]
}

// Whatever render_entries produces, parse_entries must read back verbatim.
proptest! {
    #[test]
    fn test_entries_round_trip(
        raw in prop::collection::vec(("[a-z][a-z0-9_]{0,7}", value_strategy()), 0..6)
    ) {
        let mut seen = HashSet::new();
        let entries: Vec<(ModuleName, ModuleValue)> = raw
            .into_iter()
            .filter(|(name, _)| seen.insert(name.clone()))
            .map(|(name, value)| (ModuleName::new(&name).unwrap(), value))
            .collect();

        let rendered = render_entries(&entries);
        let parsed = parse_entries(&rendered).unwrap();
        prop_assert_eq!(parsed, entries);
    }
}

// Nested objects survive a render/parse cycle too.
proptest! {
    #[test]
    fn test_object_value_round_trip(
        flags in prop::collection::vec(("[a-z][a-z0-9]{0,5}", prop::bool::ANY), 1..5)
    ) {
        let mut seen = HashSet::new();
        let members: Vec<(String, ModuleValue)> = flags
            .into_iter()
            .filter(|(key, _)| seen.insert(key.clone()))
            .map(|(key, flag)| (key, ModuleValue::Bool(flag)))
            .collect();
        let entries = vec![(
            ModuleName::new("auth").unwrap(),
            ModuleValue::Object(members),
        )];

        let rendered = render_entries(&entries);
        let parsed = parse_entries(&rendered).unwrap();
        prop_assert_eq!(parsed, entries);
    }
}

// Identifier-shaped strings are always accepted as module names.
proptest! {
    #[test]
    fn test_module_name_accepts_identifiers(s in "[A-Za-z_][A-Za-z0-9_]{0,15}") {
        prop_assert!(ModuleName::new(&s).is_ok());
    }
}

// Names starting with a digit are always rejected.
proptest! {
    #[test]
    fn test_module_name_rejects_leading_digit(s in "[0-9][A-Za-z0-9_]{0,15}") {
        prop_assert!(ModuleName::new(&s).is_err());
    }
}
