//! Property-based tests for the template compiler.
//!
//! Coverage targets:
//! - Extraction (uniqueness, first-occurrence order, never panics)
//! - Compilation (identity on placeholder-free text, no new placeholders)
//! - Cursor insertion and `{` trigger completion at arbitrary offsets

use std::collections::HashSet;

use proptest::prelude::*;
use promptbench_core::domain::{
    VariableBindings, compile, complete_trigger, extract_variables, insert_placeholder,
    placeholder,
};

const POOL: [&str; 4] = ["a", "b", "c", "d"];

prop_compose! {
    /// Text, stray braces and placeholders from a small pool, so names repeat.
    fn arb_template()(parts in prop::collection::vec(
        prop_oneof![
            "[^{}]{0,6}",
            "[a-d]".prop_map(|name| placeholder(&name)),
            Just("{".to_string()),
            Just("}".to_string()),
        ],
        0..12,
    )) -> String {
        parts.concat()
    }
}

prop_compose! {
    /// Brace-free text around placeholders only.
    fn arb_clean_template()(parts in prop::collection::vec(
        prop_oneof![
            "[^{}]{0,6}",
            "[a-d]".prop_map(|name| placeholder(&name)),
        ],
        0..12,
    )) -> String {
        parts.concat()
    }
}

fn arb_offset() -> impl Strategy<Value = usize> {
    prop_oneof![0..32usize, any::<usize>()]
}

fn chars(s: &str, range: std::ops::Range<usize>) -> String {
    s.chars().skip(range.start).take(range.end - range.start).collect()
}

// =============================================================================
// Extraction
// =============================================================================

mod extraction {
    use super::*;

    proptest! {
        #[test]
        fn never_panics(template in ".*") {
            let _ = extract_variables(&template);
            let _ = compile(&template, &VariableBindings::new());
        }

        #[test]
        fn names_are_unique(template in arb_template()) {
            let names = extract_variables(&template);
            let unique: HashSet<&String> = names.iter().collect();
            prop_assert_eq!(unique.len(), names.len());
        }

        #[test]
        fn names_follow_first_occurrence(template in arb_template()) {
            let names = extract_variables(&template);
            let positions: Vec<usize> = names
                .iter()
                .map(|name| template.find(&placeholder(name)))
                .collect::<Option<_>>()
                .expect("every extracted name occurs as a placeholder");
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn placeholder_free_text_has_no_variables(text in "[^{}]*") {
            prop_assert!(extract_variables(&text).is_empty());
        }
    }
}

// =============================================================================
// Compilation
// =============================================================================

mod compilation {
    use super::*;

    proptest! {
        #[test]
        fn placeholder_free_text_is_unchanged(text in "[^{}]*", value in ".*") {
            let compiled = compile(&text, &VariableBindings::new());
            prop_assert_eq!(compiled.as_str(), text.as_str());

            let bindings = VariableBindings::new().with("a", value);
            let compiled = compile(&text, &bindings);
            prop_assert_eq!(compiled.as_str(), text.as_str());
        }

        #[test]
        fn unbound_placeholders_stay_literal(template in arb_template()) {
            let compiled = compile(&template, &VariableBindings::new());
            prop_assert_eq!(compiled.as_str(), template.as_str());
        }

        #[test]
        fn ordinary_values_add_no_placeholders(
            template in arb_clean_template(),
            values in prop::collection::vec("[A-Za-z0-9 .,]{0,8}", POOL.len()),
        ) {
            let before = extract_variables(&template);
            let bindings: VariableBindings = POOL.iter().copied().zip(values).collect();

            let compiled = compile(&template, &bindings);

            prop_assert!(extract_variables(compiled.as_str()).is_empty());
            prop_assert!(!compiled.as_str().contains('{'), "compiled output contains '{{'");
            prop_assert_eq!(extract_variables(&template), before);
        }
    }
}

// =============================================================================
// Insertion
// =============================================================================

mod insertion {
    use super::*;

    proptest! {
        #[test]
        fn insert_clamps_and_places_token(
            text in ".{0,24}",
            offset in arb_offset(),
            name in "[A-Za-z0-9_]{1,8}",
        ) {
            let len = text.chars().count();
            let at = offset.min(len);
            let token = placeholder(&name);
            let token_len = token.chars().count();

            let (out, cursor) = insert_placeholder(&text, offset, &name);

            prop_assert_eq!(cursor, at + token_len);
            prop_assert_eq!(out.chars().count(), len + token_len);
            prop_assert_eq!(chars(&out, 0..at), chars(&text, 0..at));
            prop_assert_eq!(chars(&out, at..cursor), token);
            prop_assert_eq!(chars(&out, cursor..len + token_len), chars(&text, at..len));
            prop_assert!(extract_variables(&out).contains(&name));
        }

        #[test]
        fn trigger_replaces_only_a_preceding_brace(
            text in "[a{}é😀 ]{0,16}",
            offset in arb_offset(),
            name in "[A-Za-z0-9_]{1,8}",
        ) {
            let len = text.chars().count();
            let at = offset.min(len);
            let token = placeholder(&name);
            let token_len = token.chars().count();

            let (out, cursor) = complete_trigger(&text, offset, &name);

            if at > 0 && text.chars().nth(at - 1) == Some('{') {
                prop_assert_eq!(cursor, at - 1 + token_len);
                let expected = format!("{}{}{}", chars(&text, 0..at - 1), token, chars(&text, at..len));
                prop_assert_eq!(out, expected);
            } else {
                prop_assert_eq!((out, cursor), insert_placeholder(&text, offset, &name));
            }
        }
    }
}
