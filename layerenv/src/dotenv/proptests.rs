//! Property-based tests for the `.env` parser.

use super::parser::{parse, ParseOptions};
use proptest::prelude::*;

// Keys the line format accepts.
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_.-]{0,15}"
}

// Values without quotes, backslashes or line breaks and no surrounding blanks.
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:@-]([A-Za-z0-9 _./:@=-]{0,20}[A-Za-z0-9_./:@-])?"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Unquoted values survive surrounding whitespace unchanged.
    #[test]
    fn unquoted_values_are_trimmed(
        key in key_strategy(),
        value in plain_value_strategy(),
        left in " {0,4}",
        right in "[ \t]{0,4}",
    ) {
        let line = format!("{key}={left}{value}{right}");
        let vars = parse(&line, &ParseOptions::default());
        prop_assert_eq!(vars.get(&key), Some(&value));
    }

    // Single-quoted values come back exactly as written between the quotes.
    #[test]
    fn single_quoted_values_are_literal(
        key in key_strategy(),
        value in "[A-Za-z0-9 \\\\n\"]{0,20}",
    ) {
        let line = format!("{key}='{value}'");
        let vars = parse(&line, &ParseOptions::default());
        prop_assert_eq!(vars.get(&key), Some(&value));
    }

    // Double-quoted values only ever differ by the \n expansion.
    #[test]
    fn double_quoted_values_expand_newlines(
        key in key_strategy(),
        parts in prop::collection::vec("[A-Za-z0-9 ]{0,8}", 1..5),
    ) {
        let written = parts.join("\\n");
        let line = format!("{key}=\"{written}\"");
        let vars = parse(&line, &ParseOptions::default());
        prop_assert_eq!(vars.get(&key), Some(&parts.join("\n")));
    }

    // The last assignment of a key wins regardless of the line ending used.
    #[test]
    fn last_assignment_wins(
        key in key_strategy(),
        values in prop::collection::vec(plain_value_strategy(), 1..6),
        ending in prop::sample::select(vec!["\n", "\r", "\r\n"]),
    ) {
        let source = values
            .iter()
            .map(|v| format!("{key}={v}"))
            .collect::<Vec<_>>()
            .join(ending);
        let vars = parse(&source, &ParseOptions::default());
        prop_assert_eq!(vars.len(), 1);
        prop_assert_eq!(vars.get(&key), values.last());
    }

    // Arbitrary input never panics and only yields well-formed keys.
    #[test]
    fn arbitrary_input_yields_valid_keys(source in any::<Vec<u8>>()) {
        let vars = parse(&source, &ParseOptions::default());
        for key in vars.keys() {
            prop_assert!(!key.is_empty());
            prop_assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')));
        }
    }
}
