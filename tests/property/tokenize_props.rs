//! Tokenizer laws: offsets point at words, queries find what was indexed.

use concord::{normalize, parse_word_positions, query_terms};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every recorded offset starts a word that normalizes to its key.
    #[test]
    fn prop_offsets_point_at_words(text in "[a-zA-Z ,.!0-9]{0,80}") {
        for (word, positions) in parse_word_positions(&text) {
            prop_assert!(!positions.is_empty());
            prop_assert!(positions.windows(2).all(|p| p[0] < p[1]));
            for pos in positions {
                let tail = &text[pos as usize..];
                let raw: String = tail.chars().take_while(|c| c.is_alphabetic()).collect();
                prop_assert_eq!(normalize(&raw), word.clone());
            }
        }
    }

    /// Typing a document back as a query produces only indexed words.
    #[test]
    fn prop_query_terms_are_indexed_words(text in "[a-zA-Z ,.!0-9]{0,80}") {
        let indexed = parse_word_positions(&text);
        for term in query_terms(&text) {
            prop_assert!(indexed.contains_key(&term));
        }
    }

    /// Query terms never contain separators.
    #[test]
    fn prop_terms_are_single_words(line in "\\PC{0,40}") {
        for term in query_terms(&line) {
            prop_assert!(!term.is_empty());
            prop_assert!(!term.contains(char::is_whitespace));
        }
    }
}
