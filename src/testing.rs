// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so every test suite builds the same corpora.

#![doc(hidden)]

use crate::index::Corpus;
use crate::types::PostingList;

/// Build a corpus from `(document name, [(word, positions)])` pairs.
///
/// Documents get ids in the order given, starting at 1.
///
/// # Panics
///
/// Panics if the fixture repeats a `(word, document)` pair.
pub fn corpus_from(docs: &[(&str, Vec<(&str, PostingList)>)]) -> Corpus {
    let mut corpus = Corpus::new();
    for (name, words) in docs {
        let doc_id = corpus.add_document(*name);
        for (word, positions) in words {
            corpus
                .add_postings((*word).to_string(), doc_id, positions.clone())
                .expect("fixture must not repeat a (word, doc) pair");
        }
    }
    corpus
}

/// The two-document fruit corpus:
///
/// - `doc1.txt`: "apple" ×3, "banana" ×1
/// - `doc2.txt`: "apple" ×1
pub fn fruit_corpus() -> Corpus {
    corpus_from(&[
        ("doc1.txt", vec![("apple", vec![0, 12, 40]), ("banana", vec![6])]),
        ("doc2.txt", vec![("apple", vec![3])]),
    ])
}
