// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary text in, identical answers out of the partition file.

#![no_main]

use concord::{
    parse_word_positions, query_terms, write_partition, Corpus, PartitionReader, QueryProcessor,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|docs: Vec<String>| {
    let mut corpus = Corpus::new();
    for (i, text) in docs.iter().take(16).enumerate() {
        let doc_id = corpus.add_document(format!("doc{i}"));
        for (word, positions) in parse_word_positions(text) {
            corpus
                .add_postings(word, doc_id, positions)
                .expect("parsed words are unique per document");
        }
    }

    let bytes = write_partition(&corpus).expect("small corpus fits the format");
    let reader = PartitionReader::from_bytes(bytes, true).expect("fresh partition validates");

    let from_file = QueryProcessor::new(vec![reader]).expect("one partition");
    let in_memory = QueryProcessor::new(vec![corpus]).expect("one partition");

    for text in docs.iter().take(4) {
        let terms = query_terms(text);
        if terms.is_empty() {
            continue;
        }
        assert_eq!(
            from_file.process_query(&terms).expect("query has terms"),
            in_memory.process_query(&terms).expect("query has terms"),
        );
    }
});
