// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Partition file parsing under adversarial input.
//!
//! A crafted `.cidx` file should produce an error, never a panic or a huge
//! allocation: varints that decode to u64::MAX, headers claiming more data
//! than exists, CRCs that lie about their content.

#![no_main]

use concord::{Partition, PartitionReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Validation on: CRC plus a decode of every posting block.
    if let Ok(reader) = PartitionReader::from_bytes(data.to_vec(), true) {
        let words: Vec<String> = reader.words().map(str::to_string).collect();
        for word in &words {
            // A validated partition has only decodable, non-empty blocks.
            let hits = reader
                .lookup(word)
                .expect("validated block decodes")
                .expect("directory word has a block");
            assert!(!hits.is_empty());
            assert!(hits.windows(2).all(|w| w[0].doc_id < w[1].doc_id));
        }
    }

    // Validation off: lookups may fail but must not panic.
    if let Ok(reader) = PartitionReader::from_bytes(data.to_vec(), false) {
        let words: Vec<String> = reader.words().take(64).map(str::to_string).collect();
        for word in &words {
            if let Some(hits) = reader.lookup_word(word) {
                for hit in hits {
                    let _ = reader.doc_name(hit.doc_id);
                }
            }
        }
    }
});
