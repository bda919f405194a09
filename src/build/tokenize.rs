// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Splitting text into words.
//!
//! A word is a maximal run of alphabetic characters. Combining marks that
//! follow a letter stay in the word, so decomposed text ("cafe" + U+0301)
//! is one word rather than two. Each word is run through
//! [`normalize`](crate::normalize) before it reaches the index.
//!
//! Positions are byte offsets into the original text, taken before
//! normalization, so they always point at the word's first byte on disk.

use std::collections::BTreeMap;

use tracing::warn;

use crate::binary::MAX_STRING_LEN;
use crate::types::{Position, PostingList};
use crate::util::normalize::{is_combining_mark, normalize};

/// Iterate `(byte_offset, raw_word)` over the alphabetic runs of `text`.
fn word_spans(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        // Skip to the next letter
        let start = loop {
            let (i, c) = chars.next()?;
            if c.is_alphabetic() {
                break i;
            }
        };
        let mut end = text.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_alphabetic() || is_combining_mark(c) {
                chars.next();
            } else {
                end = i;
                break;
            }
        }
        Some((start, &text[start..end]))
    })
}

/// Map every normalized word in `text` to the byte offsets it occurs at.
///
/// Offsets in each posting list ascend. Words whose offset does not fit a
/// [`Position`] are dropped, which only happens past 4 GiB. Words longer than
/// [`MAX_STRING_LEN`] bytes are dropped too: a partition file cannot hold them.
pub fn parse_word_positions(text: &str) -> BTreeMap<String, PostingList> {
    let mut words: BTreeMap<String, PostingList> = BTreeMap::new();
    for (offset, raw) in word_spans(text) {
        let Ok(position) = Position::try_from(offset) else {
            break;
        };
        let word = normalize(raw);
        if word.is_empty() {
            continue;
        }
        if word.len() > MAX_STRING_LEN {
            warn!(offset, bytes = word.len(), "dropping overlong word");
            continue;
        }
        words.entry(word).or_default().push(position);
    }
    words
}

/// Split a query line into normalized terms, in order.
///
/// Uses the same word rules as [`parse_word_positions`], so anything a
/// document was indexed under can be typed back as a query. Repeated terms
/// are kept.
pub fn query_terms(line: &str) -> Vec<String> {
    word_spans(line)
        .map(|(_, raw)| normalize(raw))
        .filter(|word| !word.is_empty())
        .collect()
}
