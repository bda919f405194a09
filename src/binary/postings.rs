// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting block encoding/decoding.
//!
//! A posting block holds everything one word knows: which documents contain
//! it and where. Doc ids are delta-encoded, since they are written in
//! ascending order. Positions are delta-encoded too, through zigzag, because
//! a posting list keeps the order it was inserted in and that order is not
//! required to be ascending.
//!
//! ```text
//! doc_count: varint
//! for each document (ascending doc id):
//!   doc_id_delta:   varint   (from previous doc id, first from 0)
//!   position_count: varint   (>= 1)
//!   for each position:
//!     zigzag(position - previous position): varint
//! ```
//!
//! # References
//!
//! - **Delta Encoding for Postings**: Zobel & Moffat (2006): "Inverted Files
//!   for Text Search Engines", ACM Computing Surveys.

use crate::error::PartitionError;
use crate::index::PostingStore;
use crate::types::{occurrences, DocHit, DocId, PostingList, Position};

use super::encoding::{decode_zigzag, encode_varint, encode_zigzag, read_count, read_varint};
use super::header::MAX_POSTING_SIZE;

// ============================================================================
// ENCODING
// ============================================================================

/// Encode one word's postings as a block.
pub fn encode_postings(postings: &PostingStore, buf: &mut Vec<u8>) {
    encode_varint(postings.len() as u64, buf);

    let mut prev_doc = 0u64;
    for (doc_id, positions) in postings {
        encode_varint(doc_id.get() - prev_doc, buf);
        prev_doc = doc_id.get();

        encode_varint(positions.len() as u64, buf);
        let mut prev_pos = 0i64;
        for &position in positions {
            let position = i64::from(position);
            encode_varint(encode_zigzag(position - prev_pos), buf);
            prev_pos = position;
        }
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a posting block into `(doc_id, positions)` pairs, ascending by id.
///
/// The block must be consumed exactly and name at least one document; doc
/// ids must strictly ascend and every posting list must be non-empty.
pub fn decode_postings(bytes: &[u8]) -> Result<Vec<(DocId, PostingList)>, PartitionError> {
    let mut pos = 0;
    // Each document needs at least 3 bytes (delta, count, one position).
    let doc_count = read_count(bytes, &mut pos, MAX_POSTING_SIZE.min(bytes.len() / 3), "doc count")?;
    if doc_count == 0 {
        return Err(PartitionError::Malformed("posting block names no documents".into()));
    }

    let mut entries = Vec::with_capacity(doc_count);
    let mut prev_doc = 0u64;

    for i in 0..doc_count {
        let delta = read_varint(bytes, &mut pos)?;
        if i > 0 && delta == 0 {
            return Err(PartitionError::Malformed(format!(
                "document {} repeated in posting block",
                prev_doc
            )));
        }
        let doc_id = prev_doc
            .checked_add(delta)
            .ok_or_else(|| PartitionError::Malformed("doc id overflows u64".into()))?;
        prev_doc = doc_id;

        let remaining = bytes.len().saturating_sub(pos);
        let position_count = read_count(bytes, &mut pos, MAX_POSTING_SIZE.min(remaining), "position count")?;
        if position_count == 0 {
            return Err(PartitionError::Malformed(format!(
                "empty posting list for document {}",
                doc_id
            )));
        }

        let mut positions = Vec::with_capacity(position_count);
        let mut prev_pos = 0i64;
        for _ in 0..position_count {
            let delta = decode_zigzag(read_varint(bytes, &mut pos)?);
            let position = prev_pos
                .checked_add(delta)
                .and_then(|p| Position::try_from(p).ok())
                .ok_or_else(|| {
                    PartitionError::Malformed(format!("position out of range in document {}", doc_id))
                })?;
            positions.push(position);
            prev_pos = i64::from(position);
        }

        entries.push((DocId(doc_id), positions));
    }

    if pos != bytes.len() {
        return Err(PartitionError::Malformed(format!(
            "{} trailing bytes after posting block",
            bytes.len() - pos
        )));
    }
    Ok(entries)
}

/// Decode a block down to per-document occurrence counts.
pub fn decode_hits(bytes: &[u8]) -> Result<Vec<DocHit>, PartitionError> {
    decode_postings(bytes).map(|entries| {
        entries
            .into_iter()
            .map(|(doc_id, positions)| DocHit {
                doc_id,
                count: occurrences(&positions),
            })
            .collect()
    })
}
