// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of an index and its query results.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **PostingList**: never empty. A word is recorded against a document the
//!   first time it is seen there, and every later sighting appends a position.
//!
//! - **SearchResult**: `rank` is the sum of posting list lengths for every
//!   query term. Nothing decays, nothing is weighted, and a sum that would
//!   overflow is an error rather than a clamped value.
//!
//! - **DocHit**: lists returned by a partition lookup are sorted by `doc_id`
//!   with no duplicates, so intersection can binary search them.
//!
//! `DocId`s are partition-local. The same number in two partitions names two
//! unrelated documents; only the partition's own doc table can resolve it.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Document identifier, local to one partition.
///
/// Ids handed out by [`DocTable`](crate::DocTable) start at 1. Zero is never
/// assigned, which keeps it free as a sentinel in the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u64);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Byte offset of a word's first byte within its document.
pub type Position = u32;

/// Positions of one word inside one document, in occurrence order.
pub type PostingList = Vec<Position>;

/// Accumulated occurrence count across all matched query terms.
pub type Rank = u64;

// Posting list lengths widen into a Rank without loss.
const _: () = assert!(usize::BITS <= Rank::BITS);

/// Number of occurrences a posting list records.
#[inline]
pub(crate) fn occurrences(positions: &PostingList) -> Rank {
    positions.len() as Rank
}

/// A single-partition match produced by [`MemIndex::search`](crate::MemIndex::search).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc_id: DocId,
    pub rank: Rank,
}

/// One element of a partition word lookup: a document and how many times the
/// word occurs in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocHit {
    pub doc_id: DocId,
    pub count: Rank,
}

/// A merged cross-partition match produced by
/// [`QueryProcessor::process_query`](crate::QueryProcessor::process_query).
///
/// Ordering is the one the processor sorts by: highest rank first, then
/// document name ascending. Two results with equal rank and name compare
/// equal even when they came from different partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub document_name: String,
    pub rank: Rank,
}

impl Ord for QueryResult {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| self.document_name.cmp(&other.document_name))
    }
}

impl PartialOrd for QueryResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
