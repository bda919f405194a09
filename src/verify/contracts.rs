// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for ordering and well-formedness.
//!
//! 1. **Zero-cost in release builds** (`debug_assert!`)
//! 2. **Early failure detection** during development and tests
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function              | Invariant                                   |
//! |--------------------------------|---------------------------------------------|
//! | `check_hits_sorted`            | partition lookups: doc ids strictly ascending |
//! | `check_results_ascending`      | single-index search: ranks non-decreasing     |
//! | `check_query_results_sorted`   | merged results: rank desc, then name asc      |
//! | `check_mem_index_well_formed`  | no empty posting lists, words unique          |

use crate::index::MemIndex;
use crate::types::{DocHit, QueryResult, SearchResult};

// ============================================================================
// ORDERING CONTRACTS
// ============================================================================

/// Check that a partition lookup is sorted by strictly ascending doc id.
///
/// # Panics (debug builds only)
/// Panics if two adjacent hits are out of order or share a doc id.
#[inline]
pub fn check_hits_sorted(hits: &[DocHit]) {
    #[cfg(debug_assertions)]
    for (i, pair) in hits.windows(2).enumerate() {
        debug_assert!(
            pair[0].doc_id < pair[1].doc_id,
            "Contract violation: DocHit list not strictly ascending at {}: {} then {}",
            i,
            pair[0].doc_id,
            pair[1].doc_id
        );
    }
    #[cfg(not(debug_assertions))]
    let _ = hits;
}

/// Check that single-index search results are in ascending rank order.
#[inline]
pub fn check_results_ascending(results: &[SearchResult]) {
    debug_assert!(
        results.windows(2).all(|pair| pair[0].rank <= pair[1].rank),
        "Contract violation: search results not in ascending rank order"
    );
}

/// Check that merged results follow the processor's total order.
#[inline]
pub fn check_query_results_sorted(results: &[QueryResult]) {
    debug_assert!(
        results.windows(2).all(|pair| pair[0] <= pair[1]),
        "Contract violation: merged results not sorted by (rank desc, name asc)"
    );
}

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Check that a fully built index is well-formed (debug assertion).
///
/// Returns `true` so it can be used inside `debug_assert!` at call sites and
/// asserted on directly in tests.
pub fn check_mem_index_well_formed(index: &MemIndex) -> bool {
    let mut seen = std::collections::HashSet::new();
    for entry in index.iter() {
        if !seen.insert(entry.word()) {
            return false;
        }
        if entry.postings().is_empty() {
            return false;
        }
        if entry.postings().values().any(Vec::is_empty) {
            return false;
        }
        if index.get(entry.word()) != Some(entry) {
            return false;
        }
    }
    true
}
