// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The AND-with-rank-accumulation step shared by every search path.
//!
//! Seed with the first term's documents, then let each further term filter
//! the survivors and add its occurrence count. Filtering uses
//! `Vec::retain_mut`, so results are removed while traversing without any
//! iterator bookkeeping.

use crate::error::QueryError;
use crate::partition::Partition;
use crate::types::{DocHit, DocId, Rank, SearchResult};
use crate::verify::contracts::{check_hits_sorted, check_results_ascending};

/// Running result set of a conjunctive query.
#[derive(Debug, Clone, Default)]
pub(crate) struct RankAccumulator {
    results: Vec<SearchResult>,
}

impl RankAccumulator {
    /// Start from the first term's `(doc_id, count)` pairs.
    pub(crate) fn seed(hits: impl IntoIterator<Item = (DocId, Rank)>) -> Self {
        Self {
            results: hits
                .into_iter()
                .map(|(doc_id, rank)| SearchResult { doc_id, rank })
                .collect(),
        }
    }

    /// Keep only documents for which `count_for` returns a count, adding it
    /// to their rank. Returns `Ok(false)` once nothing is left.
    ///
    /// A rank that would overflow fails the whole step with
    /// [`QueryError::RankOverflow`].
    pub(crate) fn intersect(
        &mut self,
        mut count_for: impl FnMut(DocId) -> Option<Rank>,
    ) -> Result<bool, QueryError> {
        let mut overflowed = None;
        self.results.retain_mut(|result| match count_for(result.doc_id) {
            Some(count) => {
                match result.rank.checked_add(count) {
                    Some(rank) => result.rank = rank,
                    None => {
                        overflowed.get_or_insert(result.doc_id);
                    }
                }
                true
            }
            None => false,
        });
        if let Some(doc_id) = overflowed {
            return Err(QueryError::RankOverflow { doc_id });
        }
        Ok(!self.results.is_empty())
    }

    /// [`intersect`](Self::intersect) against a doc-id sorted hit list.
    pub(crate) fn intersect_hits(&mut self, hits: &[DocHit]) -> Result<bool, QueryError> {
        check_hits_sorted(hits);
        self.intersect(|doc_id| {
            hits.binary_search_by_key(&doc_id, |hit| hit.doc_id)
                .ok()
                .map(|i| hits[i].count)
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results sorted by ascending rank. The sort is stable, so equal ranks
    /// keep seeding order.
    pub(crate) fn into_ascending(mut self) -> Vec<SearchResult> {
        self.results.sort_by_key(|result| result.rank);
        check_results_ascending(&self.results);
        self.results
    }

    /// Results in seeding order.
    pub(crate) fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}

/// Resolve an AND query against one partition's word lookups.
///
/// Returns `Ok(None)` when the partition cannot satisfy the query: the first
/// term is unknown, a later term is unknown, or the intersection empties.
pub(crate) fn resolve_in_partition<P, S>(
    partition: &P,
    query: &[S],
) -> Result<Option<RankAccumulator>, QueryError>
where
    P: Partition + ?Sized,
    S: AsRef<str>,
{
    let Some((first, rest)) = query.split_first() else {
        return Ok(None);
    };
    let Some(hits) = partition.lookup_word(first.as_ref()) else {
        return Ok(None);
    };
    check_hits_sorted(&hits);
    let mut acc = RankAccumulator::seed(hits.iter().map(|hit| (hit.doc_id, hit.count)));
    if acc.is_empty() {
        return Ok(None);
    }

    for term in rest {
        let Some(hits) = partition.lookup_word(term.as_ref()) else {
            return Ok(None);
        };
        if !acc.intersect_hits(&hits)? {
            return Ok(None);
        }
    }
    Ok(Some(acc))
}
