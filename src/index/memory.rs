// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory inverted index.
//!
//! A two-level map: the outer table goes from a word's 64-bit fingerprint to
//! its [`WordPostings`], and each `WordPostings` maps a document to the
//! positions where the word occurs in it.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **UNIQUE_WORDS**: at most one entry per distinct word. A repeated insert
//!    reuses the entry and drops the caller's copy of the word.
//! 2. **NO_COLLISIONS**: the word stored under a fingerprint is byte-identical
//!    to every word later inserted under it. A mismatch is a fatal
//!    [`IndexError::FingerprintCollision`], not a silent merge.
//! 3. **UNIQUE_POSTINGS**: each `(word, doc_id)` pair is inserted once.
//! 4. **NON_EMPTY**: every posting list holds at least one position, so every
//!    word has at least one document.
//!
//! Searching takes `&self`. Once population is finished the index can be
//! shared between threads and queried concurrently.

use std::collections::btree_map;
use std::collections::hash_map;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::error::{IndexError, QueryError};
use crate::search::conjunction::RankAccumulator;
use crate::types::{occurrences, DocId, PostingList, Rank, SearchResult};
use crate::util::fingerprint::{word_fingerprint, BuildFingerprintHasher};

/// Positions of one word, per document.
///
/// Ordered by `DocId` so that iteration (and therefore tie-breaking in
/// search results) is deterministic.
pub type PostingStore = BTreeMap<DocId, PostingList>;

/// A word and every document it occurs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPostings {
    word: String,
    postings: PostingStore,
}

impl WordPostings {
    fn new(word: String) -> Self {
        Self {
            word,
            postings: PostingStore::new(),
        }
    }

    /// The word, exactly as first inserted.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// All documents containing the word, ascending by id.
    pub fn postings(&self) -> &PostingStore {
        &self.postings
    }

    /// Positions of the word in `doc_id`, if it occurs there.
    pub fn positions(&self, doc_id: DocId) -> Option<&PostingList> {
        self.postings.get(&doc_id)
    }

    /// Number of documents containing the word.
    pub fn doc_count(&self) -> usize {
        self.postings.len()
    }

    /// Occurrence count of the word in `doc_id`.
    #[inline]
    pub fn count(&self, doc_id: DocId) -> Option<Rank> {
        self.postings.get(&doc_id).map(occurrences)
    }
}

/// Word-level inverted index for one partition.
#[derive(Debug, Clone, Default)]
pub struct MemIndex {
    table: HashMap<u64, WordPostings, BuildFingerprintHasher>,
}

impl MemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words.
    pub fn num_words(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Look up a word.
    ///
    /// The fingerprint finds the bucket; the stored word must also match
    /// byte for byte, so a colliding word is reported as absent.
    pub fn get(&self, word: &str) -> Option<&WordPostings> {
        self.table
            .get(&word_fingerprint(word))
            .filter(|entry| entry.word == word)
    }

    /// Iterate over every word entry. Order follows the fingerprint table
    /// and is not meaningful.
    pub fn iter(&self) -> impl Iterator<Item = &WordPostings> {
        self.table.values()
    }

    /// Record that `word` occurs in `doc_id` at `positions`.
    ///
    /// Takes ownership of `word`. On the first sighting of a word the index
    /// keeps this `String`; on later sightings it is compared against the
    /// stored copy and dropped.
    ///
    /// Nothing is modified when an error is returned.
    pub fn add_postings(
        &mut self,
        word: String,
        doc_id: DocId,
        positions: PostingList,
    ) -> Result<(), IndexError> {
        if positions.is_empty() {
            return Err(IndexError::EmptyPostingList { word, doc_id });
        }

        let fingerprint = word_fingerprint(&word);
        let entry = match self.table.entry(fingerprint) {
            hash_map::Entry::Occupied(slot) => {
                let existing = slot.into_mut();
                if existing.word != word {
                    return Err(IndexError::FingerprintCollision {
                        fingerprint,
                        stored: existing.word.clone(),
                        inserted: word,
                    });
                }
                existing
            }
            hash_map::Entry::Vacant(slot) => {
                trace!(word = %word, fingerprint, "new word entry");
                slot.insert(WordPostings::new(word))
            }
        };

        match entry.postings.entry(doc_id) {
            btree_map::Entry::Occupied(_) => Err(IndexError::DuplicatePosting {
                word: entry.word.clone(),
                doc_id,
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(positions);
                Ok(())
            }
        }
    }

    /// AND query over this index.
    ///
    /// Every term must occur in a document for it to match. A matching
    /// document's rank is the sum of its occurrence counts over all terms.
    ///
    /// Results come back in ascending rank order. Equal ranks keep
    /// ascending `DocId` order.
    ///
    /// # Errors
    ///
    /// - [`QueryError::EmptyQuery`] if `query` has no terms
    /// - [`QueryError::NoMatch`] as soon as any term is unknown or the
    ///   running intersection becomes empty
    /// - [`QueryError::RankOverflow`] if a summed rank would overflow
    pub fn search<S: AsRef<str>>(&self, query: &[S]) -> Result<Vec<SearchResult>, QueryError> {
        let (first, rest) = query.split_first().ok_or(QueryError::EmptyQuery)?;

        let first = self.get(first.as_ref()).ok_or(QueryError::NoMatch)?;
        let mut acc = RankAccumulator::seed(
            first
                .postings
                .iter()
                .map(|(&doc_id, positions)| (doc_id, occurrences(positions))),
        );

        for term in rest {
            let term = term.as_ref();
            let Some(entry) = self.get(term) else {
                debug!(term, "term not in index");
                return Err(QueryError::NoMatch);
            };
            if !acc.intersect(|doc_id| entry.count(doc_id))? {
                debug!(term, "intersection became empty");
                return Err(QueryError::NoMatch);
            }
        }

        Ok(acc.into_ascending())
    }
}
