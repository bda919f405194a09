// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A fully in-memory partition: an inverted index plus its document table.

use crate::error::{IndexError, QueryError};
use crate::partition::Partition;
use crate::types::{occurrences, DocHit, DocId, PostingList, SearchResult};

use super::{DocTable, MemIndex};

/// In-memory partition produced by the crawler.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    index: MemIndex,
    docs: DocTable,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(index: MemIndex, docs: DocTable) -> Self {
        Self { index, docs }
    }

    pub fn index(&self) -> &MemIndex {
        &self.index
    }

    pub fn docs(&self) -> &DocTable {
        &self.docs
    }

    /// Register a document and return its id.
    pub fn add_document(&mut self, name: impl Into<String>) -> DocId {
        self.docs.add(name)
    }

    /// Record a word's positions in an already registered document.
    pub fn add_postings(
        &mut self,
        word: String,
        doc_id: DocId,
        positions: PostingList,
    ) -> Result<(), IndexError> {
        self.index.add_postings(word, doc_id, positions)
    }

    /// Single-partition AND search (see [`MemIndex::search`]).
    pub fn search<S: AsRef<str>>(&self, query: &[S]) -> Result<Vec<SearchResult>, QueryError> {
        self.index.search(query)
    }

    pub fn into_parts(self) -> (MemIndex, DocTable) {
        (self.index, self.docs)
    }
}

impl Partition for Corpus {
    fn lookup_word(&self, word: &str) -> Option<Vec<DocHit>> {
        self.index.get(word).map(|entry| {
            entry
                .postings()
                .iter()
                .map(|(&doc_id, positions)| DocHit {
                    doc_id,
                    count: occurrences(positions),
                })
                .collect()
        })
    }

    fn doc_name(&self, doc_id: DocId) -> Option<&str> {
        self.docs.name(doc_id)
    }
}
