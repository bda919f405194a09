// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The read interface every partition exposes to the query processor.
//!
//! A partition is one independently built index over a slice of the corpus:
//! a crawl of one directory, an index file from another machine. The query
//! processor needs exactly two things from it: which documents contain a
//! word (and how often), and what a document id is called.
//!
//! Implementations:
//! - [`Corpus`](crate::Corpus): crawled in-process, held in memory
//! - [`PartitionReader`](crate::binary::PartitionReader): loaded from a `.cidx` file

use std::sync::Arc;

use crate::types::{DocHit, DocId};

/// Word lookup and document naming for one partition.
pub trait Partition {
    /// Documents containing `word`, with per-document occurrence counts.
    ///
    /// Returns `None` when the word is unknown. A returned list is never
    /// empty and is sorted by ascending `doc_id` without duplicates.
    fn lookup_word(&self, word: &str) -> Option<Vec<DocHit>>;

    /// Display name of a document in this partition.
    fn doc_name(&self, doc_id: DocId) -> Option<&str>;
}

impl<P: Partition + ?Sized> Partition for &P {
    fn lookup_word(&self, word: &str) -> Option<Vec<DocHit>> {
        (**self).lookup_word(word)
    }

    fn doc_name(&self, doc_id: DocId) -> Option<&str> {
        (**self).doc_name(doc_id)
    }
}

impl<P: Partition + ?Sized> Partition for Box<P> {
    fn lookup_word(&self, word: &str) -> Option<Vec<DocHit>> {
        (**self).lookup_word(word)
    }

    fn doc_name(&self, doc_id: DocId) -> Option<&str> {
        (**self).doc_name(doc_id)
    }
}

impl<P: Partition + ?Sized> Partition for Arc<P> {
    fn lookup_word(&self, word: &str) -> Option<Vec<DocHit>> {
        (**self).lookup_word(word)
    }

    fn doc_name(&self, doc_id: DocId) -> Option<&str> {
        (**self).doc_name(doc_id)
    }
}
