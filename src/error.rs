// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, one per layer.
//!
//! The split follows how callers react. `QueryError::EmptyQuery` is the
//! caller's fault and `QueryError::NoMatch` is an ordinary outcome. Everything
//! in `IndexError`, `QueryError::RankOverflow` and `QueryError::MissingDocument`
//! means the index itself is broken: the operation stops and nothing partial is handed back.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::DocId;

/// Integrity faults raised while populating a [`MemIndex`](crate::MemIndex).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The same `(word, doc_id)` pair was inserted twice.
    #[error("duplicate posting list for word '{word}' in document {doc_id}")]
    DuplicatePosting { word: String, doc_id: DocId },

    /// Two different words produced the same 64-bit fingerprint.
    #[error("fingerprint {fingerprint:#018x} collides: stored '{stored}', inserted '{inserted}'")]
    FingerprintCollision {
        fingerprint: u64,
        stored: String,
        inserted: String,
    },

    /// Posting lists must hold at least one position.
    #[error("empty posting list for word '{word}' in document {doc_id}")]
    EmptyPostingList { word: String, doc_id: DocId },
}

/// Query-time failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query had zero terms.
    #[error("empty query")]
    EmptyQuery,

    /// At least one term matched no document, so the AND query cannot succeed.
    #[error("no match")]
    NoMatch,

    /// A query processor needs at least one partition.
    #[error("query processor requires at least one partition")]
    NoPartitions,

    /// Summing occurrence counts for a document overflowed its rank.
    #[error("rank of document {doc_id} overflows")]
    RankOverflow { doc_id: DocId },

    /// A doc id present in a partition's word index is absent from its doc table.
    #[error("partition {partition}: document {doc_id} is indexed but has no name")]
    MissingDocument { partition: usize, doc_id: DocId },
}

/// Failures reading or writing an on-disk partition.
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid magic: expected CNCD, got {0:?}")]
    BadMagic([u8; 4]),

    #[error("invalid footer magic: expected DCNC, got {0:?}")]
    BadFooterMagic([u8; 4]),

    #[error("unsupported partition version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("truncated partition: {0}")]
    Truncated(&'static str),

    #[error("checksum mismatch: footer says {expected:#010x}, content hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("malformed partition: {0}")]
    Malformed(String),

    #[error("partition exceeds format limits: {0}")]
    TooLarge(String),

    #[error("partition list is empty")]
    NoPartitions,
}

impl PartitionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PartitionError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while crawling a directory into a [`Corpus`](crate::Corpus).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("crawl root {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("index integrity fault while indexing {path}: {source}")]
    Index {
        path: PathBuf,
        #[source]
        source: IndexError,
    },
}
