// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multi-partition query processing.
//!
//! Each partition is searched on its own: doc ids are partition-local, so an
//! intersection can never mix ids from two partitions. A term missing from
//! one partition only removes that partition's contribution. The surviving
//! documents are named through their own partition's doc table and appended
//! to one flat list, which is then sorted.
//!
//! # Result order
//!
//! Rank descending, then document name ascending (see [`QueryResult`]'s
//! `Ord`). Results with the same name from different partitions are kept as
//! separate entries: partitions are treated as disjoint corpora.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::binary::PartitionReader;
use crate::error::{PartitionError, QueryError};
use crate::partition::Partition;
use crate::types::QueryResult;
use crate::verify::contracts::check_query_results_sorted;

use super::conjunction::resolve_in_partition;

/// Resolves queries against a fixed, non-empty set of partitions.
///
/// The processor owns its partition handles and drops each exactly once.
/// To share loaded partitions between processors (one per worker thread,
/// say) hand it `&P` or `Arc<P>` handles instead.
#[derive(Debug)]
pub struct QueryProcessor<P> {
    partitions: Vec<P>,
}

impl<P: Partition> QueryProcessor<P> {
    /// Build a processor over already loaded partitions.
    pub fn new(partitions: Vec<P>) -> Result<Self, QueryError> {
        if partitions.is_empty() {
            return Err(QueryError::NoPartitions);
        }
        Ok(Self { partitions })
    }

    pub fn partitions(&self) -> &[P] {
        &self.partitions
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Resolve an AND query across every partition.
    ///
    /// An empty `Vec` means no partition matched; that is not an error.
    ///
    /// # Errors
    ///
    /// - [`QueryError::EmptyQuery`] if `query` has no terms
    /// - [`QueryError::MissingDocument`] if a matched doc id has no name in
    ///   its partition's doc table. The partition is corrupt and the query
    ///   is abandoned rather than answered partially.
    /// - [`QueryError::RankOverflow`] if a document's summed rank overflows
    pub fn process_query<S: AsRef<str>>(&self, query: &[S]) -> Result<Vec<QueryResult>, QueryError> {
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let mut merged = Vec::new();
        for (idx, partition) in self.partitions.iter().enumerate() {
            let Some(acc) = resolve_in_partition(partition, query)? else {
                debug!(partition = idx, "no match in partition");
                continue;
            };

            let results = acc.into_results();
            debug!(partition = idx, matches = results.len(), "partition matched");
            merged.reserve(results.len());
            for result in results {
                let name = partition
                    .doc_name(result.doc_id)
                    .ok_or(QueryError::MissingDocument {
                        partition: idx,
                        doc_id: result.doc_id,
                    })?;
                merged.push(QueryResult {
                    document_name: name.to_owned(),
                    rank: result.rank,
                });
            }
        }

        merged.sort();
        check_query_results_sorted(&merged);
        Ok(merged)
    }
}

impl QueryProcessor<PartitionReader> {
    /// Open every partition file and build a processor over them.
    ///
    /// `validate` is handed to each [`PartitionReader`] unchanged: when set,
    /// the file's CRC32 footer is checked before anything is decoded.
    /// Files are opened in parallel with the `parallel` feature; the
    /// processor keeps them in the order given.
    pub fn open<I, T>(paths: I, validate: bool) -> Result<Self, PartitionError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<Path>,
    {
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|path| path.as_ref().to_path_buf())
            .collect();
        if paths.is_empty() {
            return Err(PartitionError::NoPartitions);
        }

        #[cfg(feature = "parallel")]
        let readers = {
            use rayon::prelude::*;
            paths
                .par_iter()
                .map(|path| PartitionReader::open(path, validate))
                .collect::<Result<Vec<_>, _>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let readers = paths
            .iter()
            .map(|path| PartitionReader::open(path, validate))
            .collect::<Result<Vec<_>, _>>()?;

        info!(partitions = readers.len(), validate, "opened partitions");
        Ok(Self {
            partitions: readers,
        })
    }
}
