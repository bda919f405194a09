//! Word-level inverted index with multi-partition AND queries.
//!
//! A [`MemIndex`] maps each word (keyed by its 64-bit FNV-1a fingerprint) to
//! the documents that contain it and the byte positions it occurs at. A query
//! is a list of words; a document matches when it contains every one of them,
//! and its rank is the total number of occurrences. A [`QueryProcessor`] runs
//! the same query over several independent partitions and merges the hits
//! into one list of `(document name, rank)`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │    build     │────▶│    index     │────▶│     binary       │
//! │ (crawl,      │     │ (MemIndex,   │     │ (write_partition,│
//! │  tokenize)   │     │  DocTable)   │     │  PartitionReader)│
//! └──────────────┘     └──────────────┘     └──────────────────┘
//!                             │                      │
//!                             ▼                      ▼
//!                      ┌─────────────────────────────────────┐
//!                      │   partition::Partition  (trait)     │
//!                      └─────────────────────────────────────┘
//!                                        │
//!                                        ▼
//!                      ┌─────────────────────────────────────┐
//!                      │   search (RankAccumulator,          │
//!                      │           QueryProcessor)           │
//!                      └─────────────────────────────────────┘
//! ```
//!
//! `verify::contracts` holds the debug-build checks both query paths run on
//! their output.
//!
//! # Usage
//!
//! ```
//! use concord::{Corpus, QueryProcessor};
//!
//! let mut corpus = Corpus::new();
//! let doc = corpus.add_document("fruit.txt");
//! corpus.add_postings("apple".to_string(), doc, vec![0, 12]).unwrap();
//!
//! let processor = QueryProcessor::new(vec![corpus]).unwrap();
//! let results = processor.process_query(&["apple"]).unwrap();
//! assert_eq!(results[0].document_name, "fruit.txt");
//! assert_eq!(results[0].rank, 2);
//! ```

// Module declarations
pub mod binary;
pub mod build;
mod error;
mod index;
mod partition;
mod search;
pub mod testing;
mod types;
mod util;
pub mod verify;

// Re-exports for public API
pub use binary::{write_partition, PartitionReader, PartitionWriter};
pub use build::{crawl, parse_word_positions, query_terms, Config, CrawlConfig, SearchConfig};
pub use error::{BuildError, IndexError, PartitionError, QueryError};
pub use index::{Corpus, DocTable, MemIndex, PostingStore, WordPostings};
pub use partition::Partition;
pub use search::QueryProcessor;
pub use types::{DocHit, DocId, Position, PostingList, QueryResult, Rank, SearchResult};
pub use util::fingerprint::{fingerprint, word_fingerprint, BuildFingerprintHasher, FingerprintHasher};
pub use util::normalize::normalize;
