//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use concord::{Corpus, DocId, PartitionWriter, QueryResult, Rank, SearchResult};

// Re-export canonical test utilities from concord::testing.
// Not every test binary uses both.
#[allow(unused_imports)]
pub use concord::testing::{corpus_from, fruit_corpus};

// ============================================================================
// FIXTURES
// ============================================================================

/// A second partition that overlaps the fruit corpus in vocabulary and, for
/// `doc1.txt`, in document name.
pub fn pantry_corpus() -> Corpus {
    corpus_from(&[
        ("pantry/jam.txt", vec![("apple", vec![0]), ("jam", vec![6])]),
        (
            "pantry/pie.txt",
            vec![("apple", vec![0, 20]), ("banana", vec![5]), ("crust", vec![9])],
        ),
        ("doc1.txt", vec![("apple", vec![4])]),
    ])
}

// ============================================================================
// RESULT HELPERS
// ============================================================================

/// `(document name, rank)` pairs of merged results, in order.
pub fn ranked(results: &[QueryResult]) -> Vec<(&str, Rank)> {
    results
        .iter()
        .map(|r| (r.document_name.as_str(), r.rank))
        .collect()
}

/// `(document name, rank)` pairs of single-index results, in order.
pub fn named<'a>(corpus: &'a Corpus, results: &[SearchResult]) -> Vec<(&'a str, Rank)> {
    results
        .iter()
        .map(|r| (corpus.docs().name(r.doc_id).expect("result has a name"), r.rank))
        .collect()
}

pub fn doc(corpus: &Corpus, name: &str) -> DocId {
    corpus.docs().id(name).expect("fixture document exists")
}

// ============================================================================
// FILESYSTEM HELPERS
// ============================================================================

/// Create `files` (relative path, contents) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dirs");
        }
        fs::write(&path, contents).expect("write fixture file");
    }
}

/// Serialize `corpus` into `dir/name` and return the path.
pub fn write_partition_file(dir: &Path, name: &str, corpus: &Corpus) -> PathBuf {
    let path = dir.join(name);
    PartitionWriter::new(&path)
        .write(corpus)
        .expect("write partition");
    path
}
