// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Crawling a directory tree into a [`Corpus`].
//!
//! The expensive part of a crawl is reading and tokenizing files, and that is
//! embarrassingly parallel. Rayon reads and parses every file; the results
//! come back in walk order and a single thread feeds them to the index, so
//! doc ids depend only on the tree, not on scheduling.
//!
//! # INVARIANTS
//!
//! 1. Files are visited in sorted path order; the n-th indexed file gets
//!    doc id n.
//! 2. Every indexed file is registered in the doc table, even if it holds no
//!    words.
//! 3. An index integrity fault aborts the crawl; nothing partial is returned.
//! 4. The finished index is well-formed (checked in debug builds).

mod config;
mod tokenize;

pub use config::{Config, CrawlConfig, SearchConfig, DEFAULT_MAX_FILE_BYTES};
pub use tokenize::{parse_word_positions, query_terms};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::error::BuildError;
use crate::index::Corpus;
use crate::types::PostingList;
use crate::verify::contracts::check_mem_index_well_formed;

type ParsedDocument = BTreeMap<String, PostingList>;

/// Walk `root`, index every accepted file, and return the populated corpus.
///
/// Documents are named by their path as walked (`root` joined with the path
/// below it). Unreadable and non-UTF-8 files are skipped with a warning. An
/// empty tree gives an empty corpus.
pub fn crawl(root: impl AsRef<Path>, config: &CrawlConfig) -> Result<Corpus, BuildError> {
    let root = root.as_ref();
    let meta = fs::metadata(root).map_err(|source| BuildError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(BuildError::NotADirectory(root.to_path_buf()));
    }

    let files = collect_files(root, config);
    debug!(root = %root.display(), files = files.len(), "walk complete");

    let parsed = read_documents(&files);

    let mut corpus = Corpus::new();
    for (path, words) in files.iter().zip(parsed) {
        let Some(words) = words else {
            continue;
        };
        let Some(name) = path.to_str() else {
            warn!(path = %path.display(), "skipping file with non-UTF-8 path");
            continue;
        };
        let doc_id = corpus.add_document(name);
        for (word, positions) in words {
            corpus
                .add_postings(word, doc_id, positions)
                .map_err(|source| BuildError::Index {
                    path: path.clone(),
                    source,
                })?;
        }
    }
    debug_assert!(check_mem_index_well_formed(corpus.index()));

    info!(
        root = %root.display(),
        documents = corpus.docs().len(),
        words = corpus.index().num_words(),
        "crawl complete"
    );
    Ok(corpus)
}

/// Collect the files a crawl should index, in sorted order.
fn collect_files(root: &Path, config: &CrawlConfig) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    // hidden(true) skips dotfiles, so invert include_hidden
    builder
        .hidden(!config.include_hidden)
        .follow_links(config.follow_links)
        .ignore(config.respect_ignore)
        .git_ignore(config.respect_ignore)
        .git_global(config.respect_ignore)
        .git_exclude(config.respect_ignore)
        .parents(config.respect_ignore)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if !config.accepts_extension(path) {
            continue;
        }
        match entry.metadata() {
            Ok(meta) if meta.len() > config.max_file_bytes => {
                debug!(path = %path.display(), bytes = meta.len(), "skipping oversized file");
                continue;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file without metadata");
                continue;
            }
        }
        files.push(path.to_path_buf());
    }
    files
}

/// Read and tokenize one file. `None` means the file is skipped.
fn read_document(path: &Path) -> Option<ParsedDocument> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable file");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Some(parse_word_positions(&text)),
        Err(_) => {
            warn!(path = %path.display(), "skipping non-UTF-8 file");
            None
        }
    }
}

/// Create a progress style for the crawl progress bar
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Read every file in parallel, keeping walk order.
#[cfg(feature = "parallel")]
fn read_documents(files: &[PathBuf]) -> Vec<Option<ParsedDocument>> {
    use rayon::prelude::*;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(create_progress_style());
    progress.set_prefix("Reading");
    progress.set_message("files...");

    let parsed = files
        .par_iter()
        .map(|path| {
            let doc = read_document(path);
            progress.inc(1);
            doc
        })
        .collect();

    progress.finish_and_clear();
    parsed
}

#[cfg(not(feature = "parallel"))]
fn read_documents(files: &[PathBuf]) -> Vec<Option<ParsedDocument>> {
    files.iter().map(|path| read_document(path)).collect()
}
