// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Serializing a [`Corpus`] into a partition file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PartitionError;
use crate::index::{Corpus, WordPostings};

use super::encoding::{encode_doc_table, encode_string, encode_varint};
use super::header::{
    FormatFlags, PartitionFooter, PartitionHeader, MAX_DOC_COUNT, MAX_FILE_SIZE,
    MAX_POSTING_SIZE, MAX_STRING_LEN, MAX_WORD_COUNT, VERSION,
};
use super::postings::encode_postings;

/// Serialize a corpus into partition bytes.
///
/// Words are written in byte-lexicographic order so the reader can binary
/// search them; documents in ascending id order.
///
/// Every limit [`PartitionReader`](super::PartitionReader) enforces is checked
/// here first, so a partition that writes successfully always opens.
pub fn write_partition(corpus: &Corpus) -> Result<Vec<u8>, PartitionError> {
    let doc_count = checked_count(corpus.docs().len(), MAX_DOC_COUNT, "documents")?;
    let word_count = checked_count(corpus.index().num_words(), MAX_WORD_COUNT, "words")?;
    for (_, name) in corpus.docs().iter() {
        checked_string(name, "document name")?;
    }

    let mut doc_table_bytes = Vec::new();
    encode_doc_table(corpus.docs(), &mut doc_table_bytes);

    let mut words: Vec<&WordPostings> = corpus.index().iter().collect();
    words.sort_unstable_by(|a, b| a.word().cmp(b.word()));

    let mut index_bytes = Vec::new();
    let mut block = Vec::new();
    encode_varint(words.len() as u64, &mut index_bytes);
    for entry in words {
        checked_string(entry.word(), "word")?;
        checked_postings(entry)?;
        encode_string(entry.word(), &mut index_bytes);
        block.clear();
        encode_postings(entry.postings(), &mut block);
        encode_varint(block.len() as u64, &mut index_bytes);
        index_bytes.extend_from_slice(&block);
    }

    let header = PartitionHeader {
        version: VERSION,
        flags: FormatFlags::new().with_positions(),
        doc_count,
        word_count,
        doc_table_len: checked_len(doc_table_bytes.len(), "doc table")?,
        index_len: checked_len(index_bytes.len(), "index")?,
    };

    let total_size = header.section_offsets().total_size();
    if total_size > MAX_FILE_SIZE {
        return Err(PartitionError::TooLarge(format!(
            "{} bytes (max {})",
            total_size, MAX_FILE_SIZE
        )));
    }

    let mut buf = Vec::with_capacity(total_size);
    buf.extend_from_slice(&header.to_bytes());
    buf.extend_from_slice(&doc_table_bytes);
    buf.extend_from_slice(&index_bytes);

    // Compute CRC32 over everything written so far
    let crc32 = PartitionFooter::compute_crc32(&buf);
    buf.extend_from_slice(&PartitionFooter { crc32 }.to_bytes());

    Ok(buf)
}

fn checked_count(count: usize, max: u32, what: &str) -> Result<u32, PartitionError> {
    u32::try_from(count)
        .ok()
        .filter(|&c| c <= max)
        .ok_or_else(|| PartitionError::TooLarge(format!("{} {} (max {})", count, what, max)))
}

fn checked_string(value: &str, what: &str) -> Result<(), PartitionError> {
    if value.len() > MAX_STRING_LEN {
        return Err(PartitionError::TooLarge(format!(
            "{} of {} bytes (max {})",
            what,
            value.len(),
            MAX_STRING_LEN
        )));
    }
    Ok(())
}

fn checked_postings(entry: &WordPostings) -> Result<(), PartitionError> {
    let longest = entry.postings().values().map(Vec::len).max().unwrap_or(0);
    if entry.doc_count() > MAX_POSTING_SIZE || longest > MAX_POSTING_SIZE {
        return Err(PartitionError::TooLarge(format!(
            "posting block for '{}' (max {} entries)",
            entry.word(),
            MAX_POSTING_SIZE
        )));
    }
    Ok(())
}

fn checked_len(len: usize, section: &str) -> Result<u32, PartitionError> {
    u32::try_from(len)
        .map_err(|_| PartitionError::TooLarge(format!("{} section is {} bytes", section, len)))
}

/// Writes partition files to disk.
///
/// The file is written next to its destination under a temporary name and
/// renamed into place, so a reader never sees half a partition.
#[derive(Debug, Clone)]
pub struct PartitionWriter {
    path: PathBuf,
}

impl PartitionWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `corpus` and write it, returning the number of bytes written.
    pub fn write(&self, corpus: &Corpus) -> Result<usize, PartitionError> {
        let bytes = write_partition(corpus)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PartitionError::io(parent, e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes).map_err(|e| PartitionError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| PartitionError::io(&self.path, e))?;

        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            documents = corpus.docs().len(),
            words = corpus.index().num_words(),
            "wrote partition"
        );
        Ok(bytes.len())
    }
}
