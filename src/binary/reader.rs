// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading partition files.
//!
//! Opening a partition decodes the header, the doc table and a word
//! directory that maps each word to the byte range of its posting block.
//! Blocks themselves are decoded on lookup. With `validate` set, the CRC32
//! footer is checked and every block is decoded once up front, so a
//! validated reader never meets a malformed block at query time.

use std::ops::Range;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::PartitionError;
use crate::index::DocTable;
use crate::partition::Partition;
use crate::types::{DocHit, DocId, PostingList};

use super::encoding::{decode_doc_table, read_count, read_string};
use super::header::{
    PartitionFooter, PartitionHeader, MAX_DOC_COUNT, MAX_FILE_SIZE, MAX_WORD_COUNT,
};
use super::postings::{decode_hits, decode_postings};

/// A partition loaded from bytes, queryable through [`Partition`].
#[derive(Debug)]
pub struct PartitionReader {
    bytes: Vec<u8>,
    header: PartitionHeader,
    docs: DocTable,
    /// Sorted by word; ranges index into `bytes`.
    directory: Vec<(String, Range<usize>)>,
}

impl PartitionReader {
    /// Read and parse a partition file.
    pub fn open(path: impl AsRef<Path>, validate: bool) -> Result<Self, PartitionError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PartitionError::io(path, e))?;
        let reader = Self::from_bytes(bytes, validate)?;
        debug!(
            path = %path.display(),
            documents = reader.num_docs(),
            words = reader.num_words(),
            "opened partition"
        );
        Ok(reader)
    }

    /// Parse partition bytes.
    ///
    /// # Validation
    ///
    /// Always:
    /// 1. File size is within limits (MAX_FILE_SIZE)
    /// 2. Header magic and version are valid
    /// 3. Footer magic is valid ("DCNC")
    /// 4. Section lengths add up to the file size
    /// 5. Doc table and word directory decode cleanly
    ///
    /// With `validate`:
    /// 6. CRC32 checksum matches
    /// 7. Every posting block decodes cleanly
    pub fn from_bytes(bytes: Vec<u8>, validate: bool) -> Result<Self, PartitionError> {
        // Security: Check file size limits
        if bytes.len() > MAX_FILE_SIZE {
            return Err(PartitionError::TooLarge(format!(
                "{} bytes (max {})",
                bytes.len(),
                MAX_FILE_SIZE
            )));
        }

        // Minimum size: header + footer
        if bytes.len() < PartitionHeader::SIZE + PartitionFooter::SIZE {
            return Err(PartitionError::Truncated("file shorter than header and footer"));
        }

        let header = PartitionHeader::read(&bytes)?;
        let footer = PartitionFooter::read(&bytes)?;
        let content = &bytes[..bytes.len() - PartitionFooter::SIZE];

        if validate {
            let actual = PartitionFooter::compute_crc32(content);
            if footer.crc32 != actual {
                return Err(PartitionError::ChecksumMismatch {
                    expected: footer.crc32,
                    actual,
                });
            }
        }

        if header.doc_count > MAX_DOC_COUNT {
            return Err(PartitionError::Malformed(format!(
                "too many documents: {} (max {})",
                header.doc_count, MAX_DOC_COUNT
            )));
        }
        if header.word_count > MAX_WORD_COUNT {
            return Err(PartitionError::Malformed(format!(
                "too many words: {} (max {})",
                header.word_count, MAX_WORD_COUNT
            )));
        }

        let offsets = header.section_offsets();
        if offsets.content_size() > content.len() {
            return Err(PartitionError::Truncated("sections extend past footer"));
        }
        if offsets.content_size() < content.len() {
            return Err(PartitionError::Malformed(format!(
                "section lengths mismatch: header claims {} bytes, got {} bytes",
                offsets.content_size(),
                content.len()
            )));
        }

        let doc_table = offsets
            .slice(&bytes, offsets.doc_table)
            .ok_or(PartitionError::Truncated("doc table"))?;
        let docs = decode_doc_table(doc_table, header.doc_count as usize)?;

        let directory = read_directory(&bytes, offsets.index, header.word_count as usize)?;

        if validate {
            for (word, range) in &directory {
                decode_postings(&bytes[range.clone()]).map_err(|e| {
                    PartitionError::Malformed(format!("posting block for '{}': {}", word, e))
                })?;
            }
        }

        Ok(Self {
            bytes,
            header,
            docs,
            directory,
        })
    }

    pub fn header(&self) -> &PartitionHeader {
        &self.header
    }

    pub fn docs(&self) -> &DocTable {
        &self.docs
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn num_words(&self) -> usize {
        self.directory.len()
    }

    /// Total size of the partition in bytes, footer included.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Every word in the partition, in byte-lexicographic order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.directory.iter().map(|(word, _)| word.as_str())
    }

    fn block(&self, word: &str) -> Option<&[u8]> {
        let idx = self
            .directory
            .binary_search_by(|(w, _)| w.as_str().cmp(word))
            .ok()?;
        let range = self.directory[idx].1.clone();
        self.bytes.get(range)
    }

    /// Decode the documents containing `word`, ascending by doc id.
    ///
    /// `Ok(None)` means the word is not in this partition.
    pub fn lookup(&self, word: &str) -> Result<Option<Vec<DocHit>>, PartitionError> {
        self.block(word).map(decode_hits).transpose()
    }

    /// Positions of `word` in `doc_id`, in the order they were recorded.
    pub fn positions(&self, word: &str, doc_id: DocId) -> Result<Option<PostingList>, PartitionError> {
        let Some(block) = self.block(word) else {
            return Ok(None);
        };
        Ok(decode_postings(block)?
            .into_iter()
            .find(|(id, _)| *id == doc_id)
            .map(|(_, positions)| positions))
    }
}

/// Walk the index section once, recording where each block lives.
fn read_directory(
    bytes: &[u8],
    section: (usize, usize),
    expected: usize,
) -> Result<Vec<(String, Range<usize>)>, PartitionError> {
    let (start, end) = section;
    let index = bytes
        .get(start..end)
        .ok_or(PartitionError::Truncated("index"))?;

    let mut pos = 0;
    // Each word needs at least 3 bytes (length, one byte, block length).
    let count = read_count(index, &mut pos, index.len() / 3, "word count")?;
    if count != expected {
        return Err(PartitionError::Malformed(format!(
            "index holds {} words, header says {}",
            count, expected
        )));
    }

    let mut directory: Vec<(String, Range<usize>)> = Vec::with_capacity(count);
    for _ in 0..count {
        let word = read_string(index, &mut pos, "word")?;
        if word.is_empty() {
            return Err(PartitionError::Malformed("empty word in index".into()));
        }
        if let Some((prev, _)) = directory.last() {
            if prev.as_str() >= word.as_str() {
                return Err(PartitionError::Malformed(format!(
                    "index words out of order: '{}' before '{}'",
                    prev, word
                )));
            }
        }

        let remaining = index.len().saturating_sub(pos);
        let block_len = read_count(index, &mut pos, remaining, "block length")?;
        if block_len > index.len().saturating_sub(pos) {
            return Err(PartitionError::Truncated("posting block"));
        }
        let block_start = start + pos;
        pos += block_len;
        directory.push((word, block_start..start + pos));
    }

    if pos != index.len() {
        return Err(PartitionError::Malformed(format!(
            "{} trailing bytes after index",
            index.len() - pos
        )));
    }
    Ok(directory)
}

impl Partition for PartitionReader {
    fn lookup_word(&self, word: &str) -> Option<Vec<DocHit>> {
        match self.lookup(word) {
            Ok(hits) => hits,
            Err(err) => {
                warn!(word, error = %err, "unreadable posting block, treating word as absent");
                None
            }
        }
    }

    fn doc_name(&self, doc_id: DocId) -> Option<&str> {
        self.docs.name(doc_id)
    }
}
