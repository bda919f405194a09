// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for concord partitions (`.cidx`).
//!
//! One file holds one partition: a doc table and a word index. The layout is
//! built so a reader can open it with a single pass over the word directory
//! and defer posting decode until a word is actually queried.
//!
//! # Security Considerations
//!
//! This format is designed to be safely parsed from untrusted sources:
//! - All count fields are validated against MAX_* constants
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has maximum iteration limits
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (24 bytes)                                          │
//! │   magic: [u8; 4] = "CNCD"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8                                                │
//! │   doc_count: u32, word_count: u32                          │
//! │   doc_table_len: u32, index_len: u32                       │
//! │   reserved: [u8; 2]                                        │
//! ├────────────────────────────────────────────────────────────┤
//! │ DOC_TABLE                                                  │
//! │   count: varint                                            │
//! │   (doc_id: varint, name_len: varint, name: bytes)*         │
//! ├────────────────────────────────────────────────────────────┤
//! │ INDEX (words sorted bytewise)                              │
//! │   count: varint                                            │
//! │   (word_len: varint, word: bytes,                          │
//! │    block_len: varint, posting block)*                      │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "DCNC"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! All fixed-width integers are little-endian. The posting block layout is
//! documented in the `postings` module.

// Submodules
mod encoding;
mod header;
mod postings;
mod reader;
mod writer;

// Re-export from submodules for public API
pub use encoding::{
    decode_doc_table, decode_varint, decode_zigzag, encode_doc_table, encode_string,
    encode_varint, encode_zigzag,
};
pub use header::{
    FormatFlags, PartitionFooter, PartitionHeader, SectionOffsets, FOOTER_MAGIC, MAGIC,
    MAX_DOC_COUNT, MAX_FILE_SIZE, MAX_POSTING_SIZE, MAX_STRING_LEN, MAX_VARINT_BYTES,
    MAX_WORD_COUNT, VERSION,
};
pub use postings::{decode_hits, decode_postings, encode_postings};
pub use reader::PartitionReader;
pub use writer::{write_partition, PartitionWriter};

/// Conventional file extension for partitions.
pub const EXTENSION: &str = "cidx";
