// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Partition header and footer.
//!
//! The header is 24 bytes of fixed-size fields, parsed before anything else.
//! It carries the length of both sections, so the reader can slice them out
//! without scanning.
//!
//! The footer is 8 bytes: a CRC32 over everything before it, then the header
//! magic reversed ("DCNC"). A bad footer means truncation or corruption.
//!
//! `SectionOffsets` is the single source of truth for the file layout. The
//! writer and the reader both go through it.

use std::io::{self, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::error::PartitionError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "CNCD" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x43, 0x4E, 0x43, 0x44];

/// Footer magic: "DCNC" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x44, 0x43, 0x4E, 0x43];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 1 GiB
pub const MAX_FILE_SIZE: usize = 1024 * 1024 * 1024;

/// Maximum number of documents per partition
pub const MAX_DOC_COUNT: u32 = 50_000_000;

/// Maximum number of distinct words per partition
pub const MAX_WORD_COUNT: u32 = 50_000_000;

/// Maximum documents per word, and positions per (word, document)
pub const MAX_POSTING_SIZE: usize = 50_000_000;

/// Maximum length of a word or document name in bytes
pub const MAX_STRING_LEN: usize = 64 * 1024;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    /// Posting blocks carry word positions, not only counts.
    pub const HAS_POSITIONS: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_positions(mut self) -> Self {
        self.0 |= Self::HAS_POSITIONS;
        self
    }

    pub fn has_positions(self) -> bool {
        self.0 & Self::HAS_POSITIONS != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Partition header (24 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub doc_count: u32,
    pub word_count: u32,
    pub doc_table_len: u32,
    pub index_len: u32,
}

impl PartitionHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 4*4 (u32s) + 2 (reserved) = 24
    pub const SIZE: usize = 24;

    /// Compute section byte offsets for this header.
    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    /// Encode the header into its fixed 24-byte form.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..4].copy_from_slice(&MAGIC);
        buf[4] = self.version;
        buf[5] = self.flags.0;
        buf[6..10].copy_from_slice(&self.doc_count.to_le_bytes());
        buf[10..14].copy_from_slice(&self.word_count.to_le_bytes());
        buf[14..18].copy_from_slice(&self.doc_table_len.to_le_bytes());
        buf[18..22].copy_from_slice(&self.index_len.to_le_bytes());
        // buf[22..24] is reserved
        buf
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    /// Parse the header at the start of `bytes`.
    ///
    /// Checks magic and version; length fields are checked by the reader
    /// against the actual file size.
    pub fn read(bytes: &[u8]) -> Result<Self, PartitionError> {
        let buf = bytes
            .get(..Self::SIZE)
            .ok_or(PartitionError::Truncated("header"))?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(PartitionError::BadMagic(magic));
        }

        let version = buf[4];
        if version != VERSION {
            return Err(PartitionError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let u32_at = |at: usize| u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);

        Ok(Self {
            version,
            flags: FormatFlags(buf[5]),
            doc_count: u32_at(6),
            word_count: u32_at(10),
            doc_table_len: u32_at(14),
            index_len: u32_at(18),
            // buf[22..24] is reserved
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl PartitionFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..4].copy_from_slice(&self.crc32.to_le_bytes());
        buf[4..].copy_from_slice(&FOOTER_MAGIC);
        buf
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    /// Read the footer from the last 8 bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, PartitionError> {
        let footer_start = bytes
            .len()
            .checked_sub(Self::SIZE)
            .ok_or(PartitionError::Truncated("footer"))?;
        let tail = &bytes[footer_start..];

        let magic = [tail[4], tail[5], tail[6], tail[7]];
        if magic != FOOTER_MAGIC {
            return Err(PartitionError::BadFooterMagic(magic));
        }

        Ok(Self {
            crc32: u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]),
        })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte offsets for the partition layout.
///
/// ```text
/// HEADER     [24B]
/// DOC_TABLE  [doc_table_len]
/// INDEX      [index_len]
/// FOOTER     [8B]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub doc_table: (usize, usize),
    pub index: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    pub fn from_header(h: &PartitionHeader) -> Self {
        let mut pos = PartitionHeader::SIZE;

        let doc_table_start = pos;
        pos = pos.saturating_add(h.doc_table_len as usize);
        let doc_table_end = pos;

        let index_start = pos;
        pos = pos.saturating_add(h.index_len as usize);
        let index_end = pos;

        Self {
            doc_table: (doc_table_start, doc_table_end),
            index: (index_start, index_end),
            footer: (pos, pos.saturating_add(PartitionFooter::SIZE)),
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    /// Get a slice for a section from the bytes
    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}
