// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, zigzag, length-prefixed strings, and
//! the doc table section.
//!
//! Decoders take a byte slice and a cursor position and advance the cursor.
//! Every length read from the file is checked against the bytes that remain
//! before anything is allocated.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integers, as
//!   used by Protocol Buffers: <https://protobuf.dev/programming-guides/encoding/>
//! - **Zigzag**: maps signed deltas onto small unsigned values, same source.

use crate::error::PartitionError;
use crate::index::DocTable;
use crate::types::DocId;

use super::header::{MAX_STRING_LEN, MAX_VARINT_BYTES};

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty or ends mid-varint
/// - Varint exceeds MAX_VARINT_BYTES or overflows u64
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), PartitionError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let low = (byte & 0x7F) as u64;
        if shift == 63 && low > 1 {
            return Err(PartitionError::Malformed("varint overflows u64".into()));
        }
        result |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(PartitionError::Malformed(format!(
            "varint exceeds {} bytes",
            MAX_VARINT_BYTES
        )))
    } else {
        Err(PartitionError::Truncated("varint"))
    }
}

/// Read a varint at `*pos` and advance past it.
pub(crate) fn read_varint(bytes: &[u8], pos: &mut usize) -> Result<u64, PartitionError> {
    let rest = bytes.get(*pos..).ok_or(PartitionError::Truncated("varint"))?;
    let (value, consumed) = decode_varint(rest)?;
    *pos += consumed;
    Ok(value)
}

/// Read a varint that must fit a `usize` count no larger than `max`.
pub(crate) fn read_count(
    bytes: &[u8],
    pos: &mut usize,
    max: usize,
    what: &str,
) -> Result<usize, PartitionError> {
    let value = read_varint(bytes, pos)?;
    match usize::try_from(value) {
        Ok(count) if count <= max => Ok(count),
        _ => Err(PartitionError::Malformed(format!(
            "{} {} exceeds limit {}",
            what, value, max
        ))),
    }
}

// ============================================================================
// ZIGZAG
// ============================================================================

#[inline]
pub fn encode_zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn decode_zigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

// ============================================================================
// STRINGS
// ============================================================================

/// Encode a length-prefixed UTF-8 string.
pub fn encode_string(s: &str, buf: &mut Vec<u8>) {
    encode_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}

/// Read a length-prefixed UTF-8 string at `*pos` and advance past it.
pub(crate) fn read_string(
    bytes: &[u8],
    pos: &mut usize,
    what: &'static str,
) -> Result<String, PartitionError> {
    let len = read_count(bytes, pos, MAX_STRING_LEN, what)?;
    // Use checked arithmetic to prevent overflow
    let end = pos.checked_add(len).ok_or(PartitionError::Truncated(what))?;
    let raw = bytes.get(*pos..end).ok_or(PartitionError::Truncated(what))?;
    let s = std::str::from_utf8(raw)
        .map_err(|e| PartitionError::Malformed(format!("{} is not UTF-8: {}", what, e)))?;
    *pos = end;
    Ok(s.to_owned())
}

// ============================================================================
// DOC TABLE SECTION
// ============================================================================

/// Encode the doc table: count, then `(doc_id, name)` in ascending id order.
pub fn encode_doc_table(docs: &DocTable, buf: &mut Vec<u8>) {
    encode_varint(docs.len() as u64, buf);
    for (doc_id, name) in docs.iter() {
        encode_varint(doc_id.get(), buf);
        encode_string(name, buf);
    }
}

/// Decode the doc table section.
///
/// `expected` is the header's doc count; the section must agree with it and
/// must be consumed exactly.
pub fn decode_doc_table(bytes: &[u8], expected: usize) -> Result<DocTable, PartitionError> {
    let mut pos = 0;
    // Each entry needs at least 2 bytes (id varint + length varint), so the
    // count cannot exceed what remains.
    let count = read_count(bytes, &mut pos, bytes.len() / 2, "doc table count")?;
    if count != expected {
        return Err(PartitionError::Malformed(format!(
            "doc table holds {} documents, header says {}",
            count, expected
        )));
    }

    let mut docs = DocTable::new();
    for _ in 0..count {
        let doc_id = DocId(read_varint(bytes, &mut pos)?);
        let name = read_string(bytes, &mut pos, "document name")?;
        if !docs.insert(doc_id, name) {
            return Err(PartitionError::Malformed(format!(
                "doc table repeats document {}",
                doc_id
            )));
        }
    }

    if pos != bytes.len() {
        return Err(PartitionError::Malformed(format!(
            "{} trailing bytes after doc table",
            bytes.len() - pos
        )));
    }
    Ok(docs)
}
