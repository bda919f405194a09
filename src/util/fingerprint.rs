// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! 64-bit FNV-1a word fingerprints.
//!
//! The in-memory index is keyed by fingerprint, not by the word itself. That
//! keeps lookups to one hash of the query word and one integer probe, and it
//! makes bucketing deterministic across runs and platforms (std's `HashMap`
//! seeds SipHash randomly).
//!
//! Because the fingerprint already is a well-mixed 64-bit value, the table
//! uses [`FingerprintHasher`], which passes `u64` keys straight through
//! instead of hashing them a second time.
//!
//! # References
//!
//! - Fowler, Noll, Vo: "FNV Hash", <http://www.isthe.com/chongo/tech/comp/fnv/>

use std::hash::{BuildHasherDefault, Hasher};

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Compute the FNV-1a fingerprint of a byte string.
#[inline]
pub fn fingerprint(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Fingerprint of a word's UTF-8 bytes.
#[inline]
pub fn word_fingerprint(word: &str) -> u64 {
    fingerprint(word.as_bytes())
}

/// Hasher for tables whose keys are already fingerprints (or small integer ids).
///
/// `write_u64` stores the key verbatim. Arbitrary byte input falls back to
/// FNV-1a so the hasher stays correct for any `Hash` type.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintHasher(u64);

impl Default for FingerprintHasher {
    fn default() -> Self {
        FingerprintHasher(FNV_OFFSET_BASIS)
    }
}

impl Hasher for FingerprintHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = (self.0 ^ u64::from(byte)).wrapping_mul(FNV_PRIME);
        }
    }

    #[inline]
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

/// `BuildHasher` for fingerprint-keyed `HashMap`s.
pub type BuildFingerprintHasher = BuildHasherDefault<FingerprintHasher>;
