// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for string processing and hashing.
//!
//! Text normalization so that "Café" and "cafe" land on the same posting
//! list, and the FNV-1a fingerprint that buckets words in the in-memory index.

pub mod fingerprint;
pub mod normalize;
