// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: runtime contracts for the index and query paths.
//!
//! Contracts panic in debug builds when an internal invariant is violated and
//! compile to nothing in release. They catch algorithmic errors while tests
//! run. Faults that depend on input data (duplicate postings, fingerprint
//! collisions, unnamed documents) are not contracts: they are returned as
//! errors, because release builds must see them too.

pub mod contracts;
