// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: the data structures a partition is made of.
//!
//! - **MemIndex**: word → (doc_id → positions), keyed by FNV-1a fingerprint
//! - **DocTable**: doc_id ↔ document name
//! - **Corpus**: one of each, which together form a queryable partition

mod corpus;
mod doc_table;
mod memory;

pub use corpus::Corpus;
pub use doc_table::DocTable;
pub use memory::{MemIndex, PostingStore, WordPostings};
