// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query resolution: AND semantics with additive rank.
//!
//! A single [`MemIndex`](crate::MemIndex) answers queries over one corpus.
//! A [`QueryProcessor`] runs the same procedure over many partitions and
//! merges the results. Both share the accumulator in [`conjunction`].

pub(crate) mod conjunction;
mod processor;

pub use processor::QueryProcessor;
