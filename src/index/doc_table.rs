// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document table: the two-way mapping between doc ids and document names.
//!
//! Ids are assigned sequentially from 1 in the order names are first added.
//! Adding a name that is already present returns its existing id, so the
//! crawler can never register the same file twice.

use std::collections::{BTreeMap, HashMap};

use crate::types::DocId;

/// Bidirectional `DocId` ↔ name table for one partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTable {
    names: BTreeMap<DocId, String>,
    ids: HashMap<String, DocId>,
}

impl DocTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document name, returning its id.
    pub fn add(&mut self, name: impl Into<String>) -> DocId {
        let name = name.into();
        if let Some(&doc_id) = self.ids.get(&name) {
            return doc_id;
        }
        let doc_id = DocId(self.names.keys().next_back().map_or(1, |last| last.0 + 1));
        self.ids.insert(name.clone(), doc_id);
        self.names.insert(doc_id, name);
        doc_id
    }

    /// Insert a name under a caller-chosen id (used when loading a partition).
    ///
    /// Returns `false` and leaves the table untouched if either the id or the
    /// name is already present.
    pub fn insert(&mut self, doc_id: DocId, name: String) -> bool {
        if self.names.contains_key(&doc_id) || self.ids.contains_key(&name) {
            return false;
        }
        self.ids.insert(name.clone(), doc_id);
        self.names.insert(doc_id, name);
        true
    }

    pub fn name(&self, doc_id: DocId) -> Option<&str> {
        self.names.get(&doc_id).map(String::as_str)
    }

    pub fn id(&self, name: &str) -> Option<DocId> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All `(doc_id, name)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &str)> {
        self.names.iter().map(|(&id, name)| (id, name.as_str()))
    }
}
