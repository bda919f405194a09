// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The interactive query loop behind `concord shell`.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};

use concord::{query_terms, Corpus, QueryError};

/// Prompt, read a line, print its matches; repeat until `input` hits EOF.
///
/// Matches print as `  <name> (<rank>)` in the order the index returns them.
/// Blank queries and queries with no match print nothing.
pub fn run<R: BufRead, W: Write>(corpus: &Corpus, input: R, out: &mut W) -> Result<()> {
    let mut lines = input.lines();
    loop {
        writeln!(out, "enter query:")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out, "shutting down...")?;
            return Ok(());
        };
        let terms = query_terms(&line?);

        let results = match corpus.search(&terms) {
            Ok(results) => results,
            Err(QueryError::EmptyQuery | QueryError::NoMatch) => continue,
            Err(err) => return Err(err.into()),
        };
        for result in results {
            let name = corpus.docs().name(result.doc_id).ok_or_else(|| {
                anyhow!("document {} is indexed but has no name", result.doc_id)
            })?;
            writeln!(out, "  {} ({})", name, result.rank)?;
        }
    }
}
