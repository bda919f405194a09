// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `concord inspect`: a structural dump of one partition file.
//!
//! The file is opened without validation so a corrupted partition can still
//! be looked at; the integrity section reports what validation would say.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use concord::binary::{PartitionFooter, PartitionHeader, PartitionReader};
use concord::Partition;

use super::display::{field, human_bytes, section, table_row, Column, Painter, Tone};

/// Documents listed before the rest are summarized as a count.
const SHOWN_DOCS: usize = 10;

pub fn run(path: &Path, top_words: usize) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let total = bytes.len();
    let header = PartitionHeader::read(&bytes)?;
    let footer = PartitionFooter::read(&bytes)?;
    let computed = PartitionFooter::compute_crc32(&bytes[..total - PartitionFooter::SIZE]);
    let offsets = header.section_offsets();

    let reader = PartitionReader::from_bytes(bytes, false)
        .with_context(|| format!("parsing {}", path.display()))?;

    let p = Painter::stdout();
    println!("{}", p.paint(Tone::Heading, &path.display().to_string()));
    println!();

    println!("{}", section(&p, "HEADER"));
    println!("{}", field(&p, "version", 10, &header.version.to_string()));
    println!("{}", field(&p, "flags", 10, &format!("{:#04x}", header.flags.bits())));
    println!("{}", field(&p, "documents", 10, &header.doc_count.to_string()));
    println!("{}", field(&p, "words", 10, &header.word_count.to_string()));
    println!();

    println!("{}", section(&p, "SECTIONS"));
    let layout = [Column::left(10).tone(Tone::Label), Column::right(12), Column::right(12)];
    let sections = [
        ("header", 0, PartitionHeader::SIZE),
        ("doc table", offsets.doc_table.0, offsets.doc_table.1 - offsets.doc_table.0),
        ("index", offsets.index.0, offsets.index.1 - offsets.index.0),
        ("footer", offsets.footer.0, PartitionFooter::SIZE),
    ];
    for (name, start, len) in sections {
        let start = format!("@{}", start);
        let size = human_bytes(len as u64);
        println!("{}", table_row(&p, &layout, &[name, start.as_str(), size.as_str()]));
    }
    println!("{}", table_row(&p, &layout, &["total", "", human_bytes(total as u64).as_str()]));
    println!();

    println!("{}", section(&p, "INTEGRITY"));
    let crc_status = if footer.crc32 == computed {
        p.paint(Tone::Good, "ok")
    } else {
        p.paint(Tone::Warn, &format!("MISMATCH (content hashes to {:#010x})", computed))
    };
    println!("{}", field(&p, "crc32", 10, &format!("{:#010x} {}", footer.crc32, crc_status)));
    let bad_blocks = reader
        .words()
        .filter(|word| reader.lookup(word).is_err())
        .count();
    let blocks = format!("{}/{} decode", reader.num_words() - bad_blocks, reader.num_words());
    let blocks = if bad_blocks == 0 {
        p.paint(Tone::Good, &blocks)
    } else {
        p.paint(Tone::Warn, &blocks)
    };
    println!("{}", field(&p, "blocks", 10, &blocks));
    println!();

    println!("{}", section(&p, "TOP WORDS"));
    let mut spread: Vec<(&str, usize, u64)> = reader
        .words()
        .filter_map(|word| {
            let hits = reader.lookup_word(word)?;
            let occurrences = hits.iter().map(|h| h.count).sum();
            Some((word, hits.len(), occurrences))
        })
        .collect();
    spread.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let layout = [Column::left(30).tone(Tone::Word), Column::right(8), Column::right(12)];
    println!("{}", table_row(&p, &layout, &["word", "docs", "occurrences"]));
    for (word, docs, occurrences) in spread.iter().take(top_words) {
        println!(
            "{}",
            table_row(&p, &layout, &[*word, docs.to_string().as_str(), occurrences.to_string().as_str()])
        );
    }
    println!();

    println!("{}", section(&p, "DOCUMENTS"));
    let layout = [Column::right(8).tone(Tone::Dim), Column::left(60)];
    for (doc_id, name) in reader.docs().iter().take(SHOWN_DOCS) {
        println!("{}", table_row(&p, &layout, &[doc_id.to_string().as_str(), name]));
    }
    if reader.num_docs() > SHOWN_DOCS {
        println!("  ... and {} more", reader.num_docs() - SHOWN_DOCS);
    }

    Ok(())
}
