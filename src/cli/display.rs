// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rendering for `concord inspect` and `concord search`.
//!
//! Everything here builds `String`s; the callers decide where they go. Color
//! is applied only after a cell has been padded, so column widths never have
//! to account for escape codes.

use concord::{QueryResult, Rank};

/// Width of section rules and of the rank bar's longest run.
pub const RULE_WIDTH: usize = 72;
const BAR_WIDTH: usize = 20;

// ============================================================================
// COLOR
// ============================================================================

/// What a piece of text means, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Label,
    Word,
    Good,
    Warn,
    Dim,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Heading => "\x1b[1;36m",
            Tone::Label => "\x1b[34m",
            Tone::Word => "\x1b[36m",
            Tone::Good => "\x1b[1;32m",
            Tone::Warn => "\x1b[1;33m",
            Tone::Dim => "\x1b[90m",
        }
    }
}

/// Applies [`Tone`]s, or passes text through untouched.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    /// Color only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout);
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if self.enabled {
            format!("{}{}\x1b[0m", tone.code(), text)
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// `── LABEL ─────…` spanning [`RULE_WIDTH`] columns.
pub fn section(painter: &Painter, label: &str) -> String {
    let used = label.chars().count() + 4;
    format!(
        "{} {} {}",
        painter.paint(Tone::Dim, "──"),
        painter.paint(Tone::Heading, label),
        painter.paint(Tone::Dim, &"─".repeat(RULE_WIDTH.saturating_sub(used)))
    )
}

/// `  label      value` with the label padded to `width`.
pub fn field(painter: &Painter, label: &str, width: usize, value: &str) -> String {
    format!("  {} {}", painter.paint(Tone::Label, &format!("{:<width$}", label)), value)
}

#[derive(Debug, Clone, Copy)]
pub enum Align {
    Left,
    Right,
}

/// One column of a [`table_row`].
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub width: usize,
    pub align: Align,
    pub tone: Option<Tone>,
}

impl Column {
    pub const fn left(width: usize) -> Self {
        Self { width, align: Align::Left, tone: None }
    }

    pub const fn right(width: usize) -> Self {
        Self { width, align: Align::Right, tone: None }
    }

    pub const fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }
}

/// Lay out `cells` in `columns`. Long left-aligned cells keep their tail.
pub fn table_row(painter: &Painter, columns: &[Column], cells: &[&str]) -> String {
    let mut line = String::from(" ");
    for (column, cell) in columns.iter().zip(cells) {
        let cell = match column.align {
            Align::Left => format!("{:<w$}", keep_tail(cell, column.width), w = column.width),
            Align::Right => format!("{:>w$}", cell, w = column.width),
        };
        line.push(' ');
        match column.tone {
            Some(tone) => line.push_str(&painter.paint(tone, &cell)),
            None => line.push_str(&cell),
        }
    }
    line.trim_end().to_string()
}

/// The last `max` characters of `text`, marking a cut with "...".
pub fn keep_tail(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let tail: String = text.chars().skip(count - keep).collect();
    format!("...{}", tail)
}

/// Bytes in the largest unit that keeps the number at or above one.
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

// ============================================================================
// RANKED RESULTS
// ============================================================================

/// A bar whose length is `rank` relative to `best`. Any match gets one cell.
pub fn rank_bar(rank: Rank, best: Rank) -> String {
    let filled = if best == 0 {
        0
    } else {
        let scaled = u128::from(rank) * BAR_WIDTH as u128 / u128::from(best);
        (scaled as usize).clamp(1, BAR_WIDTH)
    };
    "█".repeat(filled)
}

fn rank_tone(rank: Rank, best: Rank) -> Tone {
    if rank == best {
        Tone::Good
    } else if u128::from(rank) * 2 >= u128::from(best) {
        Tone::Warn
    } else {
        Tone::Dim
    }
}

/// One line per merged result: rank, bar, document name.
///
/// `results` are expected best first, as the query processor returns them.
pub fn result_lines(painter: &Painter, results: &[QueryResult]) -> Vec<String> {
    let best = results.first().map_or(0, |r| r.rank);
    let rank_width = best.to_string().len();
    results
        .iter()
        .map(|result| {
            let tone = rank_tone(result.rank, best);
            format!(
                "  {} {} {}",
                painter.paint(tone, &format!("{:>rank_width$}", result.rank)),
                painter.paint(tone, &format!("{:<BAR_WIDTH$}", rank_bar(result.rank, best))),
                result.document_name
            )
        })
        .collect()
}

/// `N results across M partitions`, with the singulars spelled right.
pub fn result_summary(results: usize, partitions: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{} {}", n, word)
        } else {
            format!("{} {}s", n, word)
        }
    };
    format!("{} across {}", plural(results, "result"), plural(partitions, "partition"))
}
