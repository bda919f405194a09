// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the concord command-line interface.
//!
//! Four subcommands: `index` crawls a directory into a `.cidx` partition,
//! `inspect` examines one, `search` queries any number of them at once, and
//! `shell` crawls a directory into memory and answers queries from stdin.

pub mod display;
pub mod inspect;
pub mod shell;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use concord::CrawlConfig;

#[derive(Parser)]
#[command(
    name = "concord",
    about = "Word-level inverted index with multi-partition AND queries",
    version
)]
pub struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl a directory and write it as one partition file
    Index {
        /// Directory to crawl
        #[arg(short, long)]
        input: PathBuf,

        /// Output .cidx file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON config file (the `crawl` section is used)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Inspect a .cidx file structure
    Inspect {
        /// Path to .cidx file
        file: PathBuf,

        /// Number of most widespread words to list
        #[arg(short, long, default_value = "10")]
        words: usize,
    },

    /// Query one or more partition files
    ///
    /// Every term must occur in a document for it to match. Results from all
    /// partitions are merged, highest rank first.
    Search {
        /// Partition file to query (repeatable)
        #[arg(short = 'p', long = "partition")]
        partitions: Vec<PathBuf>,

        /// Check CRC32 footers and posting blocks before querying
        #[arg(long)]
        validate: bool,

        /// JSON config file (the `search` section is used)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run every line of this file as a separate query
        #[arg(long, conflicts_with = "terms")]
        batch: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Query terms
        terms: Vec<String>,
    },

    /// Crawl a directory into memory and answer queries from stdin
    Shell {
        /// Directory to crawl
        dir: PathBuf,

        /// JSON config file (the `crawl` section is used)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}

/// Crawl overrides shared by `index` and `shell`.
#[derive(Args, Debug, Default)]
pub struct CrawlArgs {
    /// Include dotfiles and dot-directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Ignore .gitignore/.ignore files
    #[arg(long)]
    pub no_ignore: bool,

    /// Only index files with this extension (repeatable)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Skip files larger than this many bytes
    #[arg(long)]
    pub max_file_bytes: Option<u64>,
}

impl CrawlArgs {
    /// Layer command-line flags over a config file's crawl section.
    pub fn apply(&self, config: &mut CrawlConfig) {
        if self.include_hidden {
            config.include_hidden = true;
        }
        if self.no_ignore {
            config.respect_ignore = false;
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if let Some(max) = self.max_file_bytes {
            config.max_file_bytes = max;
        }
    }
}
