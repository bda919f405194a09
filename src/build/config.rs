// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON configuration for crawling and searching.
//!
//! Every field has a default, so `{}` is a valid config. Unknown keys are
//! rejected to catch typos early.
//!
//! ```json
//! {
//!   "crawl": { "include_hidden": false, "respect_ignore": true,
//!              "extensions": ["txt", "md"], "max_file_bytes": 10485760 },
//!   "search": { "partitions": ["a.cidx", "b.cidx"], "validate": true }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Default largest file the crawler will read: 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub search: SearchConfig,
}

/// Which files a crawl picks up.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CrawlConfig {
    /// Walk into dotfiles and dot-directories.
    pub include_hidden: bool,
    /// Honour `.gitignore`, `.ignore` and git exclude files.
    pub respect_ignore: bool,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Only index files with one of these extensions (case-insensitive, with
    /// or without the leading dot). Empty means every file.
    pub extensions: Vec<String>,
    /// Skip files larger than this.
    pub max_file_bytes: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            respect_ignore: true,
            follow_links: false,
            extensions: Vec::new(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl CrawlConfig {
    /// Whether `path` passes the extension filter.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Defaults for `concord search`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Partition files to query when none are given on the command line.
    pub partitions: Vec<PathBuf>,
    /// Check CRC32 footers and posting blocks when opening partitions.
    pub validate: bool,
}

impl Config {
    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| BuildError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
