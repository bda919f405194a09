//! Directory crawls into a `Corpus`.

use std::fs;
use std::path::{Path, PathBuf};

use concord::{crawl, query_terms, BuildError, Corpus, CrawlConfig, QueryError};
use tempfile::TempDir;

use crate::common::{named, write_tree};

/// A small tree with one hidden file and one gitignored file.
fn orchard() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("orchard");
    write_tree(
        &root,
        &[
            ("a.txt", "Apple banana apple"),
            ("notes/b.md", "apple"),
            (".hidden.txt", "apple"),
            (".gitignore", "*.log\n"),
            ("debug.log", "apple cherry"),
        ],
    );
    (dir, root)
}

fn name(root: &Path, rel: &str) -> String {
    root.join(rel).to_str().unwrap().to_string()
}

fn doc_names(corpus: &Corpus) -> Vec<&str> {
    corpus.docs().iter().map(|(_, name)| name).collect()
}

#[test]
fn default_crawl_skips_hidden_and_ignored() {
    let (_dir, root) = orchard();
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    assert_eq!(
        doc_names(&corpus),
        vec![name(&root, "a.txt"), name(&root, "notes/b.md")]
    );
}

#[test]
fn positions_are_byte_offsets_of_normalized_words() {
    let (_dir, root) = orchard();
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    let a = corpus.docs().id(&name(&root, "a.txt")).unwrap();

    let apple = corpus.index().get("apple").unwrap();
    assert_eq!(apple.positions(a), Some(&vec![0, 13]));
    assert_eq!(corpus.index().get("banana").unwrap().positions(a), Some(&vec![6]));
    assert!(corpus.index().get("Apple").is_none());
}

#[test]
fn crawled_corpus_answers_typed_queries() {
    let (_dir, root) = orchard();
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();

    let results = corpus.search(&query_terms("APPLE")).unwrap();
    assert_eq!(
        named(&corpus, &results),
        vec![(name(&root, "notes/b.md").as_str(), 1), (name(&root, "a.txt").as_str(), 2)]
    );
    assert_eq!(corpus.search(&query_terms("cherry")), Err(QueryError::NoMatch));
}

#[test]
fn include_hidden_picks_up_dotfiles() {
    let (_dir, root) = orchard();
    let config = CrawlConfig {
        include_hidden: true,
        ..CrawlConfig::default()
    };
    let corpus = crawl(&root, &config).unwrap();
    let names = doc_names(&corpus);
    assert!(names.contains(&name(&root, ".hidden.txt").as_str()));
    assert!(names.contains(&name(&root, ".gitignore").as_str()));
    assert!(!names.contains(&name(&root, "debug.log").as_str()));
}

#[test]
fn ignore_files_can_be_disregarded() {
    let (_dir, root) = orchard();
    let config = CrawlConfig {
        respect_ignore: false,
        ..CrawlConfig::default()
    };
    let corpus = crawl(&root, &config).unwrap();
    assert!(doc_names(&corpus).contains(&name(&root, "debug.log").as_str()));
    assert!(corpus.index().get("cherry").is_some());
}

#[test]
fn extension_filter_limits_files() {
    let (_dir, root) = orchard();
    let config = CrawlConfig {
        extensions: vec!["md".to_string()],
        ..CrawlConfig::default()
    };
    let corpus = crawl(&root, &config).unwrap();
    assert_eq!(doc_names(&corpus), vec![name(&root, "notes/b.md")]);
}

#[test]
fn oversized_files_are_skipped() {
    let (_dir, root) = orchard();
    let big = "word ".repeat(100);
    write_tree(&root, &[("big.txt", big.as_str())]);
    let config = CrawlConfig {
        max_file_bytes: 64,
        ..CrawlConfig::default()
    };
    let corpus = crawl(&root, &config).unwrap();
    assert!(!doc_names(&corpus).contains(&name(&root, "big.txt").as_str()));
    assert!(corpus.index().get("word").is_none());
}

#[test]
fn non_utf8_file_is_skipped_and_crawl_continues() {
    let (_dir, root) = orchard();
    fs::write(root.join("blob.txt"), [0xff, 0xfe, 0x00, 0x61]).unwrap();
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    assert_eq!(corpus.docs().len(), 2);
    assert!(corpus.docs().id(&name(&root, "blob.txt")).is_none());
}

#[cfg(unix)]
#[test]
fn non_utf8_path_is_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (_dir, root) = orchard();
    fs::write(root.join(OsStr::from_bytes(b"bad\xffname.txt")), "apple").unwrap();
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    assert_eq!(corpus.docs().len(), 2);
}

#[test]
fn wordless_file_is_still_registered() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    write_tree(&root, &[("digits.txt", "1234 5678"), ("words.txt", "kiwi")]);
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    assert_eq!(corpus.docs().len(), 2);
    assert_eq!(corpus.index().num_words(), 1);
}

#[test]
fn empty_directory_gives_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("empty");
    fs::create_dir(&root).unwrap();
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    assert!(corpus.docs().is_empty());
    assert!(corpus.index().is_empty());
}

#[test]
fn file_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    write_tree(&root, &[("a.txt", "apple")]);
    assert!(matches!(
        crawl(root.join("a.txt"), &CrawlConfig::default()),
        Err(BuildError::NotADirectory(_))
    ));
}

#[test]
fn crawl_is_deterministic() {
    let (_dir, root) = orchard();
    let first = crawl(&root, &CrawlConfig::default()).unwrap();
    let second = crawl(&root, &CrawlConfig::default()).unwrap();
    assert_eq!(
        first.docs().iter().collect::<Vec<_>>(),
        second.docs().iter().collect::<Vec<_>>()
    );
    assert_eq!(
        first.search(&["apple"]).unwrap(),
        second.search(&["apple"]).unwrap()
    );
}
