//! Writing partitions to disk and reading them back.

use std::fs;

use concord::binary::MAX_STRING_LEN;
use concord::{
    crawl, Corpus, CrawlConfig, DocId, Partition, PartitionError, PartitionReader, PartitionWriter,
    QueryProcessor,
};
use tempfile::TempDir;

use crate::common::{fruit_corpus, pantry_corpus, write_partition_file, write_tree};

#[test]
fn crawl_write_open_query() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    write_tree(
        &root,
        &[
            ("one.txt", "the quick brown fox"),
            ("two.txt", "the lazy dog and the fox"),
        ],
    );
    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    let path = write_partition_file(dir.path(), "tree.cidx", &corpus);

    let from_file = QueryProcessor::<PartitionReader>::open([&path], true).unwrap();
    let in_memory = QueryProcessor::new(vec![corpus]).unwrap();

    let queries: [&[&str]; 4] = [&["the"], &["fox"], &["the", "fox"], &["quick", "dog"]];
    for query in queries {
        assert_eq!(
            from_file.process_query(query).unwrap(),
            in_memory.process_query(query).unwrap(),
            "query {:?}",
            query
        );
    }
    let top = from_file.process_query(&["the"]).unwrap();
    assert_eq!(top[0].rank, 2);
    assert!(top[0].document_name.ends_with("two.txt"));
}

#[test]
fn reader_preserves_docs_and_positions() {
    let dir = TempDir::new().unwrap();
    let corpus = fruit_corpus();
    let path = write_partition_file(dir.path(), "fruit.cidx", &corpus);
    let reader = PartitionReader::open(&path, true).unwrap();

    assert_eq!(reader.num_docs(), 2);
    assert_eq!(reader.num_words(), 2);
    assert_eq!(reader.doc_name(DocId(1)), Some("doc1.txt"));
    assert_eq!(reader.doc_name(DocId(3)), None);
    assert_eq!(reader.positions("apple", DocId(1)).unwrap(), Some(vec![0, 12, 40]));
    assert_eq!(reader.positions("apple", DocId(7)).unwrap(), None);
    for word in ["apple", "banana", "grape"] {
        assert_eq!(reader.lookup_word(word), corpus.lookup_word(word), "word {word}");
    }
}

#[test]
fn writer_reports_size_and_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/out/pantry.cidx");
    let written = PartitionWriter::new(&path).write(&pantry_corpus()).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len() as usize, written);
    let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["pantry.cidx"]);
}

#[test]
fn corrupted_name_caught_only_when_validating() {
    let dir = TempDir::new().unwrap();
    let path = write_partition_file(dir.path(), "fruit.cidx", &fruit_corpus());

    // Header (24) + doc count + id + name length, then the first name byte.
    let mut bytes = fs::read(&path).unwrap();
    assert_eq!(bytes[27], b'd');
    bytes[27] = b'X';
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        PartitionReader::open(&path, true),
        Err(PartitionError::ChecksumMismatch { .. })
    ));
    let reader = PartitionReader::open(&path, false).unwrap();
    assert_eq!(reader.doc_name(DocId(1)), Some("Xoc1.txt"));
}

#[test]
fn truncated_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_partition_file(dir.path(), "fruit.cidx", &fruit_corpus());
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    assert!(PartitionReader::open(&path, true).is_err());
    assert!(PartitionReader::open(&path, false).is_err());
}

#[test]
fn foreign_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.cidx");
    fs::write(&path, b"this is plainly not a partition file at all").unwrap();
    assert!(matches!(
        PartitionReader::open(&path, false),
        Err(PartitionError::BadMagic(_))
    ));
}

#[test]
fn missing_file_names_its_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.cidx");
    match QueryProcessor::<PartitionReader>::open([&missing], true) {
        Err(PartitionError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {:?}", other.map(|qp| qp.num_partitions())),
    }
}

#[test]
fn open_needs_at_least_one_path() {
    let none: [&str; 0] = [];
    assert!(matches!(
        QueryProcessor::<PartitionReader>::open(none, true),
        Err(PartitionError::NoPartitions)
    ));
}

#[test]
fn empty_corpus_partition_matches_nothing() {
    let dir = TempDir::new().unwrap();
    let empty = write_partition_file(dir.path(), "empty.cidx", &Corpus::new());
    let fruit = write_partition_file(dir.path(), "fruit.cidx", &fruit_corpus());

    let qp = QueryProcessor::<PartitionReader>::open([&empty, &fruit], true).unwrap();
    assert_eq!(qp.num_partitions(), 2);
    assert_eq!(qp.process_query(&["banana"]).unwrap().len(), 1);

    let qp = QueryProcessor::<PartitionReader>::open([&empty], true).unwrap();
    assert!(qp.process_query(&["banana"]).unwrap().is_empty());
}

#[test]
fn crawled_letter_blob_still_round_trips() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tree");
    let blob = format!("hello {}", "a".repeat(MAX_STRING_LEN + 8 * 1024));
    write_tree(&root, &[("blob.txt", blob.as_str()), ("note.txt", "hello world")]);

    let corpus = crawl(&root, &CrawlConfig::default()).unwrap();
    let path = write_partition_file(dir.path(), "tree.cidx", &corpus);

    let qp = QueryProcessor::<PartitionReader>::open([&path], true).unwrap();
    let results = qp.process_query(&["hello"]).unwrap();
    assert_eq!(results.len(), 2);
    assert!(qp.process_query(&["world"]).unwrap()[0]
        .document_name
        .ends_with("note.txt"));
}

#[test]
fn writer_refuses_what_reader_would_reject() {
    let mut corpus = Corpus::new();
    let doc = corpus.add_document("blob.txt");
    corpus
        .add_postings("a".repeat(MAX_STRING_LEN + 1), doc, vec![0])
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blob.cidx");
    assert!(matches!(
        PartitionWriter::new(&path).write(&corpus),
        Err(PartitionError::TooLarge(_))
    ));
    assert!(!path.exists());
}

#[test]
fn open_accepts_any_path_handle() {
    use std::path::Path;
    use std::rc::Rc;

    let dir = TempDir::new().unwrap();
    let path = write_partition_file(dir.path(), "fruit.cidx", &fruit_corpus());
    let handles: Vec<Rc<Path>> = vec![Rc::from(path.as_path())];

    let qp = QueryProcessor::<PartitionReader>::open(handles, true).unwrap();
    assert_eq!(qp.process_query(&["banana"]).unwrap().len(), 1);
}
