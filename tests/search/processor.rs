//! Cross-partition merging through `QueryProcessor`.

use std::sync::Arc;

use concord::{Corpus, DocId, Partition, PartitionReader, QueryError, QueryProcessor};
use tempfile::TempDir;

use crate::common::{fruit_corpus, pantry_corpus, ranked, write_partition_file};

fn two_partitions() -> QueryProcessor<Corpus> {
    QueryProcessor::new(vec![fruit_corpus(), pantry_corpus()]).unwrap()
}

#[test]
fn single_partition_orders_by_rank_descending() {
    let qp = QueryProcessor::new(vec![fruit_corpus()]).unwrap();
    let results = qp.process_query(&["apple"]).unwrap();
    assert_eq!(ranked(&results), vec![("doc1.txt", 3), ("doc2.txt", 1)]);
}

#[test]
fn merge_interleaves_partitions_and_breaks_ties_on_name() {
    let results = two_partitions().process_query(&["apple"]).unwrap();
    assert_eq!(
        ranked(&results),
        vec![
            ("doc1.txt", 3),
            ("pantry/pie.txt", 2),
            ("doc1.txt", 1),
            ("doc2.txt", 1),
            ("pantry/jam.txt", 1),
        ]
    );
}

#[test]
fn same_name_in_two_partitions_is_not_deduplicated() {
    let results = two_partitions().process_query(&["apple"]).unwrap();
    let doc1 = results
        .iter()
        .filter(|r| r.document_name == "doc1.txt")
        .count();
    assert_eq!(doc1, 2);
}

#[test]
fn partition_without_a_term_only_drops_itself() {
    let qp = two_partitions();

    let results = qp.process_query(&["jam"]).unwrap();
    assert_eq!(ranked(&results), vec![("pantry/jam.txt", 1)]);

    let results = qp.process_query(&["apple", "banana"]).unwrap();
    assert_eq!(ranked(&results), vec![("doc1.txt", 4), ("pantry/pie.txt", 3)]);
}

#[test]
fn no_match_anywhere_is_empty_not_error() {
    let qp = two_partitions();
    assert_eq!(qp.process_query(&["grape"]).unwrap(), vec![]);
    assert_eq!(qp.process_query(&["jam", "banana"]).unwrap(), vec![]);
}

#[test]
fn empty_query_is_rejected() {
    let empty: [&str; 0] = [];
    assert_eq!(
        two_partitions().process_query(&empty),
        Err(QueryError::EmptyQuery)
    );
}

#[test]
fn processor_needs_a_partition() {
    assert!(matches!(
        QueryProcessor::<Corpus>::new(vec![]),
        Err(QueryError::NoPartitions)
    ));
}

#[test]
fn unnamed_doc_id_aborts_query() {
    let mut broken = Corpus::new();
    broken
        .add_postings("apple".to_string(), DocId(9), vec![0])
        .unwrap();

    let qp = QueryProcessor::new(vec![fruit_corpus(), broken]).unwrap();
    assert_eq!(
        qp.process_query(&["apple"]),
        Err(QueryError::MissingDocument {
            partition: 1,
            doc_id: DocId(9)
        })
    );
    // Other queries that never touch the broken document still work.
    assert_eq!(ranked(&qp.process_query(&["banana"]).unwrap()), vec![("doc1.txt", 1)]);
}

#[test]
fn borrowed_partitions_work() {
    let fruit = fruit_corpus();
    let pantry = pantry_corpus();
    let qp = QueryProcessor::new(vec![&fruit, &pantry]).unwrap();
    assert_eq!(qp.num_partitions(), 2);
    assert_eq!(
        qp.process_query(&["banana"]).unwrap(),
        two_partitions().process_query(&["banana"]).unwrap()
    );
}

#[test]
fn in_memory_and_file_partitions_mix() {
    let dir = TempDir::new().unwrap();
    let path = write_partition_file(dir.path(), "pantry.cidx", &pantry_corpus());
    let reader = PartitionReader::open(&path, true).unwrap();

    let partitions: Vec<Box<dyn Partition>> = vec![Box::new(fruit_corpus()), Box::new(reader)];
    let qp = QueryProcessor::new(partitions).unwrap();

    assert_eq!(
        qp.process_query(&["apple"]).unwrap(),
        two_partitions().process_query(&["apple"]).unwrap()
    );
}

#[test]
fn shared_processor_answers_from_many_threads() {
    let qp = Arc::new(QueryProcessor::new(vec![Arc::new(fruit_corpus()), Arc::new(pantry_corpus())]).unwrap());
    let expected = qp.process_query(&["apple"]).unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let qp = Arc::clone(&qp);
            let expected = &expected;
            s.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(&qp.process_query(&["apple"]).unwrap(), expected);
                }
            });
        }
    });
}
