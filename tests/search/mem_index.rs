//! Single-index AND search over a `MemIndex`.

use concord::{Corpus, DocId, IndexError, MemIndex, QueryError, SearchResult};

use crate::common::{corpus_from, doc, fruit_corpus, named};

#[test]
fn single_term_ranks_ascend() {
    let corpus = fruit_corpus();
    let results = corpus.search(&["apple"]).unwrap();
    assert_eq!(named(&corpus, &results), vec![("doc2.txt", 1), ("doc1.txt", 3)]);
}

#[test]
fn conjunction_drops_docs_missing_a_term() {
    let corpus = fruit_corpus();
    let results = corpus.search(&["apple", "banana"]).unwrap();
    assert_eq!(
        results,
        vec![SearchResult {
            doc_id: doc(&corpus, "doc1.txt"),
            rank: 4
        }]
    );
}

#[test]
fn unknown_term_fails_whole_query() {
    let corpus = fruit_corpus();
    assert_eq!(corpus.search(&["banana", "grape"]), Err(QueryError::NoMatch));
    assert_eq!(corpus.search(&["grape", "banana"]), Err(QueryError::NoMatch));
    assert!(corpus.search(&["banana"]).is_ok());
}

#[test]
fn disjoint_terms_fail_with_no_match() {
    let corpus = corpus_from(&[
        ("a.txt", vec![("red", vec![0])]),
        ("b.txt", vec![("blue", vec![0])]),
    ]);
    assert_eq!(corpus.search(&["red", "blue"]), Err(QueryError::NoMatch));
}

#[test]
fn empty_query_is_invalid() {
    let empty: [&str; 0] = [];
    assert_eq!(fruit_corpus().search(&empty), Err(QueryError::EmptyQuery));
    assert_eq!(MemIndex::new().search(&empty), Err(QueryError::EmptyQuery));
}

#[test]
fn term_order_does_not_change_rank() {
    let corpus = fruit_corpus();
    assert_eq!(
        corpus.search(&["banana", "apple"]).unwrap(),
        corpus.search(&["apple", "banana"]).unwrap()
    );
}

#[test]
fn repeated_term_counts_twice() {
    let corpus = fruit_corpus();
    let results = corpus.search(&["apple", "apple"]).unwrap();
    assert_eq!(named(&corpus, &results), vec![("doc2.txt", 2), ("doc1.txt", 6)]);
}

#[test]
fn lookup_is_case_sensitive() {
    assert_eq!(fruit_corpus().search(&["Apple"]), Err(QueryError::NoMatch));
}

#[test]
fn equal_ranks_keep_doc_id_order() {
    let corpus = corpus_from(&[
        ("c.txt", vec![("tie", vec![1])]),
        ("a.txt", vec![("tie", vec![2])]),
        ("b.txt", vec![("tie", vec![3])]),
    ]);
    let results = corpus.search(&["tie"]).unwrap();
    let ids: Vec<DocId> = results.iter().map(|r| r.doc_id).collect();
    assert_eq!(ids, vec![DocId(1), DocId(2), DocId(3)]);
}

#[test]
fn duplicate_posting_is_rejected_and_index_unchanged() {
    let mut corpus = fruit_corpus();
    let doc1 = doc(&corpus, "doc1.txt");
    let before = corpus.search(&["apple"]).unwrap();

    let err = corpus
        .add_postings("apple".to_string(), doc1, vec![99])
        .unwrap_err();
    assert_eq!(
        err,
        IndexError::DuplicatePosting {
            word: "apple".to_string(),
            doc_id: doc1
        }
    );
    assert_eq!(corpus.search(&["apple"]).unwrap(), before);
}

#[test]
fn empty_posting_list_is_rejected() {
    let mut corpus = Corpus::new();
    let d = corpus.add_document("a.txt");
    assert!(matches!(
        corpus.add_postings("kiwi".to_string(), d, vec![]),
        Err(IndexError::EmptyPostingList { .. })
    ));
    assert!(corpus.index().is_empty());
}

#[test]
fn second_posting_for_existing_word_reuses_entry() {
    let corpus = fruit_corpus();
    let entry = corpus.index().get("apple").unwrap();
    assert_eq!(entry.word(), "apple");
    assert_eq!(entry.doc_count(), 2);
    assert_eq!(corpus.index().num_words(), 2);
}

#[test]
fn search_does_not_mutate_index() {
    let corpus = fruit_corpus();
    let words = corpus.index().num_words();
    let _ = corpus.search(&["apple", "grape"]);
    let _ = corpus.search(&["banana"]);
    assert_eq!(corpus.index().num_words(), words);
    assert_eq!(
        corpus.index().get("apple").unwrap().positions(DocId(1)),
        Some(&vec![0, 12, 40])
    );
}
