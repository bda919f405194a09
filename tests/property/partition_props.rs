//! Partition files answer exactly like the corpus they were written from,
//! and hostile bytes never panic the reader.

use concord::{write_partition, Partition, PartitionReader};
use proptest::prelude::*;

use crate::{corpus_strategy, VOCABULARY};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_file_lookups_match_corpus(corpus in corpus_strategy()) {
        let bytes = write_partition(&corpus).unwrap();
        let reader = PartitionReader::from_bytes(bytes, true).unwrap();

        prop_assert_eq!(reader.num_docs(), corpus.docs().len());
        prop_assert_eq!(reader.num_words(), corpus.index().num_words());
        for (doc_id, name) in corpus.docs().iter() {
            prop_assert_eq!(reader.doc_name(doc_id), Some(name));
        }
        for word in VOCABULARY {
            prop_assert_eq!(reader.lookup_word(word), corpus.lookup_word(word));
            if let Some(entry) = corpus.index().get(word) {
                for (&doc_id, positions) in entry.postings() {
                    let decoded = reader.positions(word, doc_id).unwrap();
                    prop_assert_eq!(decoded.as_ref(), Some(positions));
                }
            }
        }
    }

    #[test]
    fn prop_writer_is_deterministic(corpus in corpus_strategy()) {
        prop_assert_eq!(write_partition(&corpus).unwrap(), write_partition(&corpus).unwrap());
    }

    #[test]
    fn prop_truncation_is_always_rejected(corpus in corpus_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = write_partition(&corpus).unwrap();
        let len = cut.index(bytes.len());
        prop_assert!(PartitionReader::from_bytes(bytes[..len].to_vec(), false).is_err());
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = PartitionReader::from_bytes(bytes.clone(), true);
        if let Ok(reader) = PartitionReader::from_bytes(bytes, false) {
            for word in VOCABULARY {
                let _ = reader.lookup_word(word);
            }
        }
    }

    #[test]
    fn prop_single_bit_flip_fails_validation(corpus in corpus_strategy(), at in any::<prop::sample::Index>(), bit in 0u8..8) {
        let mut bytes = write_partition(&corpus).unwrap();
        let i = at.index(bytes.len());
        bytes[i] ^= 1 << bit;
        prop_assert!(PartitionReader::from_bytes(bytes, true).is_err());
    }
}
