// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Every count, id and length in a partition file is a varint. Decode must
//! return Err on garbage, and valid decodes must roundtrip exactly.

#![no_main]

use concord::binary::{decode_varint, decode_zigzag, encode_varint, encode_zigzag};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_varint(data) {
        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);

        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoding of a valid value decodes");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());

        assert!(consumed <= 10, "varint consumed {} bytes", consumed);
        assert!(consumed <= data.len());

        // Zigzag is a bijection on i64
        assert_eq!(encode_zigzag(decode_zigzag(value)), value);
    }
});
