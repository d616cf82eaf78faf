//! Property-based tests for the T2C codec
//!
//! These tests use randomized inputs to verify correctness across a wide range
//! of data patterns and edge cases.

use proptest::prelude::*;
use t2c::{
    compress, compress_to_vec, decompress, decompress_to_vec, decompressed_len,
    max_compressed_len, Compressor, Token, TokenIter, MATCH_MAX, MATCH_MIN, MAX_OFFSET,
};

fn bucket_count() -> impl Strategy<Value = usize> {
    (0u32..17).prop_map(|shift| 1usize << shift)
}

proptest! {
    #[test]
    fn test_decompression_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Random bytes are rarely a valid stream, but must only ever produce errors
        let _ = decompress_to_vec(&data);
        let mut out = [0u8; 64];
        let _ = decompress(&data, Some(&mut out[..]));
    }
}

proptest! {
    #[test]
    fn test_size_query_agrees_with_decode(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Both passes must accept or reject the same inputs
        match (decompressed_len(&data), decompress_to_vec(&data)) {
            (Ok(len), Ok(out)) => prop_assert_eq!(len, out.len()),
            (Err(_), Err(_)) => {}
            (len, out) => prop_assert!(false, "size query {:?} vs decode {:?}", len, out.map(|o| o.len())),
        }
    }
}

proptest! {
    #[test]
    fn test_round_trip(data in prop::collection::vec(any::<u8>(), 0..4096), buckets in bucket_count()) {
        let compressor = Compressor::new(buckets)?;
        let compressed = compressor.compress_to_vec(&data)?;
        let decompressed = decompress_to_vec(&compressed)?;
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_small_inputs(data in prop::collection::vec(any::<u8>(), 0..10)) {
        let compressed = compress_to_vec(&data)?;
        let decompressed = decompress_to_vec(&compressed)?;
        prop_assert_eq!(&decompressed[..], &data[..]);
    }
}

proptest! {
    #[test]
    fn test_worst_case_bound(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let compressed = compress_to_vec(&data)?;
        prop_assert!(compressed.len() <= max_compressed_len(data.len()),
            "{} bytes compressed to {}", data.len(), compressed.len());
    }
}

proptest! {
    #[test]
    fn test_size_query_is_exact(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let size = compress(&data, None)?;
        let mut compressed = vec![0u8; size];
        prop_assert_eq!(compress(&data, Some(&mut compressed[..]))?, size);

        let size = decompress(&compressed, None)?;
        prop_assert_eq!(size, data.len());
        let mut decompressed = vec![0u8; size];
        prop_assert_eq!(decompress(&compressed, Some(&mut decompressed[..]))?, size);
        prop_assert_eq!(decompressed, data);
    }
}

proptest! {
    #[test]
    fn test_tokens_in_range(
        pattern in prop::collection::vec(any::<u8>(), 1..20),
        repeat_count in 2..200usize
    ) {
        let data: Vec<u8> = pattern.iter().copied().cycle().take(pattern.len() * repeat_count).collect();
        let compressed = compress_to_vec(&data)?;

        for item in TokenIter::new(&compressed) {
            let (position, token) = item?;
            if let Token::Match { offset, length } = token {
                prop_assert!(offset <= MAX_OFFSET && offset <= position);
                prop_assert!((MATCH_MIN..=MATCH_MAX).contains(&length));
            }
        }
        prop_assert_eq!(decompress_to_vec(&compressed)?, data);
    }
}

proptest! {
    #[test]
    fn test_single_byte_patterns(byte_value in any::<u8>(), size in 1..3000usize) {
        let data = vec![byte_value; size];
        let compressed = compress_to_vec(&data)?;
        prop_assert_eq!(decompress_to_vec(&compressed)?, data);
        // A run costs about 2 bytes per 66 bytes of input
        prop_assert!(compressed.len() <= 4 + size / 20);
    }
}

proptest! {
    #[test]
    fn test_truncation_never_panics(
        data in prop::collection::vec(0u8..4, 0..600),
        cut in any::<prop::sample::Index>()
    ) {
        let compressed = compress_to_vec(&data)?;
        let keep = if compressed.is_empty() { 0 } else { cut.index(compressed.len()) };
        if let Ok(out) = decompress_to_vec(&compressed[..keep]) {
            // Whatever decodes is a prefix of the original
            prop_assert_eq!(&out[..], &data[..out.len()]);
        }
    }
}

proptest! {
    #[test]
    fn test_compression_deterministic(data in prop::collection::vec(any::<u8>(), 10..500)) {
        let compressed1 = compress_to_vec(&data)?;
        let compressed2 = compress_to_vec(&data)?;
        prop_assert_eq!(compressed1, compressed2);
    }
}
