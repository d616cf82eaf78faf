//! Token stream decoder
//!
//! Replays the tokens of a compressed stream into a [`DecodeSink`]. Whether
//! bytes are actually written (and how bounds are enforced) is up to the sink.

use crate::common::CompressionStats;
use crate::sink::DecodeSink;
use crate::token::{Token, TokenIter};
use crate::Result;

/// Decoder state for one decompression call
#[derive(Debug)]
pub struct Decoder<'s, 'o, S: DecodeSink> {
    tokens: TokenIter<'s>,
    sink: &'o mut S,
    stats: CompressionStats,
}

impl<'s, 'o, S: DecodeSink> Decoder<'s, 'o, S> {
    /// Prepare to decode `src` into `sink`
    pub fn new(src: &'s [u8], sink: &'o mut S) -> Self {
        Self {
            tokens: TokenIter::new(src),
            sink,
            stats: CompressionStats {
                compressed_bytes: src.len(),
                ..Default::default()
            },
        }
    }

    /// Decode until the compressed input is exhausted
    pub fn run(mut self) -> Result<CompressionStats> {
        let start = self.sink.position();

        while let Some(item) = self.tokens.next() {
            match item? {
                (_, Token::Literal(byte)) => {
                    self.sink.put_literal(byte)?;
                    self.stats.literal_count += 1;
                }
                (_, Token::Match { offset, length }) => {
                    self.sink.put_match(offset, length)?;
                    self.stats.match_count += 1;
                    self.stats.longest_match = self.stats.longest_match.max(length);
                }
            }
        }

        self.stats.group_count = self.tokens.group_count();
        self.stats.uncompressed_bytes = self.sink.position() - start;
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{CountingSink, SliceSink, VecSink};
    use crate::T2cError;

    #[test]
    fn test_decode_run() {
        let mut sink = VecSink::default();
        let stats = Decoder::new(&[0x02, b'A', 0x00, 0x18], &mut sink)
            .run()
            .unwrap();
        assert_eq!(sink.into_inner(), b"AAAAAAAAAA");
        assert_eq!(stats.literal_count, 1);
        assert_eq!(stats.match_count, 1);
        assert_eq!(stats.group_count, 1);
        assert_eq!(stats.uncompressed_bytes, 10);
    }

    #[test]
    fn test_decode_periodic_copy() {
        // "ab" then offset 2, length 7
        let stream = [0x04, b'a', b'b', 0x01, 0x10];
        let mut out = [0u8; 9];
        let mut sink = SliceSink::new(&mut out);
        let stats = Decoder::new(&stream, &mut sink).run().unwrap();
        assert_eq!(stats.uncompressed_bytes, 9);
        assert_eq!(&out, b"ababababa");
    }

    #[test]
    fn test_size_query() {
        let stream = [0x02, b'x', 0x00, 0xFC];
        let mut sink = CountingSink::new();
        let stats = Decoder::new(&stream, &mut sink).run().unwrap();
        assert_eq!(stats.uncompressed_bytes, 67);
    }

    #[test]
    fn test_stops_at_end_of_partial_group() {
        // High control bits are set but the input ends after one literal
        let stream = [0xFE, b'q'];
        let mut sink = VecSink::default();
        Decoder::new(&stream, &mut sink).run().unwrap();
        assert_eq!(sink.into_inner(), b"q");
    }

    #[test]
    fn test_destination_too_small() {
        let mut out = [0u8; 9];
        let mut sink = SliceSink::new(&mut out);
        let result = Decoder::new(&[0x02, b'A', 0x00, 0x18], &mut sink).run();
        assert!(matches!(
            result,
            Err(T2cError::DestinationTooSmall {
                needed: 10,
                capacity: 9
            })
        ));
    }
}
