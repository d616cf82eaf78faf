//! Greedy single-pass encoder
//!
//! Walks the source once. At every position that still has three bytes of
//! lookahead it asks the Match Index for the latest occurrence of the same
//! prefix, always records the current position, and emits the verified match
//! if there is one. Everything else becomes a literal.

use super::index::MatchIndex;
use crate::common::{CompressionStats, MATCH_MAX, MATCH_MIN, MAX_OFFSET};
use crate::sink::ByteSink;
use crate::token::{GroupBuilder, MatchRecord};
use crate::Result;

/// Encoder state for one compression call
#[derive(Debug)]
pub struct Encoder<'s, 'i, 't, S: ByteSink> {
    src: &'s [u8],
    index: &'i mut MatchIndex<'t>,
    sink: &'i mut S,
    group: GroupBuilder,
    stats: CompressionStats,
}

impl<'s, 'i, 't, S: ByteSink> Encoder<'s, 'i, 't, S> {
    /// Prepare to encode `src` into `sink`
    pub fn new(src: &'s [u8], index: &'i mut MatchIndex<'t>, sink: &'i mut S) -> Self {
        Self {
            src,
            index,
            sink,
            group: GroupBuilder::new(),
            stats: CompressionStats {
                uncompressed_bytes: src.len(),
                ..Default::default()
            },
        }
    }

    /// Encode the whole source
    pub fn run(mut self) -> Result<CompressionStats> {
        let start = self.sink.position();
        let len = self.src.len();
        let mut pos = 0;

        while pos < len {
            if len - pos < MATCH_MIN {
                // Not enough lookahead for a match: the tail is literal
                self.emit_literal(self.src[pos])?;
                pos += 1;
                continue;
            }

            match self.find_match(pos) {
                Some(record) => {
                    self.emit_match(record)?;
                    pos += record.length();
                }
                None => {
                    self.emit_literal(self.src[pos])?;
                    pos += 1;
                }
            }
        }

        self.flush_group()?;
        self.stats.compressed_bytes = self.sink.position() - start;
        Ok(self.stats)
    }

    /// Find a verified, encodable match for the prefix at `pos`
    ///
    /// `pos` is recorded in the index whatever the outcome.
    fn find_match(&mut self, pos: usize) -> Option<MatchRecord> {
        let candidate = self.index.lookup_and_insert(self.src, pos)?;
        let offset = pos.checked_sub(candidate).filter(|&d| d > 0)?;
        if offset > MAX_OFFSET {
            return None;
        }

        let max_length = (self.src.len() - pos).min(MATCH_MAX);
        let length = self.src[candidate..]
            .iter()
            .zip(&self.src[pos..pos + max_length])
            .take_while(|(a, b)| a == b)
            .count();

        MatchRecord::new(offset, length)
    }

    fn emit_literal(&mut self, byte: u8) -> Result<()> {
        self.group.push_literal(byte);
        self.stats.literal_count += 1;
        self.flush_if_full()
    }

    fn emit_match(&mut self, record: MatchRecord) -> Result<()> {
        self.group.push_match(record);
        self.stats.match_count += 1;
        self.stats.longest_match = self.stats.longest_match.max(record.length());
        self.flush_if_full()
    }

    fn flush_if_full(&mut self) -> Result<()> {
        if self.group.is_full() {
            self.flush_group()?;
        }
        Ok(())
    }

    fn flush_group(&mut self) -> Result<()> {
        if self.group.is_empty() {
            return Ok(());
        }
        self.sink.put(self.group.as_bytes())?;
        self.stats.group_count += 1;
        self.group.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::allocator::Slot;
    use crate::sink::{CountingSink, VecSink};

    fn encode(src: &[u8]) -> (Vec<u8>, CompressionStats) {
        let mut storage: [Slot; 256] = [0; 256];
        let mut index = MatchIndex::new(&mut storage).unwrap();
        let mut sink = VecSink::default();
        let stats = Encoder::new(src, &mut index, &mut sink).run().unwrap();
        (sink.into_inner(), stats)
    }

    #[test]
    fn test_empty_input() {
        let (out, stats) = encode(b"");
        assert!(out.is_empty());
        assert_eq!(stats.group_count, 0);
    }

    #[test]
    fn test_short_input_is_literal() {
        let (out, stats) = encode(b"ab");
        assert_eq!(out, vec![0x00, b'a', b'b']);
        assert_eq!(stats.literal_count, 2);
        assert_eq!(stats.match_count, 0);
    }

    #[test]
    fn test_run_of_ten() {
        let (out, stats) = encode(b"AAAAAAAAAA");
        assert_eq!(out, vec![0x02, b'A', 0x00, 0x18]);
        assert_eq!(stats.literal_count, 1);
        assert_eq!(stats.match_count, 1);
        assert_eq!(stats.longest_match, 9);
        assert_eq!(stats.compressed_bytes, 4);
    }

    #[test]
    fn test_match_capped_at_max_length() {
        let src = [b'z'; 100];
        let (out, stats) = encode(&src);
        // literal, match 66, match 33
        assert_eq!(stats.literal_count, 1);
        assert_eq!(stats.match_count, 2);
        assert_eq!(stats.longest_match, MATCH_MAX);
        assert_eq!(out.len(), 1 + 1 + 2 + 2);
    }

    #[test]
    fn test_groups_of_eight() {
        let src = b"0123456789";
        let (out, stats) = encode(src);
        assert_eq!(stats.group_count, 2);
        assert_eq!(out[0], 0x00);
        assert_eq!(&out[1..9], b"01234567");
        assert_eq!(out[9], 0x00);
        assert_eq!(&out[10..], b"89");
    }

    #[test]
    fn test_counting_matches_real_pass() {
        let src = b"the quick brown fox jumps over the quick brown dog";
        let (out, _) = encode(src);

        let mut storage: [Slot; 256] = [0; 256];
        let mut index = MatchIndex::new(&mut storage).unwrap();
        let mut sink = CountingSink::new();
        let stats = Encoder::new(src, &mut index, &mut sink).run().unwrap();
        assert_eq!(stats.compressed_bytes, out.len());
    }
}
