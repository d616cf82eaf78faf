//! Token stream format shared by the compressor and the decompressor
//!
//! A compressed stream is a sequence of groups. Each group starts with a
//! control byte followed by up to [`GROUP_SIZE`] tokens. Bit `k` of the
//! control byte (least significant bit first) is set when token `k` of the
//! group is a match and clear when it is a literal.
//!
//! - A literal is the raw source byte.
//! - A match is a 16-bit little-endian record: the high 6 bits hold
//!   `length - 3`, the low 10 bits hold `offset - 1`.
//!
//! There is no header and no end marker. Only the last group may hold fewer
//! than eight tokens; its unused control bits are ignored.

use crate::common::{
    GROUP_SIZE, MATCH_MAX, MATCH_MIN, MATCH_OFFSET_BITS, MATCH_RECORD_SIZE, MAX_OFFSET,
    OFFSET_MASK,
};
use crate::{Result, T2cError};

/// One unit of the token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A verbatim source byte
    Literal(u8),
    /// Copy `length` bytes starting `offset` bytes behind the output cursor
    Match {
        /// Backward distance, 1..=1024
        offset: usize,
        /// Number of bytes to copy, 3..=66
        length: usize,
    },
}

impl Token {
    /// Number of output bytes this token produces
    pub fn output_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length,
        }
    }

    /// Number of stream bytes this token occupies (control byte excluded)
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { .. } => MATCH_RECORD_SIZE,
        }
    }
}

/// Packed 16-bit match record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord(u16);

impl MatchRecord {
    /// Pack an offset/length pair, or `None` if either is out of range
    pub fn new(offset: usize, length: usize) -> Option<Self> {
        if !(1..=MAX_OFFSET).contains(&offset) || !(MATCH_MIN..=MATCH_MAX).contains(&length) {
            return None;
        }
        let length_field = ((length - MATCH_MIN) as u16) << MATCH_OFFSET_BITS;
        let offset_field = (offset - 1) as u16;
        Some(Self(length_field | offset_field))
    }

    /// Read a record from its two stream bytes
    pub fn from_bytes(bytes: [u8; MATCH_RECORD_SIZE]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Serialize the record
    pub fn to_bytes(self) -> [u8; MATCH_RECORD_SIZE] {
        self.0.to_le_bytes()
    }

    /// Backward distance encoded in the record
    pub fn offset(self) -> usize {
        (self.0 & OFFSET_MASK) as usize + 1
    }

    /// Copy length encoded in the record
    pub fn length(self) -> usize {
        (self.0 >> MATCH_OFFSET_BITS) as usize + MATCH_MIN
    }

    /// Raw 16-bit value
    pub fn raw(self) -> u16 {
        self.0
    }
}

/// Whether slot `slot` of a group is flagged as a match by `control`
#[inline]
pub fn is_match_slot(control: u8, slot: usize) -> bool {
    (control >> slot) & 1 != 0
}

/// Scratch area for one group: control byte plus up to 8 encoded tokens
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    buf: [u8; 1 + GROUP_SIZE * MATCH_RECORD_SIZE],
    len: usize,
    tokens: usize,
}

impl GroupBuilder {
    /// Create an empty group
    pub fn new() -> Self {
        Self {
            buf: [0; 1 + GROUP_SIZE * MATCH_RECORD_SIZE],
            len: 1,
            tokens: 0,
        }
    }

    /// Append a literal token
    pub fn push_literal(&mut self, byte: u8) {
        debug_assert!(!self.is_full());
        self.buf[self.len] = byte;
        self.len += 1;
        self.tokens += 1;
    }

    /// Append a match token and flag its slot in the control byte
    pub fn push_match(&mut self, record: MatchRecord) {
        debug_assert!(!self.is_full());
        self.buf[0] |= 1 << self.tokens;
        self.buf[self.len..self.len + MATCH_RECORD_SIZE].copy_from_slice(&record.to_bytes());
        self.len += MATCH_RECORD_SIZE;
        self.tokens += 1;
    }

    /// Number of tokens in the group
    pub fn token_count(&self) -> usize {
        self.tokens
    }

    /// Whether the group holds no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens == 0
    }

    /// Whether the group holds eight tokens
    pub fn is_full(&self) -> bool {
        self.tokens == GROUP_SIZE
    }

    /// Encoded group: control byte followed by the tokens
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Start a new group
    pub fn clear(&mut self) {
        self.buf[0] = 0;
        self.len = 1;
        self.tokens = 0;
    }
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the tokens of a compressed stream
///
/// Yields each token with the output position it starts at. Parsing stops
/// after the first error; a match reaching before the start of the output is
/// reported as [`T2cError::InvalidMatch`].
#[derive(Debug, Clone)]
pub struct TokenIter<'a> {
    src: &'a [u8],
    pos: usize,
    control: u8,
    slot: usize,
    out: usize,
    groups: usize,
    failed: bool,
}

impl<'a> TokenIter<'a> {
    /// Start parsing `src` from its first control byte
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            control: 0,
            slot: GROUP_SIZE,
            out: 0,
            groups: 0,
            failed: false,
        }
    }

    /// Output bytes described by the tokens yielded so far
    pub fn output_position(&self) -> usize {
        self.out
    }

    /// Stream bytes consumed so far
    pub fn input_position(&self) -> usize {
        self.pos
    }

    /// Control bytes read so far
    pub fn group_count(&self) -> usize {
        self.groups
    }

    fn read_token(&mut self) -> Result<Token> {
        if !is_match_slot(self.control, self.slot) {
            let byte = self.src[self.pos];
            self.pos += 1;
            return Ok(Token::Literal(byte));
        }

        if self.src.len() - self.pos < MATCH_RECORD_SIZE {
            return Err(T2cError::TruncatedInput { position: self.pos });
        }
        let record = MatchRecord::from_bytes([self.src[self.pos], self.src[self.pos + 1]]);
        let (offset, length) = (record.offset(), record.length());
        if offset > self.out {
            return Err(T2cError::InvalidMatch {
                offset,
                position: self.out,
            });
        }
        self.pos += MATCH_RECORD_SIZE;
        Ok(Token::Match { offset, length })
    }
}

impl Iterator for TokenIter<'_> {
    type Item = Result<(usize, Token)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if self.slot == GROUP_SIZE {
            if self.pos >= self.src.len() {
                return None;
            }
            self.control = self.src[self.pos];
            self.pos += 1;
            self.slot = 0;
            self.groups += 1;
        }

        // A trailing partial group ends where the input does
        if self.pos >= self.src.len() {
            return None;
        }

        match self.read_token() {
            Ok(token) => {
                let start = self.out;
                self.out += token.output_len();
                self.slot += 1;
                Some(Ok((start, token)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
