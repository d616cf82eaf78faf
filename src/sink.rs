//! Output destinations for the two engines
//!
//! The encoder and decoder are written once against [`ByteSink`] and
//! [`DecodeSink`]. The destination mode is picked by the sink type:
//!
//! - [`SliceSink`] writes into a caller buffer and fails instead of
//!   overflowing it.
//! - [`CountingSink`] writes nothing and only advances its position. This is
//!   the size-query mode.
//! - [`VecSink`] grows a `Vec<u8>` as needed.

use crate::{Result, T2cError};

/// Append-only byte destination used by the encoder
pub trait ByteSink {
    /// Append `bytes`
    ///
    /// If they do not all fit, nothing is written and
    /// [`T2cError::DestinationTooSmall`] is returned.
    fn put(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of bytes produced so far
    fn position(&self) -> usize;
}

/// Destination used by the decoder
pub trait DecodeSink {
    /// Append one literal byte
    fn put_literal(&mut self, byte: u8) -> Result<()>;

    /// Copy `length` bytes starting `offset` bytes behind the cursor
    ///
    /// `length` may exceed `offset`; the copy then repeats the last `offset`
    /// bytes periodically. An `offset` of zero or one reaching before the
    /// first output byte is rejected with [`T2cError::InvalidMatch`]. The
    /// decoder never triggers this since [`TokenIter`](crate::TokenIter)
    /// already validates offsets; it guards sinks driven directly.
    fn put_match(&mut self, offset: usize, length: usize) -> Result<()>;

    /// Number of bytes produced so far
    fn position(&self) -> usize;
}

fn check_offset(offset: usize, position: usize) -> Result<()> {
    if offset == 0 || offset > position {
        return Err(T2cError::InvalidMatch { offset, position });
    }
    Ok(())
}

/// Forward byte-by-byte copy inside `buf`
///
/// Must stay a forward loop: when `offset < length` the bytes written early in
/// the copy are the source of the later ones.
#[inline]
fn copy_within_forward(buf: &mut [u8], pos: usize, offset: usize, length: usize) {
    let start = pos - offset;
    for k in 0..length {
        buf[pos + k] = buf[start + k];
    }
}

/// Bounded caller-owned destination
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    /// Wrap `buf`; its length is the declared capacity
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn reserve(&self, len: usize) -> Result<()> {
        let needed = self.pos + len;
        if needed > self.buf.len() {
            return Err(T2cError::DestinationTooSmall {
                needed,
                capacity: self.buf.len(),
            });
        }
        Ok(())
    }
}

impl<'a> From<&'a mut [u8]> for SliceSink<'a> {
    fn from(buf: &'a mut [u8]) -> Self {
        Self::new(buf)
    }
}

impl ByteSink for SliceSink<'_> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

impl DecodeSink for SliceSink<'_> {
    fn put_literal(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?;
        self.buf[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }

    fn put_match(&mut self, offset: usize, length: usize) -> Result<()> {
        check_offset(offset, self.pos)?;
        self.reserve(length)?;
        copy_within_forward(self.buf, self.pos, offset, length);
        self.pos += length;
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Size-query destination: counts bytes without storing them
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    pos: usize,
}

impl CountingSink {
    /// Start counting from zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteSink for CountingSink {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.pos += bytes.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

impl DecodeSink for CountingSink {
    fn put_literal(&mut self, _byte: u8) -> Result<()> {
        self.pos += 1;
        Ok(())
    }

    fn put_match(&mut self, offset: usize, length: usize) -> Result<()> {
        // Same validation as a real pass so both modes agree on every input
        check_offset(offset, self.pos)?;
        self.pos += length;
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Growable destination
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    vec: Vec<u8>,
}

impl VecSink {
    /// Create an empty sink with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vec: Vec::with_capacity(capacity),
        }
    }

    /// Take the produced bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.vec
    }
}

impl From<Vec<u8>> for VecSink {
    fn from(mut vec: Vec<u8>) -> Self {
        vec.clear();
        Self { vec }
    }
}

impl ByteSink for VecSink {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.vec.extend_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> usize {
        self.vec.len()
    }
}

impl DecodeSink for VecSink {
    fn put_literal(&mut self, byte: u8) -> Result<()> {
        self.vec.push(byte);
        Ok(())
    }

    fn put_match(&mut self, offset: usize, length: usize) -> Result<()> {
        let pos = self.vec.len();
        check_offset(offset, pos)?;
        self.vec.resize(pos + length, 0);
        copy_within_forward(&mut self.vec, pos, offset, length);
        Ok(())
    }

    fn position(&self) -> usize {
        self.vec.len()
    }
}
