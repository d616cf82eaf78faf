//! Match Index: 3-byte prefix hash table used by the compressor
//!
//! Each bucket remembers the most recent source position whose next three
//! bytes hashed to it. Buckets are overwritten, never chained, so a lookup is
//! O(1) and the memory footprint is fixed. Collisions only cost compression
//! ratio: the encoder verifies every candidate before using it.

use super::allocator::{Slot, EMPTY_SLOT};
use crate::{Result, T2cError};

/// Hash of the three bytes starting a prefix, before bucket masking
#[inline]
pub const fn prefix_hash(b0: u8, b1: u8, b2: u8) -> usize {
    (b0 as usize).wrapping_add(13) ^ (b1 as usize).wrapping_sub(13) ^ (b2 as usize)
}

/// Fixed-capacity prefix table over caller-provided storage
#[derive(Debug)]
pub struct MatchIndex<'a> {
    table: &'a mut [Slot],
    mask: usize,
}

impl<'a> MatchIndex<'a> {
    /// Build an empty index over `table`
    ///
    /// The table length must be a non-zero power of two. Existing contents are
    /// discarded.
    pub fn new(table: &'a mut [Slot]) -> Result<Self> {
        if !table.len().is_power_of_two() {
            return Err(T2cError::InvalidBucketCount(table.len()));
        }
        table.fill(EMPTY_SLOT);
        let mask = table.len() - 1;
        Ok(Self { table, mask })
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.table.len()
    }

    /// Bucket for the prefix starting at `src[pos]`
    ///
    /// `pos + 3` must not exceed `src.len()`.
    #[inline]
    pub fn bucket(&self, src: &[u8], pos: usize) -> usize {
        prefix_hash(src[pos], src[pos + 1], src[pos + 2]) & self.mask
    }

    /// Latest position recorded for the prefix at `pos`
    pub fn lookup(&self, src: &[u8], pos: usize) -> Option<usize> {
        match self.table[self.bucket(src, pos)] {
            EMPTY_SLOT => None,
            found => Some(found),
        }
    }

    /// Record `pos` as the latest occurrence of its prefix
    pub fn insert(&mut self, src: &[u8], pos: usize) {
        let bucket = self.bucket(src, pos);
        self.table[bucket] = pos;
    }

    /// Lookup then insert with a single hash computation
    #[inline]
    pub fn lookup_and_insert(&mut self, src: &[u8], pos: usize) -> Option<usize> {
        let bucket = self.bucket(src, pos);
        let previous = std::mem::replace(&mut self.table[bucket], pos);
        (previous != EMPTY_SLOT).then_some(previous)
    }
}
