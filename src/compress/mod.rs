//! T2C compression
//!
//! This module holds the encoder, the Match Index it relies on and the
//! allocators that place the index. It is only built with the `compressor`
//! feature; decode-only consumers do not need any of it.

mod allocator;
mod encoder;
mod index;

pub use allocator::{HeapAllocator, IndexAllocator, Slot, StackAllocator, EMPTY_SLOT};
pub use encoder::Encoder;
pub use index::{prefix_hash, MatchIndex};

use crate::common::{max_compressed_len, CompressionStats, DEFAULT_BUCKET_COUNT};
use crate::sink::{ByteSink, CountingSink, SliceSink, VecSink};
use crate::{Result, T2cError};

/// Compressor configuration
///
/// Holds the Match Index capacity. More buckets mean fewer collisions and a
/// better ratio at the cost of a larger table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compressor {
    bucket_count: usize,
}

impl Compressor {
    /// Create a compressor using `bucket_count` Match Index buckets
    ///
    /// The count must be a non-zero power of two.
    pub fn new(bucket_count: usize) -> Result<Self> {
        if !bucket_count.is_power_of_two() {
            return Err(T2cError::InvalidBucketCount(bucket_count));
        }
        Ok(Self { bucket_count })
    }

    /// Number of Match Index buckets
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Compress `src` into `dest`, or return the required size when `dest` is `None`
    ///
    /// The Match Index is placed on the heap.
    pub fn compress(&self, src: &[u8], dest: Option<&mut [u8]>) -> Result<usize> {
        self.compress_with(src, dest, &mut HeapAllocator::new())
    }

    /// Like [`Compressor::compress`], placing the Match Index with `allocator`
    pub fn compress_with<A: IndexAllocator>(
        &self,
        src: &[u8],
        dest: Option<&mut [u8]>,
        allocator: &mut A,
    ) -> Result<usize> {
        let stats = match dest {
            Some(buf) => self.run(src, &mut SliceSink::new(buf), allocator)?,
            None => self.run(src, &mut CountingSink::new(), allocator)?,
        };
        Ok(stats.compressed_bytes)
    }

    /// Exact compressed size of `src`
    pub fn compressed_len(&self, src: &[u8]) -> Result<usize> {
        self.compress(src, None)
    }

    /// Compress `src` into a new vector
    pub fn compress_to_vec(&self, src: &[u8]) -> Result<Vec<u8>> {
        self.compress_with_stats(src).map(|(out, _)| out)
    }

    /// Compress `src` into a new vector and report what the encoder did
    pub fn compress_with_stats(&self, src: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let mut sink = VecSink::with_capacity(max_compressed_len(src.len()));
        let stats = self.run(src, &mut sink, &mut HeapAllocator::new())?;
        Ok((sink.into_inner(), stats))
    }

    fn run<S: ByteSink, A: IndexAllocator>(
        &self,
        src: &[u8],
        sink: &mut S,
        allocator: &mut A,
    ) -> Result<CompressionStats> {
        let result = allocator
            .acquire(self.bucket_count)
            .and_then(MatchIndex::new)
            .and_then(|mut index| Encoder::new(src, &mut index, sink).run());
        allocator.release();
        let stats = result?;

        log::debug!(
            "compressed {} bytes into {} ({} literals, {} matches, {} groups)",
            stats.uncompressed_bytes,
            stats.compressed_bytes,
            stats.literal_count,
            stats.match_count,
            stats.group_count
        );
        Ok(stats)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}
