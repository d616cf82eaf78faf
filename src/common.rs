//! Common types and constants for the T2C codec
//!
//! This module defines the format parameters, the error type and the
//! statistics record shared by the compressor and the decompressor.

use thiserror::Error;

/// Width of a match record in bits
pub const MATCH_RECORD_BITS: u32 = 16;

/// Number of bits holding `length - MATCH_MIN` in a match record
pub const MATCH_LENGTH_BITS: u32 = 6;

/// Number of bits holding `offset - 1` in a match record
pub const MATCH_OFFSET_BITS: u32 = MATCH_RECORD_BITS - MATCH_LENGTH_BITS;

/// Shortest match worth encoding (a match record costs 2 bytes)
pub const MATCH_MIN: usize = 3;

/// Longest match a record can describe: 64 + 3 - 1 = 66 bytes
pub const MATCH_MAX: usize = (1 << MATCH_LENGTH_BITS) + MATCH_MIN - 1;

/// Mask for the offset field of a match record (1023)
pub const OFFSET_MASK: u16 = (1 << MATCH_OFFSET_BITS) - 1;

/// Largest backward distance a match can reach
pub const MAX_OFFSET: usize = OFFSET_MASK as usize + 1; // 1024 bytes

/// Number of tokens described by one control byte
pub const GROUP_SIZE: usize = 8;

/// Size of an encoded match record in bytes
pub const MATCH_RECORD_SIZE: usize = 2;

/// Default number of Match Index buckets
pub const DEFAULT_BUCKET_COUNT: usize = 256;

/// Error type for T2C operations
#[derive(Debug, Error)]
pub enum T2cError {
    /// The destination buffer cannot hold the output
    #[error("Destination too small: {needed} bytes needed, capacity is {capacity}")]
    DestinationTooSmall {
        /// Output size the failing write would have reached
        needed: usize,
        /// Declared capacity of the destination
        capacity: usize,
    },

    /// The compressed stream ends inside a match record
    #[error("Truncated input: match record at byte {position} is incomplete")]
    TruncatedInput {
        /// Offset of the incomplete record in the compressed stream
        position: usize,
    },

    /// A match reaches before the start of the output
    #[error("Invalid match: offset {offset} at output position {position}")]
    InvalidMatch {
        /// Decoded backward distance
        offset: usize,
        /// Output position the match starts at
        position: usize,
    },

    /// Match Index capacity is not a non-zero power of two
    #[error("Invalid bucket count: {0} (expected a non-zero power of two)")]
    InvalidBucketCount(usize),

    /// The index allocator could not supply the table
    #[error("Index allocation failed: {requested} buckets requested, {available} available")]
    AllocationFailed {
        /// Number of buckets requested
        requested: usize,
        /// Number of buckets the allocator can hold
        available: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for T2C operations
pub type Result<T> = std::result::Result<T, T2cError>;

/// Returns the worst-case compressed size for `len` input bytes
///
/// Every byte encoded as a literal plus one control byte per 8 literals.
pub const fn max_compressed_len(len: usize) -> usize {
    len + len.div_ceil(GROUP_SIZE)
}

/// Statistics for compression/decompression operations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    /// Number of literal tokens encoded/decoded
    pub literal_count: usize,
    /// Number of match tokens encoded/decoded
    pub match_count: usize,
    /// Number of control bytes (token groups)
    pub group_count: usize,
    /// Longest match found
    pub longest_match: usize,
    /// Uncompressed size in bytes
    pub uncompressed_bytes: usize,
    /// Compressed size in bytes
    pub compressed_bytes: usize,
}

impl CompressionStats {
    /// Compressed size as a percentage of the uncompressed size
    pub fn ratio(&self) -> f64 {
        if self.uncompressed_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes as f64 * 100.0 / self.uncompressed_bytes as f64
        }
    }
}
