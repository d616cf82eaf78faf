//! T2C - a tiny hash-assisted LZ compressor
//!
//! This crate provides a pure Rust implementation of the T2C byte codec: a
//! single-pass LZ77-style compressor with a fixed-size prefix hash table and
//! its matching decompressor. It targets small, embeddable use: bounded memory,
//! no headers, no I/O.
//!
//! # Format
//!
//! - Groups of up to 8 tokens, each group led by a control byte (bit `k`,
//!   LSB first, set when token `k` is a match)
//! - Literals: one raw byte
//! - Matches: 16-bit little-endian record, 6 bits `length - 3` (3..=66) over
//!   10 bits `offset - 1` (1..=1024)
//! - Worst case output is `len + ceil(len / 8)` bytes
//!
//! # Two-pass usage
//!
//! Both engines accept `None` as destination and return the exact size they
//! would write, so the caller can allocate once and fill:
//!
//! ```
//! let data = b"Hello, World! Hello, World! Hello, World!";
//!
//! let size = t2c::compress(data, None)?;
//! let mut compressed = vec![0u8; size];
//! t2c::compress(data, Some(&mut compressed[..]))?;
//!
//! let size = t2c::decompress(&compressed, None)?;
//! let mut restored = vec![0u8; size];
//! t2c::decompress(&compressed, Some(&mut restored[..]))?;
//!
//! assert_eq!(&restored[..], &data[..]);
//! # Ok::<(), t2c::T2cError>(())
//! ```
//!
//! # Example - Custom table size and allocator
//!
//! ```
//! use t2c::{Compressor, StackAllocator};
//!
//! let compressor = Compressor::new(1024)?;
//! let mut alloc = StackAllocator::<1024>::new();
//! let size = compressor.compress_with(b"abcabcabc", None, &mut alloc)?;
//! assert!(size <= t2c::max_compressed_len(9));
//! # Ok::<(), t2c::T2cError>(())
//! ```
//!
//! Decode-only consumers can disable the default `compressor` feature.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
#[cfg(feature = "compressor")]
pub mod compress;
pub mod decompress;
pub mod error;
pub mod sink;
pub mod token;

// Re-export commonly used types
pub use common::{
    max_compressed_len, CompressionStats, Result, T2cError, DEFAULT_BUCKET_COUNT, MATCH_MAX,
    MATCH_MIN, MAX_OFFSET,
};
#[cfg(feature = "compressor")]
pub use compress::{Compressor, HeapAllocator, IndexAllocator, StackAllocator};
pub use decompress::{decompress, decompress_to_vec, decompress_with_stats, decompressed_len};
pub use token::{Token, TokenIter};

// Convenience functions

/// Compress `src` with the default 256-bucket Match Index
///
/// # Arguments
/// * `src` - The data to compress
/// * `dest` - Destination buffer, or `None` to only compute the size
///
/// # Returns
/// The number of bytes written, or that would be written
#[cfg(feature = "compressor")]
pub fn compress(src: &[u8], dest: Option<&mut [u8]>) -> Result<usize> {
    Compressor::default().compress(src, dest)
}

/// Exact compressed size of `src` with the default configuration
#[cfg(feature = "compressor")]
pub fn compressed_len(src: &[u8]) -> Result<usize> {
    Compressor::default().compressed_len(src)
}

/// Compress `src` into a new vector with the default configuration
#[cfg(feature = "compressor")]
pub fn compress_to_vec(src: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().compress_to_vec(src)
}
