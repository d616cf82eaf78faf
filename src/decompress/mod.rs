//! T2C decompression
//!
//! Decoding needs nothing from the compressor: no Match Index and no
//! allocator. The stream carries no length header, so callers either know the
//! original size or ask for it with a size query first.

mod decoder;

pub use decoder::Decoder;

use crate::common::CompressionStats;
use crate::sink::{CountingSink, DecodeSink, SliceSink, VecSink};
use crate::Result;

/// Decompress `src` into `dest`, or return the required size when `dest` is `None`
///
/// With a destination, decoding fails with
/// [`T2cError::DestinationTooSmall`](crate::T2cError::DestinationTooSmall)
/// before writing past its end.
pub fn decompress(src: &[u8], dest: Option<&mut [u8]>) -> Result<usize> {
    let stats = match dest {
        Some(buf) => run(src, &mut SliceSink::new(buf))?,
        None => run(src, &mut CountingSink::new())?,
    };
    Ok(stats.uncompressed_bytes)
}

/// Exact decompressed size of `src`
pub fn decompressed_len(src: &[u8]) -> Result<usize> {
    decompress(src, None)
}

/// Decompress `src` into a new vector sized by a size query
pub fn decompress_to_vec(src: &[u8]) -> Result<Vec<u8>> {
    let len = decompressed_len(src)?;
    let mut output = vec![0u8; len];
    let written = decompress(src, Some(&mut output[..]))?;
    output.truncate(written);
    Ok(output)
}

/// Decompress `src` in a single pass and report what the decoder did
pub fn decompress_with_stats(src: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let mut sink = VecSink::default();
    let stats = run(src, &mut sink)?;
    Ok((sink.into_inner(), stats))
}

fn run<S: DecodeSink>(src: &[u8], sink: &mut S) -> Result<CompressionStats> {
    let stats = Decoder::new(src, sink).run()?;
    log::debug!(
        "decompressed {} bytes into {} ({} literals, {} matches, {} groups)",
        stats.compressed_bytes,
        stats.uncompressed_bytes,
        stats.literal_count,
        stats.match_count,
        stats.group_count
    );
    Ok(stats)
}
