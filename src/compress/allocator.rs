//! Storage providers for the Match Index
//!
//! The compressor obtains its hash table from an [`IndexAllocator`] once per
//! call and hands it back when the call ends, whether it succeeded or not.
//! The table does not need to be initialised by the allocator.

use crate::{Result, T2cError};

/// One Match Index bucket: a source position or [`EMPTY_SLOT`]
pub type Slot = usize;

/// Marker for a bucket that has never been written
pub const EMPTY_SLOT: Slot = usize::MAX;

/// Capability used by the compressor to place its Match Index
pub trait IndexAllocator {
    /// Provide storage for `buckets` slots
    fn acquire(&mut self, buckets: usize) -> Result<&mut [Slot]>;

    /// Called once the compressor no longer uses the storage
    fn release(&mut self);
}

/// Heap-backed allocator, the default
#[derive(Debug, Default)]
pub struct HeapAllocator {
    table: Vec<Slot>,
}

impl HeapAllocator {
    /// Create an allocator holding no memory
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndexAllocator for HeapAllocator {
    fn acquire(&mut self, buckets: usize) -> Result<&mut [Slot]> {
        log::trace!("heap allocator: acquiring {buckets} buckets");
        self.table.resize(buckets, EMPTY_SLOT);
        Ok(&mut self.table[..buckets])
    }

    fn release(&mut self) {
        log::trace!("heap allocator: releasing {} buckets", self.table.len());
        self.table = Vec::new();
    }
}

/// Fixed inline storage for up to `N` buckets
///
/// Useful for small tables when the caller wants to avoid the heap; the
/// allocator itself can live on the stack.
#[derive(Debug)]
pub struct StackAllocator<const N: usize> {
    table: [Slot; N],
}

impl<const N: usize> StackAllocator<N> {
    /// Create an allocator with room for `N` buckets
    pub fn new() -> Self {
        Self {
            table: [EMPTY_SLOT; N],
        }
    }
}

impl<const N: usize> Default for StackAllocator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> IndexAllocator for StackAllocator<N> {
    fn acquire(&mut self, buckets: usize) -> Result<&mut [Slot]> {
        if buckets > N {
            return Err(T2cError::AllocationFailed {
                requested: buckets,
                available: N,
            });
        }
        Ok(&mut self.table[..buckets])
    }

    fn release(&mut self) {}
}
