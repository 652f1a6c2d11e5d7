//! Memory management for the sort subsystem
//!
//! This module owns the persistent scratch buffer that makes repeated sorts
//! amortized-zero-allocation, and the cache prefetch hint used by the
//! partitioning loop.

pub mod prefetch;

pub use prefetch::prefetch_write;

use crate::error::{FramesortError, Result};

/// Persistent auxiliary buffer reused across sort calls.
///
/// Capacity only grows, never shrinks, until [`release`](Self::release) is
/// called; a sorter that has seen its largest frame allocates nothing on
/// subsequent frames. Contents between calls are don't-care, every live slot
/// is overwritten before it is read.
///
/// Growth replaces the old storage with an exact-fit allocation rather than
/// growing geometrically, so [`capacity`](Self::capacity) always equals the
/// largest request seen since the last release.
#[derive(Debug)]
pub struct ScratchBuffer<T> {
    buf: Vec<T>,
}

impl<T: Copy> ScratchBuffer<T> {
    /// Create an empty scratch buffer. Allocates nothing.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Guarantee capacity for at least `count` records.
    ///
    /// New slots are initialized with `fill`; existing slots keep whatever
    /// they held. Returns [`FramesortError::OutOfMemory`] if the byte size of
    /// the request overflows the allocatable range. Genuine allocator failure
    /// aborts the process; callers must treat available memory as a hard
    /// precondition, there is no recovery path on this route.
    pub fn ensure(&mut self, count: usize, fill: T) -> Result<()> {
        if self.buf.len() >= count {
            return Ok(());
        }
        let bytes = count
            .checked_mul(std::mem::size_of::<T>())
            .filter(|&b| b <= isize::MAX as usize)
            .ok_or_else(|| {
                FramesortError::out_of_memory(count.saturating_mul(std::mem::size_of::<T>()))
            })?;
        log::debug!(
            "scratch buffer growing {} -> {} records ({} bytes)",
            self.buf.len(),
            count,
            bytes
        );
        // Exact-fit reallocation: the previous contents are don't-care, and
        // freeing first keeps the old and new buffers from coexisting.
        self.buf = Vec::new();
        self.buf = vec![fill; count];
        Ok(())
    }

    /// Release the buffer and reset tracked capacity to zero.
    ///
    /// Safe to call when no buffer exists; intended for subsystem shutdown.
    pub fn release(&mut self) {
        self.buf = Vec::new();
    }

    /// Number of records the buffer can currently hold.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// True if no storage is held.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Mutable view of the first `count` records.
    ///
    /// Callers must have passed `count` to [`ensure`](Self::ensure) first.
    pub fn as_mut_slice(&mut self, count: usize) -> &mut [T] {
        &mut self.buf[..count]
    }
}

impl<T: Copy> Default for ScratchBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let buf = ScratchBuffer::<u64>::new();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_ensure_grows_exactly() {
        let mut buf = ScratchBuffer::new();
        buf.ensure(100, 0u64).unwrap();
        assert_eq!(buf.capacity(), 100);

        // Smaller request reuses storage as-is
        buf.ensure(10, 0u64).unwrap();
        assert_eq!(buf.capacity(), 100);

        // Larger request grows to exactly the new size
        buf.ensure(5000, 0u64).unwrap();
        assert_eq!(buf.capacity(), 5000);
    }

    #[test]
    fn test_ensure_zero_is_noop() {
        let mut buf = ScratchBuffer::new();
        buf.ensure(0, 0u32).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_release_idempotent() {
        let mut buf = ScratchBuffer::new();
        buf.ensure(64, 7u16).unwrap();
        assert_eq!(buf.capacity(), 64);

        buf.release();
        assert_eq!(buf.capacity(), 0);

        // Releasing with nothing held is fine
        buf.release();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn test_reuse_after_release() {
        let mut buf = ScratchBuffer::new();
        buf.ensure(16, 0u64).unwrap();
        buf.release();
        buf.ensure(32, 0u64).unwrap();
        assert_eq!(buf.capacity(), 32);
    }

    #[test]
    fn test_overflowing_request_is_rejected() {
        let mut buf = ScratchBuffer::<u64>::new();
        let err = buf.ensure(usize::MAX, 0).unwrap_err();
        assert_eq!(err.category(), "memory");
        assert!(!err.is_recoverable());
        // The failed reservation must not have touched the buffer
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn test_as_mut_slice_bounds() {
        let mut buf = ScratchBuffer::new();
        buf.ensure(8, 0u32).unwrap();
        let slice = buf.as_mut_slice(4);
        assert_eq!(slice.len(), 4);
        slice.fill(9);
        assert_eq!(buf.as_mut_slice(8)[..4], [9, 9, 9, 9]);
    }
}
