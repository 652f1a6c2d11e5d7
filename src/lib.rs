//! # Framesort: Render-Queue Radix Sort
//!
//! An LSD radix sort for sorting render items by a 64-bit key once per
//! frame, built around two observations about per-frame workloads:
//!
//! - **Allocation amortizes to zero**: the auxiliary buffer persists across
//!   calls and only grows, so a sorter that has seen its largest frame never
//!   allocates again until [`RadixSorter::release_scratch`].
//! - **Degenerate digits are free**: render keys pack state bits and rarely
//!   vary in every byte; digit levels where all records agree are detected
//!   up front and skipped, so a queue whose keys differ only in the low
//!   byte costs one partition pass, not eight.
//!
//! ## Quick Start
//!
//! ```rust
//! use framesort::{RadixSorter, SortKey};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! struct DrawCall {
//!     sort_id: u64,
//!     mesh: u32,
//! }
//!
//! impl SortKey for DrawCall {
//!     fn sort_key(&self) -> u64 {
//!         self.sort_id
//!     }
//! }
//!
//! let mut sorter = RadixSorter::new();
//! let mut queue = vec![
//!     DrawCall { sort_id: 5, mesh: 0 },
//!     DrawCall { sort_id: 1, mesh: 1 },
//!     DrawCall { sort_id: 3, mesh: 2 },
//! ];
//! sorter.sort(&mut queue).unwrap();
//! assert_eq!(queue[0].sort_id, 1);
//! assert_eq!(queue[2].sort_id, 5);
//!
//! // At shutdown, hand the scratch memory back
//! sorter.release_scratch();
//! ```
//!
//! Records with equal keys keep their relative order, so draw submission
//! order survives the sort for state-identical items.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod algorithms;
pub mod error;
pub mod memory;

// Re-export core types
pub use algorithms::{RadixSortConfig, RadixSorter, SortAlgorithm, SortKey, SortStats};
pub use error::{FramesortError, Result};
pub use memory::ScratchBuffer;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing framesort v{}", VERSION);
}
