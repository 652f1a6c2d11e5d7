//! LSD radix sort for render queues
//!
//! Sorts fixed-size records ascending by a 64-bit key, eight bits per pass.
//! Two things make it cheap enough to run every frame:
//!
//! - the auxiliary buffer persists inside [`RadixSorter`] and only ever
//!   grows, so steady-state frames allocate nothing;
//! - a digit level where every record shares the same value is detected from
//!   the frequency table and skipped outright. Render-queue keys are built
//!   from packed state bits and rarely populate all eight levels, so most
//!   frames run one or two partition passes instead of eight.

use std::mem;
use std::time::Instant;

use crate::algorithms::{SortAlgorithm, SortStats};
use crate::error::{FramesortError, Result};
use crate::memory::{prefetch_write, ScratchBuffer};

const RADIX_BITS: usize = 8;
const RADIX_SIZE: usize = 1 << RADIX_BITS;
const RADIX_LEVELS: usize = (63 / RADIX_BITS) + 1;
const RADIX_MASK: u64 = (RADIX_SIZE - 1) as u64;

/// One histogram row per digit level, 256 counts per row. Call-scoped and
/// stack-allocated (16 KiB).
type FreqTable = [[usize; RADIX_SIZE]; RADIX_LEVELS];

/// Types sortable by a 64-bit key.
///
/// The sort never inspects anything beyond the key; payload bytes travel
/// with the record through every redistribution. Implementations must return
/// the same key for the same record every time they are asked; the key is
/// extracted repeatedly across passes.
pub trait SortKey: Copy {
    /// The 64-bit unsigned key this record sorts by.
    fn sort_key(&self) -> u64;
}

impl SortKey for u64 {
    fn sort_key(&self) -> u64 {
        *self
    }
}

/// Zero-extended; the top four digit levels are always trivial and skipped.
impl SortKey for u32 {
    fn sort_key(&self) -> u64 {
        *self as u64
    }
}

/// Key/value pairs sort by the first element; the value rides along.
impl<V: Copy> SortKey for (u64, V) {
    fn sort_key(&self) -> u64 {
        self.0
    }
}

/// Configuration for the radix sort
#[derive(Debug, Clone)]
pub struct RadixSortConfig {
    /// Skip digit levels where every record shares the same digit value.
    /// Purely a performance short-circuit; results are identical either way.
    pub skip_trivial_levels: bool,
    /// Emit a write-prefetch hint for the upcoming slot of each output run
    pub use_prefetch: bool,
    /// How many writes ahead to hint within an output run
    pub prefetch_distance: usize,
}

impl Default for RadixSortConfig {
    fn default() -> Self {
        Self {
            skip_trivial_levels: true,
            use_prefetch: cfg!(feature = "prefetch"),
            prefetch_distance: 1,
        }
    }
}

impl RadixSortConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.use_prefetch && self.prefetch_distance == 0 {
            return Err(FramesortError::configuration(
                "prefetch_distance must be non-zero when use_prefetch is enabled",
            ));
        }
        Ok(())
    }
}

/// LSD radix sorter with persistent scratch memory.
///
/// Owns the auxiliary buffer the partition passes bounce records through, so
/// one sorter should live as long as the queue it sorts. `&mut self` on
/// [`sort`](Self::sort) confines each sorter to one thread at a time;
/// independent sorters are fully independent.
pub struct RadixSorter<T: SortKey> {
    config: RadixSortConfig,
    scratch: ScratchBuffer<T>,
    stats: SortStats,
}

impl<T: SortKey> RadixSorter<T> {
    /// Create a sorter with the default configuration
    pub fn new() -> Self {
        Self {
            config: RadixSortConfig::default(),
            scratch: ScratchBuffer::new(),
            stats: SortStats::default(),
        }
    }

    /// Create a sorter with a custom configuration
    pub fn with_config(config: RadixSortConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scratch: ScratchBuffer::new(),
            stats: SortStats::default(),
        })
    }

    /// Sort `items` in place, ascending by [`SortKey::sort_key`].
    ///
    /// Records with equal keys keep their relative order. May grow (never
    /// shrink) the internal scratch buffer; available memory for a
    /// same-size auxiliary buffer is a hard precondition, and genuine
    /// allocator failure aborts rather than returning an error.
    ///
    /// An empty slice returns immediately without touching the scratch
    /// buffer.
    pub fn sort(&mut self, items: &mut [T]) -> Result<()> {
        let start = Instant::now();

        if items.is_empty() {
            self.stats = SortStats::default();
            return Ok(());
        }

        let mut freqs: FreqTable = [[0; RADIX_SIZE]; RADIX_LEVELS];
        Self::count_frequencies(items, &mut freqs);

        self.scratch.ensure(items.len(), items[0])?;

        let count = items.len();
        let skip_trivial = self.config.skip_trivial_levels;
        let use_prefetch = self.config.use_prefetch;
        let prefetch_distance = self.config.prefetch_distance;

        let mut levels_skipped = 0;
        {
            let mut from: &mut [T] = items;
            let mut to: &mut [T] = self.scratch.as_mut_slice(count);
            // Whether the latest ordering currently lives in the scratch buffer
            let mut in_scratch = false;

            for level in 0..RADIX_LEVELS {
                if skip_trivial && Self::is_trivial(&freqs[level], count) {
                    levels_skipped += 1;
                    continue;
                }

                let shift = (level * RADIX_BITS) as u32;

                // Cursor per digit value, pointing at the start of that
                // digit's contiguous output run (prefix sums of the counts).
                let mut slots = [0usize; RADIX_SIZE];
                let mut next = 0;
                for (slot, &freq) in slots.iter_mut().zip(freqs[level].iter()) {
                    *slot = next;
                    next += freq;
                }

                for item in from.iter() {
                    let digit = ((item.sort_key() >> shift) & RADIX_MASK) as usize;
                    let slot = slots[digit];
                    to[slot] = *item;
                    slots[digit] = slot + 1;
                    if use_prefetch {
                        if let Some(ahead) = to.get(slot + prefetch_distance) {
                            prefetch_write(ahead as *const T as *const u8);
                        }
                    }
                }

                mem::swap(&mut from, &mut to);
                in_scratch = !in_scratch;
            }

            // After the last swap the "from" role holds the sorted sequence;
            // if that is the scratch buffer, the caller's slice (now "to")
            // needs a final copy.
            if in_scratch {
                to.copy_from_slice(from);
            }
        }

        let elapsed = start.elapsed();
        self.stats = SortStats {
            items_processed: count,
            processing_time_us: elapsed.as_micros() as u64,
            memory_used: self.estimate_memory(count),
            levels_processed: RADIX_LEVELS - levels_skipped,
            levels_skipped,
        };

        Ok(())
    }

    /// Free the scratch buffer and reset its tracked capacity to zero.
    ///
    /// Intended for subsystem shutdown; idempotent. The next sort simply
    /// reallocates.
    pub fn release_scratch(&mut self) {
        self.scratch.release();
    }

    /// Current scratch capacity in records
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Statistics from the most recent sort
    pub fn stats(&self) -> &SortStats {
        &self.stats
    }

    /// The active configuration
    pub fn config(&self) -> &RadixSortConfig {
        &self.config
    }

    /// Estimate peak memory for sorting `input_size` records
    pub fn estimate_memory(&self, input_size: usize) -> usize {
        input_size.saturating_mul(mem::size_of::<T>()) + mem::size_of::<FreqTable>()
    }

    /// Populate all eight histograms in a single traversal of the input.
    fn count_frequencies(items: &[T], freqs: &mut FreqTable) {
        for item in items {
            let mut key = item.sort_key();
            for level in 0..RADIX_LEVELS {
                freqs[level][(key & RADIX_MASK) as usize] += 1;
                key >>= RADIX_BITS;
            }
        }
    }

    /// A level is trivial when at most one digit value occurs, which makes
    /// its partition pass an identity permutation.
    fn is_trivial(freqs: &[usize; RADIX_SIZE], count: usize) -> bool {
        for &freq in freqs.iter() {
            if freq != 0 {
                return freq == count;
            }
        }
        // An all-zero histogram can only come from an empty input
        debug_assert!(count == 0, "empty level histogram with {count} records");
        true
    }
}

impl<T: SortKey> Default for RadixSorter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortKey> SortAlgorithm for RadixSorter<T> {
    type Config = RadixSortConfig;
    type Input = Vec<T>;
    type Output = Vec<T>;

    fn execute(&self, config: &Self::Config, mut input: Self::Input) -> Result<Self::Output> {
        let mut sorter = Self::with_config(config.clone())?;
        sorter.sort(&mut input)?;
        Ok(input)
    }

    fn stats(&self) -> SortStats {
        self.stats.clone()
    }

    fn estimate_memory(&self, input_size: usize) -> usize {
        self.estimate_memory(input_size)
    }
}
