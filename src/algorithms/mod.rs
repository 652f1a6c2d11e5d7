//! Sorting algorithms for render-queue processing
//!
//! This module provides the LSD radix sort used to order render items by
//! their 64-bit sort keys once per frame, together with the configuration
//! and statistics types shared by sort implementations.

pub mod radix_sort;

// Re-export main types
pub use radix_sort::{RadixSortConfig, RadixSorter, SortKey};

/// Performance statistics for a sort execution
#[derive(Debug, Clone, Default)]
pub struct SortStats {
    /// Total records processed
    pub items_processed: usize,
    /// Processing time in microseconds
    pub processing_time_us: u64,
    /// Memory used in bytes (scratch buffer plus frequency table)
    pub memory_used: usize,
    /// Digit levels that performed a full partition pass
    pub levels_processed: usize,
    /// Digit levels skipped as trivial (all records share the digit value)
    pub levels_skipped: usize,
}

impl SortStats {
    /// Calculate processing rate in records per second
    pub fn items_per_second(&self) -> f64 {
        if self.processing_time_us == 0 {
            return 0.0;
        }
        (self.items_processed as f64) / (self.processing_time_us as f64 / 1_000_000.0)
    }
}

/// Trait for sort algorithms that can be benchmarked and configured
pub trait SortAlgorithm {
    /// Configuration type for this algorithm
    type Config;

    /// Input type for this algorithm
    type Input;

    /// Output type for this algorithm
    type Output;

    /// Execute the algorithm with the given configuration and input
    fn execute(&self, config: &Self::Config, input: Self::Input) -> crate::Result<Self::Output>;

    /// Get performance statistics from the last execution
    fn stats(&self) -> SortStats;

    /// Estimate memory requirements for the given input size
    fn estimate_memory(&self, input_size: usize) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_stats_rates() {
        let stats = SortStats {
            items_processed: 1000,
            processing_time_us: 1000, // 1ms
            memory_used: 1024,
            levels_processed: 2,
            levels_skipped: 6,
        };

        assert_eq!(stats.items_per_second(), 1_000_000.0); // 1M records/sec
        assert_eq!(stats.levels_processed + stats.levels_skipped, 8);
    }

    #[test]
    fn test_sort_stats_zero_time() {
        let stats = SortStats {
            items_processed: 1000,
            ..Default::default()
        };
        assert_eq!(stats.items_per_second(), 0.0);
    }
}
