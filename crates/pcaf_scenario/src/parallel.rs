//! Rayon-based parallelisation utilities.
//!
//! Per-entry stress computation is embarrassingly parallel. Only the map
//! step is parallelised; results keep input order so that downstream
//! aggregation stays sequential and deterministic.

use rayon::prelude::*;

/// Portfolio size from which the parallel path is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1_000;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum items before using parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a configuration with the given threshold (at least 1).
    pub fn new(parallel_threshold: usize) -> Self {
        Self {
            parallel_threshold: parallel_threshold.max(1),
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps items, in parallel above the threshold, preserving order.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            parallel_map(items, mapper)
        } else {
            items.iter().enumerate().map(|(i, item)| mapper(i, item)).collect()
        }
    }
}

/// Parallel map with index, preserving input order.
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    items
        .par_iter()
        .enumerate()
        .map(|(i, item)| mapper(i, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_preserves_order() {
        let items: Vec<i32> = (0..10_000).collect();
        let mapped = parallel_map(&items, |i, &x| (i, x * 2));
        for (i, (index, value)) in mapped.iter().enumerate() {
            assert_eq!(*index, i);
            assert_eq!(*value, (i as i32) * 2);
        }
    }

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::new(100);
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1000));
    }

    #[test]
    fn test_zero_threshold_clamped() {
        assert_eq!(ParallelConfig::new(0).parallel_threshold, 1);
    }

    #[test]
    fn test_sequential_and_parallel_paths_agree() {
        let items: Vec<f64> = (0..500).map(|i| i as f64 * 0.5).collect();
        let sequential = ParallelConfig::new(usize::MAX).map(&items, |_, x| x * 1.1);
        let parallel = ParallelConfig::new(1).map(&items, |_, x| x * 1.1);
        assert_eq!(sequential, parallel);
    }
}
