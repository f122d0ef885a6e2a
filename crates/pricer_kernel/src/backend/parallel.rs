//! Rayon-based parallel backend.
//!
//! The strike slice and a freshly allocated output buffer are split into
//! matching chunks; each rayon task fills its own disjoint output chunk with
//! the sequential loop. No merging step is needed and output order equals
//! input order.
//!
//! # Performance Targets
//!
//! - Near-linear scaling on 8+ cores for 1e6+ strikes
//! - No allocation beyond the single output buffer

use std::sync::Arc;

use pricer_core::traits::KernelFloat;
use pricer_core::types::ConfigError;
use rayon::prelude::*;

use super::{ComputeBackend, SequentialBackend};
use crate::formula::PutCoefficients;

/// Default number of strikes per rayon task.
///
/// Large enough to amortise task scheduling over the transcendental calls,
/// small enough to balance across cores for 1e5+ strikes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Default element count below which the backend stays on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Chunked rayon backend.
///
/// Runs on the global rayon pool unless built with a dedicated thread count.
///
/// # Examples
/// ```
/// use pricer_kernel::backend::{ComputeBackend, ParallelBackend, SequentialBackend};
/// use pricer_kernel::formula::PutCoefficients;
///
/// let coeffs = PutCoefficients::new(42.0_f32, 0.5, 0.2, 0.5);
/// let strikes: Vec<f32> = (1..=10_000).map(|i| 40.0 + i as f32 / 1e4).collect();
///
/// let backend = ParallelBackend::new(256, 0);
/// assert_eq!(
///     backend.evaluate(&coeffs, &strikes),
///     SequentialBackend.evaluate(&coeffs, &strikes)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ParallelBackend {
    chunk_size: usize,
    parallel_threshold: usize,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for ParallelBackend {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl ParallelBackend {
    /// Creates a backend on the global rayon pool.
    ///
    /// A `chunk_size` of zero is clamped to one.
    pub fn new(chunk_size: usize, parallel_threshold: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            parallel_threshold,
            pool: None,
        }
    }

    /// Creates a backend with its own pool of `num_threads` workers.
    ///
    /// # Errors
    /// - `ConfigError::InvalidThreadCount` if `num_threads` is zero
    /// - `ConfigError::ThreadPool` if rayon fails to spawn the pool
    pub fn with_threads(
        chunk_size: usize,
        parallel_threshold: usize,
        num_threads: usize,
    ) -> Result<Self, ConfigError> {
        if num_threads == 0 {
            return Err(ConfigError::InvalidThreadCount(num_threads));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("bsput-worker-{}", index))
            .build()
            .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;

        Ok(Self {
            chunk_size: chunk_size.max(1),
            parallel_threshold,
            pool: Some(Arc::new(pool)),
        })
    }

    /// Returns the number of strikes per task.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the element count below which evaluation stays sequential.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Number of worker threads this backend will use.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold && n_items > self.chunk_size
    }

    fn fill_chunks<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]) {
        out.par_chunks_mut(self.chunk_size)
            .zip(strikes.par_chunks(self.chunk_size))
            .for_each(|(out_chunk, strike_chunk)| {
                SequentialBackend.fill(coeffs, strike_chunk, out_chunk);
            });
    }
}

impl ComputeBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn fill<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]) {
        debug_assert_eq!(strikes.len(), out.len());

        if !self.should_parallelize(strikes.len()) {
            SequentialBackend.fill(coeffs, strikes, out);
            return;
        }

        match &self.pool {
            Some(pool) => pool.install(|| self.fill_chunks(coeffs, strikes, out)),
            None => self.fill_chunks(coeffs, strikes, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|i| 40.0 + i as f64 / n as f64).collect()
    }

    #[test]
    fn test_parallel_bitwise_equal_to_sequential() {
        let coeffs = PutCoefficients::new(42.0_f64, 0.5, 0.2, 0.5);
        let strikes = ramp(10_007);
        let expected = SequentialBackend.evaluate(&coeffs, &strikes);

        for chunk_size in [1, 7, 64, 1000, 20_000] {
            let backend = ParallelBackend::new(chunk_size, 0);
            assert_eq!(
                backend.evaluate(&coeffs, &strikes),
                expected,
                "chunk_size = {}",
                chunk_size
            );
        }
    }

    #[test]
    fn test_dedicated_pool() {
        let coeffs = PutCoefficients::new(42.0_f32, 0.5, 0.2, 0.5);
        let strikes: Vec<f32> = ramp(5000).into_iter().map(|k| k as f32).collect();
        let backend = ParallelBackend::with_threads(128, 0, 2).unwrap();

        assert_eq!(backend.num_threads(), 2);
        assert_eq!(
            backend.evaluate(&coeffs, &strikes),
            SequentialBackend.evaluate(&coeffs, &strikes)
        );
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = ParallelBackend::with_threads(128, 0, 0).unwrap_err();
        assert_eq!(err, ConfigError::InvalidThreadCount(0));
    }

    #[test]
    fn test_threshold() {
        let backend = ParallelBackend::new(100, 1000);
        assert!(!backend.should_parallelize(999));
        assert!(backend.should_parallelize(1000));

        // A single chunk never fans out
        let backend = ParallelBackend::new(5000, 0);
        assert!(!backend.should_parallelize(5000));
    }

    #[test]
    fn test_zero_chunk_size_clamped() {
        assert_eq!(ParallelBackend::new(0, 0).chunk_size(), 1);
    }
}
