//! Lane-batched backend.
//!
//! Strikes are processed in fixed-width blocks of [`LANES`] elements held in
//! stack arrays. Each stage of the formula (d₁, d₂, the two CDFs, the future
//! value, the put) runs across the whole block before the next stage starts,
//! the same shape an accelerator applies to a fused array expression. The
//! arithmetic stages are straight loops over `[T; LANES]` that the compiler
//! can vectorise.
//!
//! Each lane performs exactly the operations of
//! [`PutCoefficients::put`](crate::formula::PutCoefficients::put) in the same
//! order, so results are bitwise identical to the sequential backend.

use pricer_core::math::distributions::norm_cdf;
use pricer_core::traits::KernelFloat;
use rayon::prelude::*;

use super::ComputeBackend;
use crate::formula::PutCoefficients;

/// Number of strikes per lane block.
pub const LANES: usize = 8;

/// Structure-of-arrays lane backend.
///
/// Optionally fans lane blocks out across the rayon pool in groups of
/// `blocks_per_task` blocks.
///
/// # Examples
/// ```
/// use pricer_kernel::backend::{BatchedBackend, ComputeBackend, SequentialBackend};
/// use pricer_kernel::formula::PutCoefficients;
///
/// let coeffs = PutCoefficients::new(42.0_f64, 0.5, 0.2, 0.5);
/// let strikes = [39.0, 39.5, 40.0, 40.5, 41.0, 41.5, 42.0, 42.5, 43.0, 43.5, 44.0];
///
/// assert_eq!(
///     BatchedBackend::new().evaluate(&coeffs, &strikes),
///     SequentialBackend.evaluate(&coeffs, &strikes)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchedBackend {
    /// `None` keeps every block on the calling thread.
    blocks_per_task: Option<usize>,
}

impl Default for BatchedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchedBackend {
    /// Creates a single-threaded lane backend.
    pub fn new() -> Self {
        Self {
            blocks_per_task: None,
        }
    }

    /// Creates a lane backend that spreads groups of `blocks_per_task`
    /// blocks across the global rayon pool. The count is clamped to
    /// `1..=usize::MAX / LANES` so a task always spans at least one block.
    pub fn parallel(blocks_per_task: usize) -> Self {
        Self {
            blocks_per_task: Some(blocks_per_task.clamp(1, usize::MAX / LANES)),
        }
    }

    /// Returns the number of blocks per rayon task, if parallel.
    #[inline]
    pub fn blocks_per_task(&self) -> Option<usize> {
        self.blocks_per_task
    }
}

impl ComputeBackend for BatchedBackend {
    fn name(&self) -> &'static str {
        match self.blocks_per_task {
            None => "batched",
            Some(_) => "batched-parallel",
        }
    }

    fn fill<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]) {
        debug_assert_eq!(strikes.len(), out.len());

        match self.blocks_per_task {
            None => fill_blocks(coeffs, strikes, out),
            Some(blocks) => {
                let task_len = blocks.saturating_mul(LANES);
                out.par_chunks_mut(task_len)
                    .zip(strikes.par_chunks(task_len))
                    .for_each(|(out_chunk, strike_chunk)| {
                        fill_blocks(coeffs, strike_chunk, out_chunk);
                    });
            }
        }
    }
}

fn fill_blocks<T: KernelFloat>(coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]) {
    let mut strike_blocks = strikes.chunks_exact(LANES);
    let mut out_blocks = out.chunks_exact_mut(LANES);

    for (out_block, strike_block) in (&mut out_blocks).zip(&mut strike_blocks) {
        let mut lane = [T::zero(); LANES];
        lane.copy_from_slice(strike_block);
        let prices = price_lanes(coeffs, &lane);
        out_block.copy_from_slice(&prices);
    }

    // Tail: pad with a valid strike so padding lanes stay finite, then
    // copy back only the live lanes.
    let tail = strike_blocks.remainder();
    if !tail.is_empty() {
        let mut lane = [tail[0]; LANES];
        lane[..tail.len()].copy_from_slice(tail);
        let prices = price_lanes(coeffs, &lane);
        out_blocks
            .into_remainder()
            .copy_from_slice(&prices[..tail.len()]);
    }
}

#[inline]
fn price_lanes<T: KernelFloat>(coeffs: &PutCoefficients<T>, strikes: &[T; LANES]) -> [T; LANES] {
    let mut d1 = [T::zero(); LANES];
    for i in 0..LANES {
        d1[i] = coeffs.d1(strikes[i]);
    }

    let mut d2 = [T::zero(); LANES];
    for i in 0..LANES {
        d2[i] = coeffs.d2(d1[i]);
    }

    let mut nd1 = [T::zero(); LANES];
    let mut nd2 = [T::zero(); LANES];
    for i in 0..LANES {
        nd1[i] = norm_cdf(d1[i]);
        nd2[i] = norm_cdf(d2[i]);
    }

    let mut future_value = [T::zero(); LANES];
    for i in 0..LANES {
        future_value[i] = coeffs.future_value(strikes[i]);
    }

    let mut put = [T::zero(); LANES];
    for i in 0..LANES {
        let call = coeffs.call_from_parts(nd1[i], nd2[i], future_value[i]);
        put[i] = coeffs.put_from_call(call, future_value[i]);
    }
    put
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SequentialBackend;

    #[test]
    fn test_batched_bitwise_equal_for_all_tail_lengths() {
        let coeffs = PutCoefficients::new(42.0_f64, 0.5, 0.2, 0.5);
        for n in 0..=(3 * LANES + 1) {
            let strikes: Vec<f64> = (0..n).map(|i| 38.0 + 0.25 * i as f64).collect();
            assert_eq!(
                BatchedBackend::new().evaluate(&coeffs, &strikes),
                SequentialBackend.evaluate(&coeffs, &strikes),
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn test_batched_parallel_matches_sequential() {
        let coeffs = PutCoefficients::new(42.0_f32, 0.5, 0.2, 0.5);
        let strikes: Vec<f32> = (1..=10_003).map(|i| 40.0 + i as f32 / 1e4).collect();
        let expected = SequentialBackend.evaluate(&coeffs, &strikes);

        for blocks in [1, 3, 64] {
            let backend = BatchedBackend::parallel(blocks);
            assert_eq!(backend.evaluate(&coeffs, &strikes), expected);
        }
    }

    #[test]
    fn test_batched_names() {
        assert_eq!(BatchedBackend::new().name(), "batched");
        assert_eq!(BatchedBackend::parallel(0).name(), "batched-parallel");
        assert_eq!(BatchedBackend::parallel(0).blocks_per_task(), Some(1));
    }

    #[test]
    fn test_batched_parallel_huge_block_count() {
        let coeffs = PutCoefficients::new(42.0_f64, 0.5, 0.2, 0.5);
        let strikes: Vec<f64> = (0..37).map(|i| 38.0 + 0.25 * i as f64).collect();
        let expected = SequentialBackend.evaluate(&coeffs, &strikes);

        for blocks in [usize::MAX / LANES, usize::MAX / LANES + 1, usize::MAX] {
            let backend = BatchedBackend::parallel(blocks);
            assert_eq!(backend.blocks_per_task(), Some(usize::MAX / LANES));
            assert_eq!(backend.evaluate(&coeffs, &strikes), expected);
        }
    }
}
