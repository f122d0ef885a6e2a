//! Sequential backend: one pass over the strikes on the calling thread.

use pricer_core::traits::KernelFloat;

use super::ComputeBackend;
use crate::formula::PutCoefficients;

/// Plain elementwise loop.
///
/// The reference against which every other backend is checked.
///
/// # Examples
/// ```
/// use pricer_kernel::backend::{ComputeBackend, SequentialBackend};
/// use pricer_kernel::formula::PutCoefficients;
///
/// let coeffs = PutCoefficients::new(42.0_f64, 0.5, 0.2, 0.5);
/// let prices = SequentialBackend.evaluate(&coeffs, &[40.0, 41.0]);
/// assert_eq!(prices.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialBackend;

impl ComputeBackend for SequentialBackend {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn fill<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]) {
        debug_assert_eq!(strikes.len(), out.len());
        for (slot, &strike) in out.iter_mut().zip(strikes) {
            *slot = coeffs.put(strike);
        }
    }
}
