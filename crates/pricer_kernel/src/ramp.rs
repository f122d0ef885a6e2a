//! Linear strike ramps for demonstrations, benchmarks and regression tests.

use pricer_core::traits::KernelFloat;

/// Builds `n` strikes `base + i/n` for `i` in `1..=n`.
///
/// The ramp runs from just above `base` to exactly `base + 1`. Each strike
/// is computed in `f64` and then narrowed to `T`, so an `f32` ramp matches
/// the rounded `f64` ramp element for element.
///
/// # Examples
/// ```
/// use pricer_kernel::ramp::strike_ramp;
///
/// let strikes: Vec<f64> = strike_ramp(40.0, 4);
/// assert_eq!(strikes, vec![40.25, 40.5, 40.75, 41.0]);
/// ```
pub fn strike_ramp<T: KernelFloat>(base: f64, n: usize) -> Vec<T> {
    let scale = n as f64;
    (1..=n)
        .map(|i| T::from(base + i as f64 / scale).unwrap_or_else(T::nan))
        .collect()
}
