//! Core numeric traits.
//!
//! This module defines the float capability the kernel is generic over:
//! - Generic floating-point operations (`Float` trait)
//! - The error function (`Erf` trait, re-exported from `math::distributions`)
//! - The combined bound used by every backend (`KernelFloat`)
//!
//! All traits are designed for static dispatch so that the per-element
//! loop monomorphises to straight-line arithmetic for `f32` and `f64`.

use std::fmt::{Debug, Display};

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub use crate::math::distributions::Erf;

/// Floating-point type the pricing kernel can run on.
///
/// Implemented for `f32` (the single-precision arrays of accelerator
/// backends) and `f64`. `Send + Sync` lets every backend, including the
/// rayon thread pool, share input slices across workers.
pub trait KernelFloat: Float + Erf + Send + Sync + Debug + Display + 'static {
    /// Short precision label used in logs (`"f32"` or `"f64"`).
    const PRECISION: &'static str;
}

impl KernelFloat for f32 {
    const PRECISION: &'static str = "f32";
}

impl KernelFloat for f64 {
    const PRECISION: &'static str = "f64";
}
