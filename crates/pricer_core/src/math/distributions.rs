//! Error function and standard normal distribution.
//!
//! This module provides:
//! - `Erf`: The error function as a capability of the float type
//! - `norm_cdf`: Cumulative distribution function (CDF) built on `Erf`
//!
//! `num_traits::Float` has no error function, so `Erf` supplies it per
//! precision from libm: `erf` for `f64` and `erff` for `f32`. Both are the
//! standard mathematical function to within a few ulps, so the CDF needs no
//! polynomial approximation.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Error function capability.
///
/// # Mathematical Definition
/// erf(x) = (2/√π) ∫_0^x e^(-t²) dt
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::Erf;
///
/// let value = Erf::erf(1.0_f64);
/// assert!((value - 0.8427007929497149).abs() < 1e-15);
/// ```
pub trait Erf: Sized {
    /// Evaluates the error function at `self`.
    fn erf(self) -> Self;
}

impl Erf for f64 {
    #[inline]
    fn erf(self) -> Self {
        libm::erf(self)
    }
}

impl Erf for f32 {
    #[inline]
    fn erf(self) -> Self {
        libm::erff(self)
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = 0.5 + erf(x / √2) / 2
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The probability P(X <= x) for standard normal X, in range [0, 1].
/// NaN input propagates to NaN output.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-15);
///
/// let cdf_neg = norm_cdf(-3.0_f64);
/// assert!(cdf_neg < 0.01);
///
/// let cdf_pos = norm_cdf(3.0_f32);
/// assert!(cdf_pos > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float + Erf>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let two = T::from(2.0).unwrap();
    let sqrt_2 = T::from(SQRT_2).unwrap();

    half + (x / sqrt_2).erf() / two
}
