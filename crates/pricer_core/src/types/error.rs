//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Domain errors raised once per call when market inputs are invalid
//! - `ConfigError`: Errors from kernel and backend configuration

use thiserror::Error;

/// Domain errors for the put kernel.
///
/// Every variant is a violation of the formula's domain: the logarithm
/// needs positive strikes and spot, and `volatility * sqrt(time)` must be
/// a positive divisor. Inputs are validated once at the boundary, so a call
/// either prices every strike or fails with the first offending input.
///
/// # Variants
/// - `EmptyStrikes`: No strikes supplied
/// - `InvalidStrike`: A strike is non-positive or non-finite
/// - `InvalidSpot`: Spot is non-positive or non-finite
/// - `InvalidVolatility`: Volatility is non-positive or non-finite
/// - `InvalidTime`: Time to expiry is non-positive or non-finite
/// - `InvalidRate`: Risk-free rate is non-finite
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidTime { time: 0.0 };
/// assert_eq!(format!("{}", err), "Invalid time to expiry: T = 0 (must be positive and finite)");
/// assert!(err.is_domain_error());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Strike sequence is empty.
    #[error("Empty strike sequence: at least one strike is required")]
    EmptyStrikes,

    /// Strike at `index` is non-positive or non-finite.
    #[error("Invalid strike at index {index}: K = {strike} (must be positive and finite)")]
    InvalidStrike {
        /// Position of the first offending strike
        index: usize,
        /// The offending strike value
        strike: f64,
    },

    /// Spot price is non-positive or non-finite.
    #[error("Invalid spot price: S = {spot} (must be positive and finite)")]
    InvalidSpot {
        /// The offending spot value
        spot: f64,
    },

    /// Volatility is non-positive or non-finite.
    #[error("Invalid volatility: σ = {volatility} (must be positive and finite)")]
    InvalidVolatility {
        /// The offending volatility value
        volatility: f64,
    },

    /// Time to expiry is non-positive or non-finite.
    #[error("Invalid time to expiry: T = {time} (must be positive and finite)")]
    InvalidTime {
        /// The offending time value
        time: f64,
    },

    /// Risk-free rate is non-finite.
    #[error("Invalid risk-free rate: r = {rate} (must be finite)")]
    InvalidRate {
        /// The offending rate value
        rate: f64,
    },
}

impl PricingError {
    /// Returns `true` if the error is a formula domain violation.
    ///
    /// All current variants are domain errors; the method exists so callers
    /// can match on the kind without enumerating variants.
    #[inline]
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            PricingError::EmptyStrikes
                | PricingError::InvalidStrike { .. }
                | PricingError::InvalidSpot { .. }
                | PricingError::InvalidVolatility { .. }
                | PricingError::InvalidTime { .. }
                | PricingError::InvalidRate { .. }
        )
    }
}

/// Configuration errors.
///
/// Raised when a kernel or backend configuration is unusable.
///
/// # Examples
/// ```
/// use pricer_core::types::ConfigError;
///
/// let err = ConfigError::InvalidChunkSize(0);
/// assert!(format!("{}", err).contains("chunk size"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Chunk size must be at least one element.
    #[error("Invalid chunk size: {0}. Must be at least 1")]
    InvalidChunkSize(usize),

    /// Thread count must be at least one when given explicitly.
    #[error("Invalid thread count: {0}. Must be at least 1")]
    InvalidThreadCount(usize),

    /// Unknown backend name.
    #[error("Unknown backend: {0}. Must be one of: sequential, parallel, batched")]
    UnknownBackend(String),

    /// Unknown precision name.
    #[error("Unknown precision: {0}. Must be one of: f32, f64")]
    UnknownPrecision(String),

    /// Thread pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}
