//! Market inputs for the put kernel.
//!
//! `MarketInputs` bundles the scalar market state (spot, rate, volatility,
//! time to expiry) with the strike vector. It is validated on construction
//! and immutable afterwards, so any value of this type is inside the
//! formula's domain.

use num_traits::Float;

use super::error::PricingError;

/// Validated market inputs: one spot, N strikes, and shared scalars.
///
/// # Invariants
/// - `strikes` is non-empty and every strike is positive and finite
/// - `spot`, `volatility`, `time` are positive and finite
/// - `rate` is finite (negative rates are allowed)
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketInputs, PricingError};
///
/// let inputs = MarketInputs::new(42.0_f64, vec![40.0, 40.5], 0.5, 0.2, 0.5).unwrap();
/// assert_eq!(inputs.strikes(), &[40.0, 40.5]);
///
/// let err = MarketInputs::new(42.0_f64, vec![40.0], 0.5, 0.2, 0.0).unwrap_err();
/// assert_eq!(err, PricingError::InvalidTime { time: 0.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketInputs<T: Float> {
    spot: T,
    strikes: Vec<T>,
    rate: T,
    volatility: T,
    time: T,
}

impl<T: Float> MarketInputs<T> {
    /// Creates validated market inputs.
    ///
    /// # Arguments
    /// * `spot` - Current price of the underlying (S > 0)
    /// * `strikes` - Strike prices (non-empty, each K > 0)
    /// * `rate` - Risk-free rate, annualised (finite)
    /// * `volatility` - Annualised volatility (σ > 0)
    /// * `time` - Time to expiry in years (T > 0)
    ///
    /// # Errors
    /// Returns the first violated constraint, checking scalars before strikes.
    pub fn new(
        spot: T,
        strikes: Vec<T>,
        rate: T,
        volatility: T,
        time: T,
    ) -> Result<Self, PricingError> {
        validate(spot, &strikes, rate, volatility, time)?;
        Ok(Self {
            spot,
            strikes,
            rate,
            volatility,
            time,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strikes in input order.
    #[inline]
    pub fn strikes(&self) -> &[T] {
        &self.strikes
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn time(&self) -> T {
        self.time
    }

    /// Number of strikes.
    #[inline]
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    /// Always `false` for a validated value; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    /// Consumes the inputs and returns the strike vector.
    pub fn into_strikes(self) -> Vec<T> {
        self.strikes
    }
}

/// Validates raw market inputs against the formula's domain.
///
/// Used by [`MarketInputs::new`] and by kernel entry points that price
/// borrowed strike slices without taking ownership.
///
/// # Errors
/// - `InvalidSpot` if spot <= 0 or non-finite
/// - `InvalidVolatility` if volatility <= 0 or non-finite
/// - `InvalidTime` if time <= 0 or non-finite
/// - `InvalidRate` if rate is non-finite
/// - `EmptyStrikes` if no strikes are supplied
/// - `InvalidStrike` for the first strike <= 0 or non-finite
pub fn validate<T: Float>(
    spot: T,
    strikes: &[T],
    rate: T,
    volatility: T,
    time: T,
) -> Result<(), PricingError> {
    if !is_positive_finite(spot) {
        return Err(PricingError::InvalidSpot {
            spot: to_f64(spot),
        });
    }
    if !is_positive_finite(volatility) {
        return Err(PricingError::InvalidVolatility {
            volatility: to_f64(volatility),
        });
    }
    if !is_positive_finite(time) {
        return Err(PricingError::InvalidTime { time: to_f64(time) });
    }
    if !rate.is_finite() {
        return Err(PricingError::InvalidRate { rate: to_f64(rate) });
    }
    if strikes.is_empty() {
        return Err(PricingError::EmptyStrikes);
    }
    if let Some(index) = strikes.iter().position(|&k| !is_positive_finite(k)) {
        return Err(PricingError::InvalidStrike {
            index,
            strike: to_f64(strikes[index]),
        });
    }
    Ok(())
}

#[inline]
fn is_positive_finite<T: Float>(x: T) -> bool {
    x.is_finite() && x > T::zero()
}

#[inline]
fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let inputs = MarketInputs::new(42.0_f64, vec![40.0, 41.0], 0.5, 0.2, 0.5).unwrap();
        assert_eq!(inputs.spot(), 42.0);
        assert_eq!(inputs.rate(), 0.5);
        assert_eq!(inputs.volatility(), 0.2);
        assert_eq!(inputs.time(), 0.5);
        assert_eq!(inputs.len(), 2);
        assert!(!inputs.is_empty());
        assert_eq!(inputs.into_strikes(), vec![40.0, 41.0]);
    }

    #[test]
    fn test_negative_rate_allowed() {
        assert!(MarketInputs::new(42.0_f32, vec![40.0], -0.01, 0.2, 0.5).is_ok());
    }

    #[test]
    fn test_empty_strikes() {
        let err = MarketInputs::<f64>::new(42.0, vec![], 0.5, 0.2, 0.5).unwrap_err();
        assert_eq!(err, PricingError::EmptyStrikes);
    }

    #[test]
    fn test_first_invalid_strike_reported() {
        let err = MarketInputs::new(42.0_f64, vec![40.0, 0.0, -1.0], 0.5, 0.2, 0.5).unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidStrike {
                index: 1,
                strike: 0.0
            }
        );
    }

    #[test]
    fn test_non_finite_strike() {
        let err = MarketInputs::new(42.0_f64, vec![f64::INFINITY], 0.5, 0.2, 0.5).unwrap_err();
        assert!(matches!(err, PricingError::InvalidStrike { index: 0, .. }));
    }

    #[test]
    fn test_invalid_scalars() {
        assert_eq!(
            validate(0.0_f64, &[40.0], 0.5, 0.2, 0.5),
            Err(PricingError::InvalidSpot { spot: 0.0 })
        );
        assert_eq!(
            validate(42.0_f64, &[40.0], 0.5, -0.2, 0.5),
            Err(PricingError::InvalidVolatility { volatility: -0.2 })
        );
        assert_eq!(
            validate(42.0_f64, &[40.0], 0.5, 0.2, 0.0),
            Err(PricingError::InvalidTime { time: 0.0 })
        );
        assert!(matches!(
            validate(42.0_f64, &[40.0], f64::NAN, 0.2, 0.5),
            Err(PricingError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_scalars_checked_before_strikes() {
        // Both time and strikes are invalid; the scalar is reported
        assert_eq!(
            validate(42.0_f64, &[], 0.5, 0.2, 0.0),
            Err(PricingError::InvalidTime { time: 0.0 })
        );
    }
}
