//! Priced output vector.

use std::ops::Index;

use num_traits::Float;

/// Put prices, one per input strike, in input order.
///
/// Freshly allocated by each kernel call and owned by the caller.
/// There is no mutable access; use [`PriceVector::into_vec`] to take the
/// buffer.
///
/// # Examples
/// ```
/// use pricer_core::types::PriceVector;
///
/// let prices = PriceVector::from(vec![1.0_f32, 2.0, 3.5]);
/// assert_eq!(prices.len(), 3);
/// assert_eq!(prices[2], 3.5);
/// assert_eq!(prices.sum(), 6.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceVector<T: Float> {
    prices: Vec<T>,
}

impl<T: Float> PriceVector<T> {
    /// Number of prices.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns `true` if there are no prices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Borrows the prices as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.prices
    }

    /// Iterates over the prices in strike order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.prices.iter()
    }

    /// Consumes the vector and returns the underlying buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.prices
    }

    /// Sum of all prices, accumulated in `f64`.
    ///
    /// Accumulating in double precision keeps the total of a ten-million
    /// element `f32` vector within single-precision tolerance of the exact
    /// sum. Non-finite elements propagate into the result.
    pub fn sum(&self) -> f64 {
        self.prices
            .iter()
            .map(|p| p.to_f64().unwrap_or(f64::NAN))
            .sum()
    }

    /// Returns `true` if every price is finite.
    pub fn all_finite(&self) -> bool {
        self.prices.iter().all(|p| p.is_finite())
    }
}

impl<T: Float> From<Vec<T>> for PriceVector<T> {
    fn from(prices: Vec<T>) -> Self {
        Self { prices }
    }
}

impl<T: Float> Index<usize> for PriceVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.prices[index]
    }
}

impl<T: Float> IntoIterator for PriceVector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.prices.into_iter()
    }
}

impl<'a, T: Float> IntoIterator for &'a PriceVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.prices.iter()
    }
}
