//! Mathematical utilities for the pricing kernel.
//!
//! This module provides:
//! - `distributions`: The error function capability and the standard normal CDF

pub mod distributions;

pub use distributions::{norm_cdf, Erf};
