//! Core market and error types.
//!
//! This module provides:
//! - `market`: Validated market inputs (`MarketInputs`) and the domain check (`validate`)
//! - `prices`: The priced output container (`PriceVector`)
//! - `error`: Structured error types for pricing and configuration
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`MarketInputs`], [`validate`] from `market`
//! - [`PriceVector`] from `prices`
//! - [`PricingError`], [`ConfigError`] from `error`

pub mod error;
pub mod market;
pub mod prices;

// Re-export commonly used types at module level
pub use error::{ConfigError, PricingError};
pub use market::{validate, MarketInputs};
pub use prices::PriceVector;
