//! # pricer_core: Foundation for the Batched Put Kernel
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Precision-generic float capability: `Float`, `KernelFloat` (`traits`)
//! - Error function and standard normal CDF (`math::distributions`)
//! - Market inputs and priced output containers (`types::market`, `types::prices`)
//! - Error types: `PricingError`, `ConfigError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - libm: Reference `erf`/`erff` implementations
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::MarketInputs;
//!
//! let inputs = MarketInputs::new(42.0_f64, vec![40.0, 41.0], 0.5, 0.2, 0.5).unwrap();
//! assert_eq!(inputs.len(), 2);
//!
//! let half = norm_cdf(0.0_f64);
//! # assert!((half - 0.5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `MarketInputs` and `PriceVector`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
