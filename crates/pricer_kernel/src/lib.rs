//! # Pricer Kernel (L2: Put Kernel)
//!
//! Closed-form Black-Scholes put prices over a vector of strikes.
//!
//! This crate provides:
//! - The elementwise put formula with strike-independent terms hoisted (`formula`)
//! - Pluggable compute backends: sequential, rayon, lane-batched (`backend`)
//! - Validated kernel entry points (`kernel`)
//! - Backend configuration (`config`)
//! - Strike ramp generation for demos and regression tests (`ramp`)
//!
//! ## Backend Selection
//!
//! Acceleration comes from the backend the caller hands to the kernel, not
//! from the container type. Results are bitwise identical across backends.
//!
//! ```rust
//! use pricer_kernel::backend::{BatchedBackend, ParallelBackend, SequentialBackend};
//! use pricer_kernel::price_options_with;
//! use pricer_kernel::ramp::strike_ramp;
//!
//! let strikes: Vec<f32> = strike_ramp(40.0, 10_000);
//! let seq = price_options_with(&SequentialBackend, 42.0, &strikes, 0.5, 0.2, 0.5).unwrap();
//! let par = price_options_with(&ParallelBackend::default(), 42.0, &strikes, 0.5, 0.2, 0.5).unwrap();
//! let lanes = price_options_with(&BatchedBackend::new(), 42.0, &strikes, 0.5, 0.2, 0.5).unwrap();
//!
//! assert_eq!(seq, par);
//! assert_eq!(seq, lanes);
//! ```
//!
//! ## Error Policy
//!
//! Inputs are validated once per call before any arithmetic; out-of-domain
//! inputs return a `PricingError` and no prices. The unchecked
//! [`formula::put_price`] helper is the only path that evaluates raw inputs.

#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod formula;
pub mod kernel;
pub mod ramp;

pub use backend::{Backend, BackendKind, ComputeBackend};
pub use config::KernelConfig;
pub use kernel::{price_options, price_options_with, PricingKernel};
