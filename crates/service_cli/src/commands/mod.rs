//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;
pub mod run;

use pricer_core::traits::KernelFloat;

use crate::{CliError, Result};

/// Narrows a configured `f64` scalar to the run precision.
pub(crate) fn scalar<T: KernelFloat>(name: &str, value: f64) -> Result<T> {
    T::from(value).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "{} = {} is not representable as {}",
            name,
            value,
            T::PRECISION
        ))
    })
}
