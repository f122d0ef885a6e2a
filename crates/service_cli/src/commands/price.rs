//! Price command implementation
//!
//! Prices one put per strike given on the command line, using the configured
//! market scalars.

use pricer_core::traits::KernelFloat;
use pricer_kernel::PricingKernel;
use tracing::info;

use super::scalar;
use crate::config::{CliConfig, Precision};
use crate::{CliError, Result};

/// Run the price command
pub fn run(config: &CliConfig, strikes: &[f64]) -> Result<()> {
    let rows = match config.precision {
        Precision::F32 => price::<f32>(config, strikes)?,
        Precision::F64 => price::<f64>(config, strikes)?,
    };

    println!("\n┌──────────────┬──────────────────┐");
    println!("│ Strike       │ Put              │");
    println!("├──────────────┼──────────────────┤");
    for (strike, put) in &rows {
        println!("│ {:<12} │ {:<16.8} │", strike, put);
    }
    println!("└──────────────┴──────────────────┘");

    info!("Priced {} strikes", rows.len());
    Ok(())
}

/// Prices `strikes` at precision `T`, returning `(strike, put)` rows widened to `f64`.
pub fn price<T: KernelFloat>(config: &CliConfig, strikes: &[f64]) -> Result<Vec<(f64, f64)>> {
    if strikes.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one --strike is required".to_string(),
        ));
    }
    let narrowed = strikes
        .iter()
        .map(|&k| scalar::<T>("strike", k))
        .collect::<Result<Vec<T>>>()?;

    let kernel = PricingKernel::new(config.kernel.build_backend()?);
    let prices = kernel.price_options(
        scalar("spot", config.spot)?,
        &narrowed,
        scalar("rate", config.rate)?,
        scalar("volatility", config.volatility)?,
        scalar("time", config.time)?,
    )?;

    Ok(strikes
        .iter()
        .zip(prices.iter())
        .map(|(&k, p)| (k, p.to_f64().unwrap_or(f64::NAN)))
        .collect())
}
