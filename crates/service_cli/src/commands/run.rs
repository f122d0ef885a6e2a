//! Run command implementation
//!
//! Prices the strike ramp twice, first on the sequential backend and then on
//! the configured one, and reports the sum and wall-clock time of each run.

use std::time::{Duration, Instant};

use pricer_core::traits::KernelFloat;
use pricer_core::types::{MarketInputs, PriceVector};
use pricer_kernel::backend::{ComputeBackend, SequentialBackend};
use pricer_kernel::ramp::strike_ramp;
use pricer_kernel::PricingKernel;
use tracing::{info, warn};

use super::scalar;
use crate::config::{CliConfig, Precision};
use crate::Result;

/// Outcome of one timed pricing pass.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Backend name
    pub backend: &'static str,
    /// Sum of the output vector
    pub sum: f64,
    /// Wall-clock time of the kernel call
    pub elapsed: Duration,
}

/// Report for a full `run` invocation.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Sequential reference pass
    pub sequential: Timing,
    /// Pass on the configured backend
    pub selected: Timing,
    /// Whether both passes produced identical vectors
    pub identical: bool,
}

impl RunReport {
    /// Sequential time divided by selected time.
    pub fn speedup(&self) -> f64 {
        let selected = self.selected.elapsed.as_secs_f64();
        if selected > 0.0 {
            self.sequential.elapsed.as_secs_f64() / selected
        } else {
            f64::INFINITY
        }
    }
}

/// Run the run command
pub fn run(config: &CliConfig) -> Result<()> {
    let report = match config.precision {
        Precision::F32 => execute::<f32>(config)?,
        Precision::F64 => execute::<f64>(config)?,
    };

    for timing in [&report.sequential, &report.selected] {
        println!(
            "{:>18}: sum = {:.6}  elapsed = {:.3} ms",
            timing.backend,
            timing.sum,
            timing.elapsed.as_secs_f64() * 1e3
        );
    }
    println!("{:>18}: {:.2}x", "speedup", report.speedup());

    if !report.identical {
        warn!("Selected backend output differs from the sequential reference");
    }
    info!("Run complete");
    Ok(())
}

/// Builds the inputs and times both passes at precision `T`.
pub fn execute<T: KernelFloat>(config: &CliConfig) -> Result<RunReport> {
    let strikes: Vec<T> = strike_ramp(config.strike_base, config.num_strikes);
    let inputs = MarketInputs::new(
        scalar("spot", config.spot)?,
        strikes,
        scalar("rate", config.rate)?,
        scalar("volatility", config.volatility)?,
        scalar("time", config.time)?,
    )?;
    print_inputs(&inputs);

    let reference = PricingKernel::new(SequentialBackend);
    let (sequential, expected) = timed(&reference, &inputs);

    let backend = config.kernel.build_backend()?;
    info!("Pricing {} strikes on {} backend", inputs.len(), backend.name());
    let kernel = PricingKernel::new(backend);
    let (selected, actual) = timed(&kernel, &inputs);

    Ok(RunReport {
        sequential,
        selected,
        identical: expected == actual,
    })
}

fn timed<T: KernelFloat, B: ComputeBackend>(
    kernel: &PricingKernel<B>,
    inputs: &MarketInputs<T>,
) -> (Timing, PriceVector<T>) {
    let start = Instant::now();
    let prices = kernel.price(inputs);
    let elapsed = start.elapsed();
    let timing = Timing {
        backend: kernel.backend().name(),
        sum: prices.sum(),
        elapsed,
    };
    (timing, prices)
}

fn print_inputs<T: KernelFloat>(inputs: &MarketInputs<T>) {
    let strikes = inputs.strikes();
    println!("precision   = {}", T::PRECISION);
    println!("spot        = {}", inputs.spot());
    println!(
        "strikes     = {} .. {} ({} values)",
        strikes[0],
        strikes[strikes.len() - 1],
        strikes.len()
    );
    println!("rate        = {}", inputs.rate());
    println!("volatility  = {}", inputs.volatility());
    println!("time        = {}", inputs.time());
}
