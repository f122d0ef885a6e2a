//! Check command implementation
//!
//! Prints the resolved configuration and the threads available to the
//! parallel backends.

use pricer_kernel::backend::ComputeBackend;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");

    let backend = config.kernel.build_backend()?;

    println!("Configuration");
    println!("  log_level          = {}", config.log_level);
    println!("  precision          = {}", config.precision);
    println!("  spot               = {}", config.spot);
    println!("  rate               = {}", config.rate);
    println!("  volatility         = {}", config.volatility);
    println!("  time               = {}", config.time);
    println!("  strike_base        = {}", config.strike_base);
    println!("  num_strikes        = {}", config.num_strikes);
    println!("Kernel");
    println!("  backend            = {}", backend.name());
    println!("  chunk_size         = {}", config.kernel.chunk_size);
    println!("  parallel_threshold = {}", config.kernel.parallel_threshold);
    match config.kernel.num_threads {
        Some(n) => println!("  num_threads        = {} (dedicated pool)", n),
        None => println!("  num_threads        = global pool"),
    }
    println!("  parallel_lanes     = {}", config.kernel.parallel_lanes);
    println!("System");
    println!("  rayon threads      = {}", rayon::current_num_threads());
    println!("  logical cpus       = {}", num_cpus::get());

    info!("Configuration OK");
    Ok(())
}
