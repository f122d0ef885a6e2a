//! CLI configuration management
//!
//! Loads configuration from a TOML file, `BSPUT_*` environment variables and
//! command-line flags. Priority, highest first: flags, environment, file,
//! defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use pricer_core::types::ConfigError;
use pricer_kernel::backend::BackendKind;
use pricer_kernel::KernelConfig;
use serde::Deserialize;

use crate::{CliError, Result};

const ENV_LOG_LEVEL: &str = "BSPUT_LOG_LEVEL";
const ENV_PRECISION: &str = "BSPUT_PRECISION";
const ENV_BACKEND: &str = "BSPUT_BACKEND";
const ENV_NUM_STRIKES: &str = "BSPUT_NUM_STRIKES";
const ENV_NUM_THREADS: &str = "BSPUT_NUM_THREADS";
const ENV_CHUNK_SIZE: &str = "BSPUT_CHUNK_SIZE";

/// Log levels accepted by `--log-level` and `BSPUT_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Floating-point precision for a pricing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    F32,
    F64,
}

impl FromStr for Precision {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f32" | "single" => Ok(Precision::F32),
            "f64" | "double" => Ok(Precision::F64),
            _ => Err(ConfigError::UnknownPrecision(s.to_string())),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F32 => write!(f, "f32"),
            Precision::F64 => write!(f, "f64"),
        }
    }
}

/// Resolved `bsput` configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Precision of the strike ramp and prices
    pub precision: Precision,
    /// Spot price
    pub spot: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Volatility
    pub volatility: f64,
    /// Time to expiry in years
    pub time: f64,
    /// Ramp base; strikes run from just above `strike_base` to `strike_base + 1`
    pub strike_base: f64,
    /// Number of strikes in the ramp
    pub num_strikes: usize,
    /// Backend selection and tuning
    pub kernel: KernelConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            precision: Precision::F32,
            spot: 42.0,
            rate: 0.5,
            volatility: 0.2,
            time: 0.5,
            strike_base: 40.0,
            num_strikes: 10_000_000,
            kernel: KernelConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BSPUT_*` overrides read through `lookup`.
    ///
    /// Only variables that are set are applied.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(precision) = lookup(ENV_PRECISION) {
            self.precision = Precision::from_str(&precision)?;
        }
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.kernel.backend = BackendKind::from_str(&backend)?;
        }
        if let Some(n) = lookup(ENV_NUM_STRIKES) {
            self.num_strikes = parse_usize(ENV_NUM_STRIKES, &n)?;
        }
        if let Some(n) = lookup(ENV_NUM_THREADS) {
            self.kernel.num_threads = Some(parse_usize(ENV_NUM_THREADS, &n)?);
        }
        if let Some(n) = lookup(ENV_CHUNK_SIZE) {
            self.kernel.chunk_size = parse_usize(ENV_CHUNK_SIZE, &n)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(precision) = cli.precision {
            self.precision = precision;
        }
        if let Some(backend) = cli.backend {
            self.kernel.backend = backend;
        }
        if let Some(n) = cli.num_strikes {
            self.num_strikes = n;
        }
        if let Some(n) = cli.num_threads {
            self.kernel.num_threads = Some(n);
        }
    }

    /// Validate the configuration.
    ///
    /// Market scalars are not checked here; the kernel rejects them with a
    /// pricing error when a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.num_strikes == 0 {
            return Err(CliError::InvalidArgument(
                "num_strikes must be at least 1".to_string(),
            ));
        }
        self.kernel.validate()?;
        Ok(())
    }
}

fn parse_usize(name: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        CliError::InvalidArgument(format!(
            "{}: expected a non-negative integer, got {:?}",
            name, value
        ))
    })
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<String>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Precision override
    pub precision: Option<Precision>,
    /// Backend override
    pub backend: Option<BackendKind>,
    /// Ramp length override
    pub num_strikes: Option<usize>,
    /// Dedicated thread pool size override
    pub num_threads: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(Path::new(path))?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
