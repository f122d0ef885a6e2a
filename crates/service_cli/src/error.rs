//! CLI error type.

use pricer_core::types::{ConfigError, PricingError};
use thiserror::Error;

/// Errors surfaced by `bsput` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Market inputs outside the formula's domain.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Unusable kernel or CLI configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file missing.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for the expected schema.
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid command-line or environment value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pricing_error() {
        let err: CliError = PricingError::EmptyStrikes.into();
        assert!(matches!(err, CliError::Pricing(PricingError::EmptyStrikes)));
        assert!(err.to_string().starts_with("Pricing error: Empty strike sequence"));
    }

    #[test]
    fn test_from_config_error() {
        let err: CliError = ConfigError::InvalidChunkSize(0).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid chunk size: 0. Must be at least 1"
        );
    }
}
