//! Kernel configuration.
//!
//! Provides [`KernelConfig`] for selecting and tuning the compute backend,
//! and its builder. With the `serde` feature the configuration deserialises
//! from TOML with every field optional.

use pricer_core::types::ConfigError;

use crate::backend::{
    Backend, BackendKind, BatchedBackend, ParallelBackend, SequentialBackend, DEFAULT_CHUNK_SIZE,
    DEFAULT_PARALLEL_THRESHOLD, LANES,
};

/// Configuration for the put kernel backend.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `backend` | `parallel` | Backend selector |
/// | `chunk_size` | 4096 | Strikes per rayon task (parallel and batched) |
/// | `parallel_threshold` | 1024 | Minimum strikes before fanning out |
/// | `num_threads` | `None` | Dedicated pool size; `None` uses the global pool |
/// | `parallel_lanes` | `false` | Spread batched lane blocks across rayon |
///
/// # Examples
///
/// ```rust
/// use pricer_kernel::backend::{BackendKind, ComputeBackend};
/// use pricer_kernel::config::KernelConfig;
///
/// let config = KernelConfig::builder()
///     .backend(BackendKind::Batched)
///     .chunk_size(1024)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.backend, BackendKind::Batched);
/// assert_eq!(config.build_backend().unwrap().name(), "batched");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KernelConfig {
    /// Backend selector.
    pub backend: BackendKind,
    /// Strikes per rayon task.
    pub chunk_size: usize,
    /// Minimum number of strikes before the parallel backend fans out.
    pub parallel_threshold: usize,
    /// Dedicated thread pool size for the parallel backend.
    pub num_threads: Option<usize>,
    /// Whether the batched backend spreads lane blocks across rayon.
    pub parallel_lanes: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Parallel,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            num_threads: None,
            parallel_lanes: false,
        }
    }
}

impl KernelConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> KernelConfigBuilder {
        KernelConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `chunk_size` is 0
    /// - `num_threads` is `Some(0)`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if let Some(0) = self.num_threads {
            return Err(ConfigError::InvalidThreadCount(0));
        }
        Ok(())
    }

    /// Builds the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails or the dedicated thread
    /// pool cannot be created.
    pub fn build_backend(&self) -> Result<Backend, ConfigError> {
        self.validate()?;

        let backend = match self.backend {
            BackendKind::Sequential => Backend::Sequential(SequentialBackend),
            BackendKind::Parallel => match self.num_threads {
                Some(n) => Backend::Parallel(ParallelBackend::with_threads(
                    self.chunk_size,
                    self.parallel_threshold,
                    n,
                )?),
                None => Backend::Parallel(ParallelBackend::new(
                    self.chunk_size,
                    self.parallel_threshold,
                )),
            },
            BackendKind::Batched if self.parallel_lanes => {
                Backend::Batched(BatchedBackend::parallel(self.chunk_size.div_ceil(LANES)))
            }
            BackendKind::Batched => Backend::Batched(BatchedBackend::new()),
        };
        Ok(backend)
    }
}

/// Builder for [`KernelConfig`].
///
/// Unset fields keep their defaults; [`KernelConfigBuilder::build`]
/// validates the result.
#[derive(Clone, Debug, Default)]
pub struct KernelConfigBuilder {
    config: KernelConfig,
}

impl KernelConfigBuilder {
    /// Sets the backend selector.
    #[inline]
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.config.backend = backend;
        self
    }

    /// Sets the number of strikes per rayon task.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Sets the minimum number of strikes before fanning out.
    #[inline]
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.config.parallel_threshold = parallel_threshold;
        self
    }

    /// Sets a dedicated thread pool size.
    #[inline]
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.config.num_threads = Some(num_threads);
        self
    }

    /// Spreads batched lane blocks across rayon.
    #[inline]
    pub fn parallel_lanes(mut self, parallel_lanes: bool) -> Self {
        self.config.parallel_lanes = parallel_lanes;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn build(self) -> Result<KernelConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ComputeBackend;

    #[test]
    fn test_default_config() {
        let config = KernelConfig::default();
        assert_eq!(config.backend, BackendKind::Parallel);
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.parallel_threshold, 1024);
        assert_eq!(config.num_threads, None);
        assert!(!config.parallel_lanes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_chunk_size() {
        let err = KernelConfig::builder().chunk_size(0).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidChunkSize(0));
    }

    #[test]
    fn test_validate_thread_count() {
        let err = KernelConfig::builder().num_threads(0).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidThreadCount(0));
    }

    #[test]
    fn test_build_backend_kinds() {
        for kind in BackendKind::ALL {
            let backend = KernelConfig::builder()
                .backend(kind)
                .build()
                .unwrap()
                .build_backend()
                .unwrap();
            assert_eq!(backend.kind(), kind);
        }
    }

    #[test]
    fn test_build_parallel_with_threads() {
        let backend = KernelConfig::builder()
            .num_threads(3)
            .build()
            .unwrap()
            .build_backend()
            .unwrap();
        match backend {
            Backend::Parallel(parallel) => assert_eq!(parallel.num_threads(), 3),
            other => panic!("expected parallel backend, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_build_parallel_lanes() {
        let backend = KernelConfig::builder()
            .backend(BackendKind::Batched)
            .chunk_size(100)
            .parallel_lanes(true)
            .build()
            .unwrap()
            .build_backend()
            .unwrap();
        assert_eq!(backend.name(), "batched-parallel");
        match backend {
            Backend::Batched(batched) => assert_eq!(batched.blocks_per_task(), Some(13)),
            other => panic!("expected batched backend, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_max_chunk_size_lanes_backend_prices() {
        let strikes: Vec<f64> = (0..20).map(|i| 40.0 + 0.1 * i as f64).collect();
        let coeffs = crate::formula::PutCoefficients::new(42.0, 0.5, 0.2, 0.5);
        let backend = KernelConfig::builder()
            .backend(BackendKind::Batched)
            .chunk_size(usize::MAX)
            .parallel_lanes(true)
            .build()
            .unwrap()
            .build_backend()
            .unwrap();

        assert_eq!(
            backend.evaluate(&coeffs, &strikes),
            SequentialBackend.evaluate(&coeffs, &strikes)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            backend = "batched"
            chunk_size = 512
            parallel_threshold = 0
            num_threads = 4
            parallel_lanes = true
        "#;

        let config: KernelConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend, BackendKind::Batched);
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.parallel_threshold, 0);
        assert_eq!(config.num_threads, Some(4));
        assert!(config.parallel_lanes);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_toml_deserialization() {
        let config: KernelConfig = toml::from_str("backend = \"sequential\"").unwrap();
        assert_eq!(config.backend, BackendKind::Sequential);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }
}
