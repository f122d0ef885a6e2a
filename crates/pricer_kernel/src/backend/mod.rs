//! Compute backends for the elementwise put kernel.
//!
//! A backend decides how the per-strike loop is scheduled; it never changes
//! what is computed. The caller picks the backend explicitly:
//!
//! - [`SequentialBackend`]: plain loop on the calling thread
//! - [`ParallelBackend`]: rayon tasks over disjoint chunks of the strikes
//! - [`BatchedBackend`]: fixed-width lane blocks, stage by stage
//! - [`Backend`]: enum over the three for runtime selection
//!
//! All backends are statically dispatched. `ComputeBackend::fill` is generic
//! over the precision, so the trait is not object safe; use [`Backend`] where
//! the choice is made at runtime.
//!
//! # Invariant
//!
//! For the same coefficients and strikes, every backend returns output of
//! the same length, in input order, bitwise equal to [`SequentialBackend`].

mod batched;
mod parallel;
mod sequential;

use std::fmt;
use std::str::FromStr;

use pricer_core::traits::KernelFloat;
use pricer_core::types::ConfigError;

use crate::formula::PutCoefficients;

pub use batched::{BatchedBackend, LANES};
pub use parallel::{ParallelBackend, DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
pub use sequential::SequentialBackend;

/// Scheduling strategy for the elementwise put loop.
pub trait ComputeBackend: Send + Sync {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Writes one put price per strike into `out`.
    ///
    /// `out.len()` must equal `strikes.len()`.
    fn fill<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]);

    /// Allocates an output buffer and fills it.
    fn evaluate<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T]) -> Vec<T> {
        let mut out = vec![T::zero(); strikes.len()];
        self.fill(coeffs, strikes, &mut out);
        out
    }
}

/// Backend selector as it appears in configuration and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    /// [`SequentialBackend`]
    Sequential,
    /// [`ParallelBackend`]
    #[default]
    Parallel,
    /// [`BatchedBackend`]
    Batched,
}

impl BackendKind {
    /// All selectable kinds, in display order.
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Sequential,
        BackendKind::Parallel,
        BackendKind::Batched,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sequential => "sequential",
            BackendKind::Parallel => "parallel",
            BackendKind::Batched => "batched",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" | "cpu" => Ok(BackendKind::Sequential),
            "parallel" | "par" | "rayon" => Ok(BackendKind::Parallel),
            "batched" | "batch" | "lanes" => Ok(BackendKind::Batched),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runtime-selected backend.
///
/// # Examples
/// ```
/// use pricer_kernel::backend::{Backend, ComputeBackend, ParallelBackend};
///
/// let backend = Backend::from(ParallelBackend::default());
/// assert_eq!(backend.name(), "parallel");
/// ```
#[derive(Debug, Clone)]
pub enum Backend {
    /// Single-threaded loop.
    Sequential(SequentialBackend),
    /// Rayon chunked loop.
    Parallel(ParallelBackend),
    /// Lane-batched loop.
    Batched(BatchedBackend),
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Sequential(SequentialBackend)
    }
}

impl Backend {
    /// Returns the selector for this backend.
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Sequential(_) => BackendKind::Sequential,
            Backend::Parallel(_) => BackendKind::Parallel,
            Backend::Batched(_) => BackendKind::Batched,
        }
    }
}

impl ComputeBackend for Backend {
    fn name(&self) -> &'static str {
        match self {
            Backend::Sequential(b) => b.name(),
            Backend::Parallel(b) => b.name(),
            Backend::Batched(b) => b.name(),
        }
    }

    fn fill<T: KernelFloat>(&self, coeffs: &PutCoefficients<T>, strikes: &[T], out: &mut [T]) {
        match self {
            Backend::Sequential(b) => b.fill(coeffs, strikes, out),
            Backend::Parallel(b) => b.fill(coeffs, strikes, out),
            Backend::Batched(b) => b.fill(coeffs, strikes, out),
        }
    }
}

impl From<SequentialBackend> for Backend {
    fn from(backend: SequentialBackend) -> Self {
        Backend::Sequential(backend)
    }
}

impl From<ParallelBackend> for Backend {
    fn from(backend: ParallelBackend) -> Self {
        Backend::Parallel(backend)
    }
}

impl From<BatchedBackend> for Backend {
    fn from(backend: BatchedBackend) -> Self {
        Backend::Batched(backend)
    }
}
