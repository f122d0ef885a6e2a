//! Pricing kernel entry points.
//!
//! [`PricingKernel`] pairs a backend with the validation boundary: inputs are
//! checked once per call, before any arithmetic, and a call either prices
//! every strike or returns the first [`PricingError`]. The free functions
//! [`price_options`] and [`price_options_with`] are shorthands for one-off
//! calls.

use pricer_core::traits::KernelFloat;
use pricer_core::types::{validate, MarketInputs, PriceVector, PricingError};
use tracing::debug;

use crate::backend::{Backend, ComputeBackend, SequentialBackend};
use crate::formula::PutCoefficients;

/// Put pricing kernel bound to a compute backend.
///
/// Stateless apart from the backend; calls are reentrant and may run
/// concurrently from several threads.
///
/// # Examples
///
/// ```rust
/// use pricer_kernel::backend::ParallelBackend;
/// use pricer_kernel::kernel::PricingKernel;
///
/// let kernel = PricingKernel::new(ParallelBackend::default());
/// let prices = kernel
///     .price_options(42.0_f64, &[40.0, 40.5, 41.0], 0.5, 0.2, 0.5)
///     .unwrap();
///
/// assert_eq!(prices.len(), 3);
/// assert!((prices[0] - 21.72236541870697).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingKernel<B: ComputeBackend = Backend> {
    backend: B,
}

impl<B: ComputeBackend> PricingKernel<B> {
    /// Creates a kernel running on `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Prices validated market inputs.
    ///
    /// Infallible: [`MarketInputs`] can only hold in-domain values.
    pub fn price<T: KernelFloat>(&self, inputs: &MarketInputs<T>) -> PriceVector<T> {
        self.evaluate(
            inputs.spot(),
            inputs.strikes(),
            inputs.rate(),
            inputs.volatility(),
            inputs.time(),
        )
    }

    /// Validates raw inputs and prices one put per strike.
    ///
    /// # Errors
    /// Returns a [`PricingError`] domain error when any input is outside
    /// the formula's domain (see [`validate`]).
    pub fn price_options<T: KernelFloat>(
        &self,
        spot: T,
        strikes: &[T],
        rate: T,
        volatility: T,
        time: T,
    ) -> Result<PriceVector<T>, PricingError> {
        validate(spot, strikes, rate, volatility, time)?;
        Ok(self.evaluate(spot, strikes, rate, volatility, time))
    }

    fn evaluate<T: KernelFloat>(
        &self,
        spot: T,
        strikes: &[T],
        rate: T,
        volatility: T,
        time: T,
    ) -> PriceVector<T> {
        evaluate_on(&self.backend, spot, strikes, rate, volatility, time)
    }
}

/// Prices already-validated inputs on `backend`.
fn evaluate_on<T: KernelFloat, B: ComputeBackend>(
    backend: &B,
    spot: T,
    strikes: &[T],
    rate: T,
    volatility: T,
    time: T,
) -> PriceVector<T> {
    debug!(
        backend = backend.name(),
        precision = T::PRECISION,
        n_strikes = strikes.len(),
        "pricing puts"
    );
    let coeffs = PutCoefficients::new(spot, rate, volatility, time);
    PriceVector::from(backend.evaluate(&coeffs, strikes))
}

/// Prices one put per strike on the sequential backend.
///
/// # Errors
/// Returns a [`PricingError`] domain error for out-of-domain inputs.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
/// use pricer_kernel::price_options;
///
/// let prices = price_options(42.0_f32, &[40.0], 0.5, 0.2, 0.5).unwrap();
/// assert_eq!(prices.len(), 1);
///
/// let err = price_options(42.0_f32, &[40.0], 0.5, 0.2, 0.0).unwrap_err();
/// assert_eq!(err, PricingError::InvalidTime { time: 0.0 });
/// ```
pub fn price_options<T: KernelFloat>(
    spot: T,
    strikes: &[T],
    rate: T,
    volatility: T,
    time: T,
) -> Result<PriceVector<T>, PricingError> {
    price_options_with(&SequentialBackend, spot, strikes, rate, volatility, time)
}

/// Prices one put per strike on a caller-selected backend.
///
/// # Errors
/// Returns a [`PricingError`] domain error for out-of-domain inputs.
pub fn price_options_with<T: KernelFloat, B: ComputeBackend>(
    backend: &B,
    spot: T,
    strikes: &[T],
    rate: T,
    volatility: T,
    time: T,
) -> Result<PriceVector<T>, PricingError> {
    validate(spot, strikes, rate, volatility, time)?;
    Ok(evaluate_on(backend, spot, strikes, rate, volatility, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BatchedBackend, ParallelBackend};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_debug_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    #[test]
    fn test_price_matches_price_options() {
        let inputs = MarketInputs::new(42.0_f64, vec![39.0, 40.0, 41.0], 0.5, 0.2, 0.5).unwrap();
        let kernel = PricingKernel::new(Backend::default());

        let from_inputs = kernel.price(&inputs);
        let from_raw = kernel
            .price_options(42.0, inputs.strikes(), 0.5, 0.2, 0.5)
            .unwrap();
        assert_eq!(from_inputs, from_raw);
    }

    #[test]
    fn test_validation_happens_before_backend() {
        let kernel = PricingKernel::new(ParallelBackend::new(1, 0));
        let strikes = [40.0_f64, -1.0, 41.0];
        let err = kernel
            .price_options(42.0, &strikes, 0.5, 0.2, 0.5)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::InvalidStrike {
                index: 1,
                strike: -1.0
            }
        );
    }

    #[test]
    fn test_zero_time_is_domain_error_on_every_backend() {
        let strikes = [40.0_f64];
        let backends: [Backend; 3] = [
            SequentialBackend.into(),
            ParallelBackend::default().into(),
            BatchedBackend::new().into(),
        ];
        for backend in &backends {
            let err = price_options_with(backend, 42.0, &strikes, 0.5, 0.2, 0.0).unwrap_err();
            assert_eq!(err, PricingError::InvalidTime { time: 0.0 });
            assert!(err.is_domain_error());
        }
    }

    #[test]
    fn test_free_functions_log_pricing_event() {
        let logs = capture_debug_logs(|| {
            price_options_with(&BatchedBackend::new(), 42.0_f32, &[40.0, 41.0], 0.5, 0.2, 0.5)
                .unwrap();
        });
        assert!(logs.contains("pricing puts"), "{}", logs);
        assert!(logs.contains("batched"), "{}", logs);
        assert!(logs.contains("f32"), "{}", logs);
        assert!(logs.contains("n_strikes=2"), "{}", logs);

        let logs = capture_debug_logs(|| {
            price_options(42.0_f64, &[40.0], 0.5, 0.2, 0.5).unwrap();
        });
        assert!(logs.contains("sequential"), "{}", logs);
        assert!(logs.contains("n_strikes=1"), "{}", logs);
    }

    #[test]
    fn test_rejected_call_does_not_log_pricing() {
        let logs = capture_debug_logs(|| {
            let _ = price_options(42.0_f64, &[40.0], 0.5, 0.2, 0.0);
        });
        assert!(!logs.contains("pricing puts"), "{}", logs);
    }

    #[test]
    fn test_empty_strikes_rejected() {
        let err = price_options::<f64>(42.0, &[], 0.5, 0.2, 0.5).unwrap_err();
        assert_eq!(err, PricingError::EmptyStrikes);
    }

    #[test]
    fn test_kernel_is_shareable_across_threads() {
        let kernel = PricingKernel::new(BatchedBackend::new());
        std::thread::scope(|scope| {
            for i in 0..4 {
                let kernel = &kernel;
                scope.spawn(move || {
                    let strike = 40.0 + i as f64;
                    let prices = kernel.price_options(42.0, &[strike], 0.5, 0.2, 0.5).unwrap();
                    assert!(prices.all_finite());
                });
            }
        });
    }
}
