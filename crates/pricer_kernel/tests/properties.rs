//! Property tests for the put kernel: output shape, backend equivalence,
//! and strike monotonicity.

use pricer_kernel::backend::{BatchedBackend, ComputeBackend, ParallelBackend, SequentialBackend};
use pricer_kernel::formula::PutCoefficients;
use pricer_kernel::{price_options, price_options_with};
use proptest::prelude::*;

fn market() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (1.0f64..200.0, -0.05f64..0.8, 0.05f64..1.0, 0.05f64..5.0)
}

proptest! {
    #[test]
    fn prop_output_length_matches_strikes(
        (spot, rate, vol, time) in market(),
        strikes in prop::collection::vec(1.0f64..400.0, 1..300),
    ) {
        let prices = price_options(spot, &strikes, rate, vol, time).unwrap();
        prop_assert_eq!(prices.len(), strikes.len());
    }

    #[test]
    fn prop_parallel_partitioning_is_bitwise_sequential(
        (spot, rate, vol, time) in market(),
        strikes in prop::collection::vec(1.0f64..400.0, 1..2000),
        chunk_size in 1usize..300,
    ) {
        let coeffs = PutCoefficients::new(spot, rate, vol, time);
        let expected = SequentialBackend.evaluate(&coeffs, &strikes);

        let parallel = ParallelBackend::new(chunk_size, 0).evaluate(&coeffs, &strikes);
        prop_assert_eq!(&parallel, &expected);

        let lanes = BatchedBackend::parallel(chunk_size).evaluate(&coeffs, &strikes);
        prop_assert_eq!(&lanes, &expected);
    }

    #[test]
    fn prop_order_independence(
        (spot, rate, vol, time) in market(),
        mut strikes in prop::collection::vec(1.0f64..400.0, 2..200),
    ) {
        // Pricing a permutation permutes the prices
        let forward = price_options(spot, &strikes, rate, vol, time).unwrap().into_vec();
        strikes.reverse();
        let mut reversed = price_options_with(
            &ParallelBackend::new(3, 0),
            spot,
            &strikes,
            rate,
            vol,
            time,
        )
        .unwrap()
        .into_vec();
        reversed.reverse();
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn prop_f32_backends_agree(
        strikes in prop::collection::vec(20.0f32..80.0, 1..500),
    ) {
        let seq = price_options_with(&SequentialBackend, 42.0_f32, &strikes, 0.5, 0.2, 0.5).unwrap();
        let lanes = price_options_with(&BatchedBackend::new(), 42.0_f32, &strikes, 0.5, 0.2, 0.5).unwrap();
        prop_assert_eq!(seq, lanes);
    }
}

/// The put is assembled as `call - futureValue + spot`, so with the other
/// inputs fixed it moves opposite to the strike: a higher strike never
/// yields a higher price.
#[test]
fn test_put_is_monotone_in_strike() {
    let strikes: Vec<f64> = (0..=240).map(|i| 20.0 + 0.25 * i as f64).collect();
    let prices = price_options(42.0, &strikes, 0.5, 0.2, 0.5).unwrap();
    for (window, k) in prices.as_slice().windows(2).zip(&strikes) {
        assert!(
            window[1] <= window[0],
            "price increased between K = {} and K = {}",
            k,
            k + 0.25
        );
    }

    let strikes: Vec<f64> = (0..=40).map(|i| 90.0 + 0.5 * i as f64).collect();
    let prices = price_options(100.0, &strikes, 0.05, 0.2, 1.0).unwrap();
    assert!(prices.as_slice().windows(2).all(|w| w[1] <= w[0]));
}
