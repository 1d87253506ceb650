//! Property tests: running-state invariants and score/bound consistency.

use chebyshev_detector::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// A finite value in a range where squared deviations cannot overflow.
fn arb_value() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

/// A stream of finite values.
fn arb_stream(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_value(), min..max)
}

/// A stream that mostly hovers around a level with occasional large spikes.
fn arb_spiky_stream() -> impl Strategy<Value = Vec<f64>> {
    (
        -1.0e3..1.0e3f64,
        prop::collection::vec((-1.0..1.0f64, prop::bool::weighted(0.05)), 20..400),
    )
        .prop_map(|(level, steps)| {
            steps
                .into_iter()
                .map(|(noise, spike)| {
                    let v = level + noise;
                    if spike {
                        v * 50.0 + 500.0
                    } else {
                        v
                    }
                })
                .collect()
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn counts_track_calls_and_filter(stream in arb_stream(1, 300)) {
        let mut det = ChebyshevDetector::new();
        let mut passed = 0u64;
        for (i, &v) in stream.iter().enumerate() {
            let b = det.score_detailed(v);
            if b.stage2_updated {
                passed += 1;
            }
            prop_assert_eq!(det.stage1().count(), i as u64 + 1);
            prop_assert_eq!(det.stage2().count(), passed);
            prop_assert!(det.stage2().count() <= det.stage1().count());
        }
    }

    #[test]
    fn sums_of_squared_deviations_never_shrink(stream in arb_spiky_stream()) {
        let mut det = ChebyshevDetector::new();
        let mut prev1 = 0.0;
        let mut prev2 = 0.0;
        for &v in &stream {
            det.score(v);
            prop_assert!(det.stage1().sum_sq_dev() >= prev1);
            prop_assert!(det.stage2().sum_sq_dev() >= prev2);
            prev1 = det.stage1().sum_sq_dev();
            prev2 = det.stage2().sum_sq_dev();
        }
    }

    #[test]
    fn score_is_zero_exactly_inside_stage_two_bounds(stream in arb_spiky_stream()) {
        let mut det = ChebyshevDetector::new();
        for &v in &stream {
            let b = det.score_detailed(v);
            let inside = b.stage2.low <= v && v <= b.stage2.high;
            prop_assert_eq!(b.side == BoundSide::Inside, inside);
            prop_assert_eq!(b.score == 0.0, inside);
            prop_assert_eq!(b.stage2_updated, b.stage1.contains(v));
        }
    }

    #[test]
    fn first_call_is_never_an_outlier(v in arb_value()) {
        let mut det = ChebyshevDetector::new();
        let b = det.score_detailed(v);
        prop_assert!(b.stage2_updated);
        prop_assert_eq!(b.score, 0.0);
        prop_assert_eq!(det.stage1().std_dev(), STD_DEV_FLOOR);
        prop_assert_eq!(det.stage1().mean(), v);
    }

    #[test]
    fn replay_on_fresh_detector_is_bit_identical(stream in arb_spiky_stream()) {
        let mut a = ChebyshevDetector::new();
        let mut b = ChebyshevDetector::new();
        for &v in &stream {
            prop_assert_eq!(a.score(v).to_bits(), b.score(v).to_bits());
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn score_matches_breakdown(stream in arb_stream(1, 100)) {
        let mut plain = ChebyshevDetector::new();
        let mut detailed = ChebyshevDetector::new();
        for &v in &stream {
            prop_assert_eq!(plain.score(v).to_bits(), detailed.score_detailed(v).score.to_bits());
        }
    }
}
