//! Property tests for confidence bucketing

use hemocheck_core::Confidence;
use proptest::prelude::*;

proptest! {
    #[test]
    fn tails_are_high(p in prop_oneof![0.0f64..0.3, 0.700_000_1f64..=1.0]) {
        prop_assert_eq!(Confidence::from_probability(p), Confidence::High);
    }

    #[test]
    fn centre_is_low(p in 0.4f64..=0.6) {
        prop_assert_eq!(Confidence::from_probability(p), Confidence::Low);
    }

    #[test]
    fn bucketing_is_symmetric_around_half(p in 0.0f64..=1.0) {
        // Skip mirrored values that land exactly on a boundary after rounding
        let mirrored = 1.0 - p;
        prop_assume!([0.3, 0.4, 0.6, 0.7].iter().all(|b| (mirrored - b).abs() > 1e-12));
        prop_assume!([0.3, 0.4, 0.6, 0.7].iter().all(|b| (p - b).abs() > 1e-12));
        prop_assert_eq!(
            Confidence::from_probability(p),
            Confidence::from_probability(mirrored)
        );
    }

    #[test]
    fn bucketing_is_deterministic(p in 0.0f64..=1.0) {
        prop_assert_eq!(Confidence::from_probability(p), Confidence::from_probability(p));
    }
}
