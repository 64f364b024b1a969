//! Property tests for split conservation and tracking
//!
//! Configurations are drawn by cutting [0, 100] at three points, so every
//! generated split sums to exactly 100 and zero-width buckets occur naturally.

use {
    proptest::prelude::*,
    remittance_split::{
        calculate_bucket_amount,
        constants::MAX_RESIDUAL_BIAS,
        invariants::{check_conservation, check_residual_bound},
        Bucket, SplitConfig, Splitter, Tracker,
    },
};

fn split_config() -> impl Strategy<Value = SplitConfig> {
    (0u32..=100, 0u32..=100, 0u32..=100).prop_map(|(a, b, c)| {
        let mut cuts = [a, b, c];
        cuts.sort_unstable();
        SplitConfig::new(cuts[0], cuts[1] - cuts[0], cuts[2] - cuts[1], 100 - cuts[2])
    })
}

fn amount() -> impl Strategy<Value = i128> {
    prop_oneof![
        1i128..=1_000,
        1i128..=10_000_000_000_000,
        1i128..=i128::MAX,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_split_conserves_every_call(config in split_config(), total in amount()) {
        let splitter = Splitter::new(config).unwrap();
        let result = splitter.split(total).unwrap();

        prop_assert_eq!(result.total, total);
        prop_assert_eq!(result.sum_allocations(), Some(total));
        prop_assert!(result.amounts().iter().all(|a| *a >= 0));
        prop_assert!(check_conservation(&result).is_ok());
    }

    #[test]
    fn prop_leading_buckets_are_floored(config in split_config(), total in amount()) {
        let result = Splitter::new(config).unwrap().split(total).unwrap();

        for bucket in [Bucket::Spending, Bucket::Savings, Bucket::Bills] {
            prop_assert_eq!(
                result.amount(bucket),
                calculate_bucket_amount(total, config.percent(bucket))
            );
        }
    }

    #[test]
    fn prop_residual_within_bound(config in split_config(), total in amount()) {
        let result = Splitter::new(config).unwrap().split(total).unwrap();
        let floor_share = calculate_bucket_amount(total, config.insurance_percent);

        prop_assert!(result.insurance >= floor_share);
        prop_assert!(result.insurance - floor_share <= MAX_RESIDUAL_BIAS);
        prop_assert!(check_residual_bound(&config, &result).is_ok());
    }

    #[test]
    fn prop_tracker_conserves_and_is_monotonic(
        config in split_config(),
        amounts in prop::collection::vec(1i128..=1_000_000_000_000_000, 1..64)
    ) {
        let splitter = Splitter::new(config).unwrap();
        let mut tracker = Tracker::new();
        let mut total_remitted = 0i128;

        for amount in amounts {
            let before = tracker;
            tracker.allocate(&splitter.split(amount).unwrap());
            total_remitted += amount;

            for bucket in Bucket::ALL {
                prop_assert!(tracker.bucket_total(bucket) >= before.bucket_total(bucket));
            }
            prop_assert_eq!(tracker.total_allocated(), total_remitted);
        }
    }

    #[test]
    fn prop_invalid_amounts_rejected(config in split_config(), total in i128::MIN..=0) {
        let splitter = Splitter::new(config).unwrap();
        prop_assert!(splitter.split(total).is_err());
    }

    #[test]
    fn prop_bad_sums_rejected(a in 0u32..=100, b in 0u32..=100, c in 0u32..=100, d in 0u32..=100) {
        prop_assume!(a + b + c + d != 100);
        prop_assert!(Splitter::new(SplitConfig::new(a, b, c, d)).is_err());
    }
}
