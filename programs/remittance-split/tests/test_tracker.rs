//! Tests for cumulative allocation tracking

mod helpers;

use {
    helpers::{high_volume, multiple_remittances, run_sequence, standard_splitter, tokens},
    remittance_split::{invariants::check_cumulative, Bucket, Tracker},
};

/// Test a single remittance is tracked exactly
#[test]
fn test_tracker_single_remittance() {
    let splitter = standard_splitter();
    let mut tracker = Tracker::new();

    let amount = tokens(10_000);
    let result = splitter.split(amount).unwrap();
    tracker.allocate(&result);

    assert_eq!(tracker.total_allocated(), amount);
    assert_eq!(tracker.spending_total(), tokens(4_000));
    assert_eq!(tracker.tracked_total(), tokens(6_000));
}

/// Test cumulative totals over several remittances
#[test]
fn test_tracker_multiple_remittances() {
    let (tracker, total_remitted) = run_sequence(&standard_splitter(), &multiple_remittances());

    assert_eq!(total_remitted, tokens(40_500));
    assert_eq!(tracker.total_allocated(), total_remitted);
    assert_eq!(tracker.spending_total(), tokens(16_200));
    assert_eq!(tracker.savings_total(), tokens(12_150));
    assert_eq!(tracker.bills_total(), tokens(8_100));
    assert_eq!(tracker.insurance_total(), tokens(4_050));
    assert!(check_cumulative(&tracker, total_remitted).is_ok());
}

/// Test cumulative exactness when every call has a rounding residual
#[test]
fn test_tracker_exact_with_rounding() {
    let amounts: Vec<i128> = (1..=500).map(|i| i * 7 + 3).collect();
    let (tracker, total_remitted) = run_sequence(&standard_splitter(), &amounts);

    assert_eq!(tracker.total_allocated(), total_remitted);
    // Floors never overshoot, so insurance can only sit at or above its share
    assert!(tracker.insurance_total() * 100 >= total_remitted * 10);
}

/// Test each running total is non-decreasing after every allocation
#[test]
fn test_tracker_buckets_are_monotonic() {
    let splitter = standard_splitter();
    let mut tracker = Tracker::new();

    for amount in high_volume().into_iter().chain([1, 7, 99]) {
        let before = tracker;
        tracker.allocate(&splitter.split(amount).unwrap());

        for bucket in Bucket::ALL {
            assert!(
                tracker.bucket_total(bucket) >= before.bucket_total(bucket),
                "{bucket} decreased after allocating {amount}"
            );
        }
        assert!(tracker.total_allocated() > before.total_allocated());
    }
}

/// Test tracked total excludes only spending
#[test]
fn test_tracker_tracked_total_excludes_spending() {
    let (tracker, _) = run_sequence(&standard_splitter(), &[tokens(1_000), 99, 7]);

    assert_eq!(
        tracker.tracked_total(),
        tracker.savings_total() + tracker.bills_total() + tracker.insurance_total()
    );
    assert_eq!(
        tracker.total_allocated() - tracker.tracked_total(),
        tracker.spending_total()
    );
}

/// Test cumulative check reports a mismatch against the wrong total
#[test]
fn test_tracker_cumulative_mismatch_detected() {
    let (tracker, total_remitted) = run_sequence(&standard_splitter(), &multiple_remittances());
    assert!(check_cumulative(&tracker, total_remitted + 1).is_err());
}

/// Test realized percentages of the reference split
#[test]
fn test_tracker_realized_percent() {
    let (tracker, total_remitted) = run_sequence(&standard_splitter(), &multiple_remittances());

    let realized: Vec<i128> = Bucket::ALL
        .iter()
        .map(|b| tracker.realized_percent(*b, total_remitted).unwrap())
        .collect();
    assert_eq!(realized, vec![40, 30, 20, 10]);
}
