//! Contractual checks over split results and tracker state.
//!
//! Conservation checks are exact. The percentage checks are approximate and
//! take their thresholds from [`Tolerances`].

use serde::Serialize;

use crate::{
    constants::{
        BUCKET_COUNT, DEFAULT_PERCENT_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE_DIVISOR,
        MAX_RESIDUAL_BIAS,
    },
    errors::InvariantViolation,
    state::{AllocationResult, Bucket, SplitConfig},
    tracker::Tracker,
    utils::{abs_difference, calculate_bucket_amount},
};

/// Thresholds for the approximate percentage checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tolerances {
    /// Tracked share may drift by `total_remitted / relative_divisor`
    pub relative_divisor: i128,
    /// Per-bucket realized percent may drift by this many points
    pub percent_points: i128,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            relative_divisor: DEFAULT_RELATIVE_TOLERANCE_DIVISOR,
            percent_points: DEFAULT_PERCENT_TOLERANCE,
        }
    }
}

/// Allocations are non-negative and sum exactly to the result's total
pub fn check_conservation(result: &AllocationResult) -> Result<(), InvariantViolation> {
    for bucket in Bucket::ALL {
        let amount = result.amount(bucket);
        if amount < 0 {
            return Err(InvariantViolation::NegativeAllocation { bucket, amount });
        }
    }

    match result.sum_allocations() {
        Some(allocated) if allocated == result.total => Ok(()),
        Some(allocated) => Err(InvariantViolation::AllocationMismatch {
            total: result.total,
            allocated,
        }),
        None => Err(InvariantViolation::MathOverflow),
    }
}

/// Tracker holds exactly what was remitted
pub fn check_cumulative(tracker: &Tracker, total_remitted: i128) -> Result<(), InvariantViolation> {
    let allocated = tracker
        .checked_total_allocated()
        .ok_or(InvariantViolation::MathOverflow)?;
    if allocated != total_remitted {
        return Err(InvariantViolation::CumulativeMismatch {
            remitted: total_remitted,
            allocated,
        });
    }
    Ok(())
}

/// Insurance stays within `MAX_RESIDUAL_BIAS` of its own floored share
pub fn check_residual_bound(
    config: &SplitConfig,
    result: &AllocationResult,
) -> Result<(), InvariantViolation> {
    let floor_share = calculate_bucket_amount(result.total, config.insurance_percent);
    let within = abs_difference(result.insurance, floor_share)
        .is_some_and(|diff| diff <= MAX_RESIDUAL_BIAS);

    if !within {
        return Err(InvariantViolation::ResidualOutOfBounds {
            insurance: result.insurance,
            floor_share,
            bound: MAX_RESIDUAL_BIAS,
        });
    }
    Ok(())
}

/// Non-spending total approximates its configured share of everything remitted
pub fn check_tracked_share(
    tracker: &Tracker,
    config: &SplitConfig,
    total_remitted: i128,
    tolerances: &Tolerances,
) -> Result<(), InvariantViolation> {
    if total_remitted <= 0 {
        return Err(InvariantViolation::NothingRemitted);
    }

    let expected = calculate_bucket_amount(total_remitted, config.tracked_percent());
    let actual = tracker.tracked_total();
    let tolerance = total_remitted / tolerances.relative_divisor.max(1);
    let difference =
        abs_difference(actual, expected).ok_or(InvariantViolation::MathOverflow)?;

    if difference > tolerance {
        return Err(InvariantViolation::TrackedShareOutOfTolerance {
            expected,
            actual,
            difference,
            tolerance,
        });
    }
    Ok(())
}

/// Every bucket's realized whole percent is near its configured percent
pub fn check_bucket_percentages(
    tracker: &Tracker,
    config: &SplitConfig,
    total_remitted: i128,
    tolerances: &Tolerances,
) -> Result<(), InvariantViolation> {
    if total_remitted <= 0 {
        return Err(InvariantViolation::NothingRemitted);
    }

    for bucket in Bucket::ALL {
        let expected = config.percent(bucket) as i128;
        let actual = tracker
            .realized_percent(bucket, total_remitted)
            .ok_or(InvariantViolation::MathOverflow)?;

        let drift = abs_difference(actual, expected).ok_or(InvariantViolation::MathOverflow)?;
        if drift > tolerances.percent_points {
            return Err(InvariantViolation::BucketPercentOutOfTolerance {
                bucket,
                expected,
                actual,
                tolerance: tolerances.percent_points,
            });
        }
    }
    Ok(())
}

/// Realized whole percent of each bucket, in split order
pub fn realized_percents(
    tracker: &Tracker,
    total_remitted: i128,
) -> Option<[i128; BUCKET_COUNT]> {
    let mut percents = [0i128; BUCKET_COUNT];
    for (slot, bucket) in percents.iter_mut().zip(Bucket::ALL) {
        *slot = tracker.realized_percent(bucket, total_remitted)?;
    }
    Some(percents)
}
