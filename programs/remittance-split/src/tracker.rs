use serde::Serialize;

use crate::{
    errors::SplitError,
    state::{AllocationResult, Bucket},
    utils::floor_percent,
};

/// Running per-bucket totals across any number of splits
///
/// Holds four counters and nothing else; individual results are not retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tracker {
    spending_total: i128,
    savings_total: i128,
    bills_total: i128,
    insurance_total: i128,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one allocation
    /// The result is taken as-is; checking it is the caller's job
    ///
    /// # Panics
    ///
    /// Panics if a running total overflows (`overflow-checks` is on in every
    /// profile this crate builds). Use [`Tracker::try_allocate`] to get an
    /// error instead.
    pub fn allocate(&mut self, result: &AllocationResult) {
        self.spending_total += result.spending;
        self.savings_total += result.savings;
        self.bills_total += result.bills;
        self.insurance_total += result.insurance;
    }

    /// Records one allocation with checked math
    ///
    /// Fails with `MathOverflow` if any running total, or their sum, would
    /// leave the `i128` range. The tracker is unchanged on failure.
    pub fn try_allocate(&mut self, result: &AllocationResult) -> Result<(), SplitError> {
        let add = |running: i128, amount: i128| {
            running.checked_add(amount).ok_or(SplitError::MathOverflow)
        };
        let next = Self {
            spending_total: add(self.spending_total, result.spending)?,
            savings_total: add(self.savings_total, result.savings)?,
            bills_total: add(self.bills_total, result.bills)?,
            insurance_total: add(self.insurance_total, result.insurance)?,
        };
        next.checked_total_allocated().ok_or(SplitError::MathOverflow)?;

        *self = next;
        Ok(())
    }

    /// Sum of all four running totals, or None on overflow
    pub fn checked_total_allocated(&self) -> Option<i128> {
        self.spending_total
            .checked_add(self.savings_total)?
            .checked_add(self.bills_total)?
            .checked_add(self.insurance_total)
    }

    /// Sum of all four running totals
    ///
    /// # Panics
    ///
    /// Panics on overflow; only reachable after [`Tracker::allocate`] was fed
    /// results whose totals exceed the `i128` range.
    pub fn total_allocated(&self) -> i128 {
        self.spending_total + self.savings_total + self.bills_total + self.insurance_total
    }

    /// Sum of every bucket except spending
    pub fn tracked_total(&self) -> i128 {
        self.savings_total + self.bills_total + self.insurance_total
    }

    pub fn spending_total(&self) -> i128 {
        self.spending_total
    }

    pub fn savings_total(&self) -> i128 {
        self.savings_total
    }

    pub fn bills_total(&self) -> i128 {
        self.bills_total
    }

    pub fn insurance_total(&self) -> i128 {
        self.insurance_total
    }

    pub fn bucket_total(&self, bucket: Bucket) -> i128 {
        match bucket {
            Bucket::Spending => self.spending_total,
            Bucket::Savings => self.savings_total,
            Bucket::Bills => self.bills_total,
            Bucket::Insurance => self.insurance_total,
        }
    }

    /// Whole-percent share of `total_remitted` realized by `bucket` (floored)
    /// Returns None when nothing has been remitted, or when the bucket holds
    /// over `i128::MAX / 100` times what was remitted
    pub fn realized_percent(&self, bucket: Bucket, total_remitted: i128) -> Option<i128> {
        floor_percent(self.bucket_total(bucket), total_remitted)
    }
}
