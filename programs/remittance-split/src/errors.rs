use thiserror::Error;

use crate::state::Bucket;

/// Raised when a split configuration cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Split percentages must sum to 100 (got {0})")]
    InvalidSplitTotal(u32),

    #[error("Split percentage sum overflowed")]
    MathOverflow,

    #[error("Split must be four comma-separated percentages (got {0:?})")]
    Malformed(String),
}

/// Raised when `split` is given a zero or negative amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Total amount must be positive (got {0})")]
pub struct InvalidAmountError(pub i128);

/// Any failure surfaced while driving a splitter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmountError),

    #[error("Math overflow: cumulative total exceeds the supported range")]
    MathOverflow,
}

/// Scenario name not in the built-in suite
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown scenario {0:?}")]
pub struct UnknownScenario(pub String);

/// A contractual invariant did not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Allocations sum to {allocated}, expected {total}")]
    AllocationMismatch { total: i128, allocated: i128 },

    #[error("{bucket} allocation is negative ({amount})")]
    NegativeAllocation { bucket: Bucket, amount: i128 },

    #[error("Cumulative allocations {allocated} do not equal total remitted {remitted}")]
    CumulativeMismatch { remitted: i128, allocated: i128 },

    #[error("Insurance residual {insurance} exceeds floor share {floor_share} by more than {bound}")]
    ResidualOutOfBounds {
        insurance: i128,
        floor_share: i128,
        bound: i128,
    },

    #[error("Tracked total {actual} differs from expected {expected} by {difference} (tolerance {tolerance})")]
    TrackedShareOutOfTolerance {
        expected: i128,
        actual: i128,
        difference: i128,
        tolerance: i128,
    },

    #[error("{bucket} realized {actual}% but configured {expected}% (tolerance {tolerance})")]
    BucketPercentOutOfTolerance {
        bucket: Bucket,
        expected: i128,
        actual: i128,
        tolerance: i128,
    },

    #[error("Nothing remitted; percentages are undefined")]
    NothingRemitted,

    #[error("Math overflow while checking allocations")]
    MathOverflow,
}
