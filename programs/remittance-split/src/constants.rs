// Split configuration
pub const PERCENT_DENOMINATOR: u32 = 100;     // 100%
pub const REQUIRED_SPLIT_TOTAL: u32 = 100;    // Buckets must total 100%
pub const BUCKET_COUNT: usize = 4;

// Default split when none is supplied: spending / savings / bills / insurance
pub const DEFAULT_SPLIT: [u32; BUCKET_COUNT] = [50, 30, 15, 5];

// Insurance absorbs at most one unit of truncation per floored bucket
pub const MAX_RESIDUAL_BIAS: i128 = (BUCKET_COUNT - 1) as i128;

// Verification tolerances
pub const DEFAULT_RELATIVE_TOLERANCE_DIVISOR: i128 = 10_000; // 0.01% of total remitted
pub const DEFAULT_PERCENT_TOLERANCE: i128 = 1;               // ±1 percentage point

// Smallest-unit scale used by the scenario amounts (7 decimals)
pub const UNITS_PER_TOKEN: i128 = 10_000_000;

// Compile-time check that the default split is itself valid
const _: () = assert!(
    DEFAULT_SPLIT[0] + DEFAULT_SPLIT[1] + DEFAULT_SPLIT[2] + DEFAULT_SPLIT[3] == REQUIRED_SPLIT_TOTAL
);
