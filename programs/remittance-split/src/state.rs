use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    constants::{BUCKET_COUNT, DEFAULT_SPLIT},
    errors::ConfigError,
};

/// Destination bucket, in the fixed order the splitter evaluates them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Spending,
    Savings,
    Bills,
    Insurance,
}

impl Bucket {
    /// Split order. The last bucket absorbs the rounding residual.
    pub const ALL: [Bucket; BUCKET_COUNT] = [
        Bucket::Spending,
        Bucket::Savings,
        Bucket::Bills,
        Bucket::Insurance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Spending => "spending",
            Bucket::Savings => "savings",
            Bucket::Bills => "bills",
            Bucket::Insurance => "insurance",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Percentage split across the four buckets
///
/// Holds raw values; `Splitter::new` is where the sum-to-100 rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitConfig {
    pub spending_percent: u32,
    pub savings_percent: u32,
    pub bills_percent: u32,
    pub insurance_percent: u32,
}

impl SplitConfig {
    pub const fn new(
        spending_percent: u32,
        savings_percent: u32,
        bills_percent: u32,
        insurance_percent: u32,
    ) -> Self {
        Self {
            spending_percent,
            savings_percent,
            bills_percent,
            insurance_percent,
        }
    }

    pub fn percent(&self, bucket: Bucket) -> u32 {
        match bucket {
            Bucket::Spending => self.spending_percent,
            Bucket::Savings => self.savings_percent,
            Bucket::Bills => self.bills_percent,
            Bucket::Insurance => self.insurance_percent,
        }
    }

    /// Percentages in split order
    pub fn percents(&self) -> [u32; BUCKET_COUNT] {
        [
            self.spending_percent,
            self.savings_percent,
            self.bills_percent,
            self.insurance_percent,
        ]
    }

    /// Combined percentage of every bucket except spending
    pub fn tracked_percent(&self) -> u32 {
        self.savings_percent
            .saturating_add(self.bills_percent)
            .saturating_add(self.insurance_percent)
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        let [spending, savings, bills, insurance] = DEFAULT_SPLIT;
        Self::new(spending, savings, bills, insurance)
    }
}

impl fmt::Display for SplitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.spending_percent, self.savings_percent, self.bills_percent, self.insurance_percent
        )
    }
}

/// Parses `spending,savings,bills,insurance`, e.g. `40,30,20,10`
impl FromStr for SplitConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Malformed(s.to_string()))?;

        match parts.as_slice() {
            [spending, savings, bills, insurance] => {
                Ok(Self::new(*spending, *savings, *bills, *insurance))
            }
            _ => Err(ConfigError::Malformed(s.to_string())),
        }
    }
}

/// Result of splitting one amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    /// Amount that was split (smallest currency unit)
    pub total: i128,
    pub spending: i128,
    pub savings: i128,
    pub bills: i128,
    /// Residual bucket: total minus the three floored shares
    pub insurance: i128,
}

impl AllocationResult {
    pub fn amount(&self, bucket: Bucket) -> i128 {
        match bucket {
            Bucket::Spending => self.spending,
            Bucket::Savings => self.savings,
            Bucket::Bills => self.bills,
            Bucket::Insurance => self.insurance,
        }
    }

    /// Allocations in split order
    pub fn amounts(&self) -> [i128; BUCKET_COUNT] {
        [self.spending, self.savings, self.bills, self.insurance]
    }

    /// Sum of the four allocations
    /// Returns None on overflow
    pub fn sum_allocations(&self) -> Option<i128> {
        self.amounts()
            .iter()
            .try_fold(0i128, |acc, amount| acc.checked_add(*amount))
    }

    /// True when the allocations add up to the total exactly
    pub fn is_consistent(&self) -> bool {
        self.sum_allocations() == Some(self.total)
    }
}
