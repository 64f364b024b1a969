use crate::{
    constants::REQUIRED_SPLIT_TOTAL,
    errors::{ConfigError, InvalidAmountError},
    events::{emit, SplitterConfigured},
    state::{AllocationResult, SplitConfig},
    utils::{calculate_bucket_amount, sum_percentages},
};

/// Splits amounts according to a validated percentage configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    /// Validates the configuration and takes ownership of it
    /// Percentages must sum to exactly 100; individual zeros are allowed
    pub fn new(config: SplitConfig) -> Result<Self, ConfigError> {
        let total = sum_percentages(&config.percents()).ok_or(ConfigError::MathOverflow)?;

        if total != REQUIRED_SPLIT_TOTAL {
            return Err(ConfigError::InvalidSplitTotal(total));
        }

        tracing::debug!(%config, "splitter configured");
        emit(&SplitterConfigured { config });

        Ok(Self { config })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Splits `total_amount` into four allocations that sum to it exactly
    ///
    /// Spending, savings and bills are floored in that order. Insurance takes
    /// the residual, so it runs up to 3 units above its own floored share.
    pub fn split(&self, total_amount: i128) -> Result<AllocationResult, InvalidAmountError> {
        if total_amount <= 0 {
            return Err(InvalidAmountError(total_amount));
        }

        let spending = calculate_bucket_amount(total_amount, self.config.spending_percent);
        let savings = calculate_bucket_amount(total_amount, self.config.savings_percent);
        let bills = calculate_bucket_amount(total_amount, self.config.bills_percent);
        // Each floored share is at most its exact share, so this never goes negative
        let insurance = total_amount - spending - savings - bills;

        #[cfg(feature = "verbose")]
        emit(&crate::events::SplitCalculated {
            total_amount,
            spending,
            savings,
            bills,
            insurance,
        });

        Ok(AllocationResult {
            total: total_amount,
            spending,
            savings,
            bills,
            insurance,
        })
    }
}

impl Default for Splitter {
    /// Splitter over the default 50/30/15/5 configuration
    fn default() -> Self {
        Self {
            config: SplitConfig::default(),
        }
    }
}
