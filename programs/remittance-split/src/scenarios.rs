//! Built-in verification scenarios.
//!
//! Each scenario feeds a fixed amount sequence through a [`Splitter`] and a
//! fresh [`Tracker`], checking conservation after every call and the
//! scenario's aggregate property at the end.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{
    constants::UNITS_PER_TOKEN,
    errors::{InvalidAmountError, InvariantViolation, SplitError, UnknownScenario},
    events::{emit, ScenarioCompleted, SuiteCompleted},
    invariants::{
        check_bucket_percentages, check_conservation, check_cumulative, check_residual_bound,
        check_tracked_share, Tolerances,
    },
    splitter::Splitter,
    state::SplitConfig,
    tracker::Tracker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    SingleRemittance,
    MultipleRemittances,
    RoundingEdgeCases,
    HighVolume,
    PercentageMaintenance,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::SingleRemittance,
        Scenario::MultipleRemittances,
        Scenario::RoundingEdgeCases,
        Scenario::HighVolume,
        Scenario::PercentageMaintenance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::SingleRemittance => "single-remittance",
            Scenario::MultipleRemittances => "multiple-remittances",
            Scenario::RoundingEdgeCases => "rounding-edge-cases",
            Scenario::HighVolume => "high-volume",
            Scenario::PercentageMaintenance => "percentage-maintenance",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::SingleRemittance => "Single remittance allocation consistency",
            Scenario::MultipleRemittances => "Multiple remittances allocation consistency",
            Scenario::RoundingEdgeCases => "Rounding edge cases",
            Scenario::HighVolume => "High volume allocation consistency",
            Scenario::PercentageMaintenance => "Percentage maintenance",
        }
    }

    /// Amounts fed to the splitter, in smallest units
    pub fn amounts(self) -> Vec<i128> {
        match self {
            Scenario::SingleRemittance => vec![10_000 * UNITS_PER_TOKEN],
            Scenario::MultipleRemittances => [5_000i128, 10_000, 7_500, 15_000, 3_000]
                .iter()
                .map(|tokens| tokens * UNITS_PER_TOKEN)
                .collect(),
            Scenario::RoundingEdgeCases => vec![
                1,                         // minimum amount
                7,                         // prime
                99,                        // just under 100
                1_000 * UNITS_PER_TOKEN,   // round token amount
                3_333 * UNITS_PER_TOKEN,   // doesn't divide evenly
                99_999_999_999,            // large odd number
            ],
            Scenario::HighVolume => (0..100i128)
                .map(|i| 5_000 * UNITS_PER_TOKEN + i * 100 * UNITS_PER_TOKEN)
                .collect(),
            Scenario::PercentageMaintenance => [10_000i128, 20_000, 15_000]
                .iter()
                .map(|tokens| tokens * UNITS_PER_TOKEN)
                .collect(),
        }
    }

    /// Aggregate checks applied once the sequence has been fed through
    pub fn checks(self) -> AggregateChecks {
        match self {
            Scenario::HighVolume => AggregateChecks {
                tracked_share: true,
                bucket_percentages: false,
            },
            Scenario::PercentageMaintenance => AggregateChecks {
                tracked_share: false,
                bucket_percentages: true,
            },
            _ => AggregateChecks::default(),
        }
    }

    pub fn run(self, splitter: &Splitter, tolerances: &Tolerances) -> ScenarioReport {
        run_amounts(
            splitter,
            self.name(),
            &self.amounts(),
            self.checks(),
            tolerances,
        )
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// Approximate checks run after a sequence; conservation is always checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateChecks {
    pub tracked_share: bool,
    pub bucket_percentages: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    /// An invariant did not hold
    Failed(InvariantViolation),
    /// The splitter refused an input
    Errored(SplitError),
}

impl ScenarioOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioOutcome::Passed => "passed",
            ScenarioOutcome::Failed(_) => "failed",
            ScenarioOutcome::Errored(_) => "errored",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            ScenarioOutcome::Passed => None,
            ScenarioOutcome::Failed(violation) => Some(violation.to_string()),
            ScenarioOutcome::Errored(err) => Some(err.to_string()),
        }
    }
}

impl Serialize for ScenarioOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScenarioOutcome", 2)?;
        state.serialize_field("status", self.label())?;
        state.serialize_field("detail", &self.detail())?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: ScenarioOutcome,
    /// Splits completed before the scenario finished or stopped
    pub calls: usize,
    pub total_remitted: i128,
    pub totals: Tracker,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SuiteReport {
    pub config: SplitConfig,
    pub tolerances: Tolerances,
    pub scenarios: Vec<ScenarioReport>,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl SuiteReport {
    pub fn success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

enum Stop {
    Violation(InvariantViolation),
    Split(SplitError),
}

impl From<InvariantViolation> for Stop {
    fn from(violation: InvariantViolation) -> Self {
        Stop::Violation(violation)
    }
}

impl From<SplitError> for Stop {
    fn from(err: SplitError) -> Self {
        Stop::Split(err)
    }
}

impl From<InvalidAmountError> for Stop {
    fn from(err: InvalidAmountError) -> Self {
        Stop::Split(err.into())
    }
}

/// Feeds `amounts` through `splitter` into a fresh tracker and checks the result
pub fn run_amounts(
    splitter: &Splitter,
    name: &str,
    amounts: &[i128],
    checks: AggregateChecks,
    tolerances: &Tolerances,
) -> ScenarioReport {
    let mut tracker = Tracker::new();
    let mut total_remitted = 0i128;
    let mut calls = 0usize;

    let mut drive = || -> Result<(), Stop> {
        for &amount in amounts {
            let result = splitter.split(amount)?;
            check_conservation(&result)?;
            check_residual_bound(splitter.config(), &result)?;

            total_remitted = total_remitted
                .checked_add(amount)
                .ok_or(SplitError::MathOverflow)?;
            tracker.try_allocate(&result)?;
            calls += 1;
        }

        check_cumulative(&tracker, total_remitted)?;

        if checks.tracked_share {
            check_tracked_share(&tracker, splitter.config(), total_remitted, tolerances)?;
        }
        if checks.bucket_percentages {
            check_bucket_percentages(&tracker, splitter.config(), total_remitted, tolerances)?;
        }
        Ok(())
    };

    let outcome = match drive() {
        Ok(()) => ScenarioOutcome::Passed,
        Err(Stop::Violation(violation)) => ScenarioOutcome::Failed(violation),
        Err(Stop::Split(err)) => ScenarioOutcome::Errored(err),
    };

    tracing::debug!(scenario = name, outcome = outcome.label(), calls, "scenario finished");
    emit(&ScenarioCompleted {
        scenario: name,
        outcome: outcome.label(),
        calls,
        total_remitted,
    });

    ScenarioReport {
        name: name.to_string(),
        outcome,
        calls,
        total_remitted,
        totals: tracker,
    }
}

/// Runs `scenarios` in order and tallies the outcomes
pub fn run_suite(
    splitter: &Splitter,
    scenarios: &[Scenario],
    tolerances: &Tolerances,
) -> SuiteReport {
    let reports: Vec<ScenarioReport> = scenarios
        .iter()
        .map(|scenario| scenario.run(splitter, tolerances))
        .collect();

    summarize(splitter, reports, tolerances)
}

/// Tallies already-run reports into a suite report
pub fn summarize(
    splitter: &Splitter,
    scenarios: Vec<ScenarioReport>,
    tolerances: &Tolerances,
) -> SuiteReport {
    let (mut passed, mut failed, mut errored) = (0, 0, 0);
    for report in &scenarios {
        match report.outcome {
            ScenarioOutcome::Passed => passed += 1,
            ScenarioOutcome::Failed(_) => failed += 1,
            ScenarioOutcome::Errored(_) => errored += 1,
        }
    }

    emit(&SuiteCompleted {
        config: *splitter.config(),
        passed,
        failed,
        errored,
    });

    SuiteReport {
        config: *splitter.config(),
        tolerances: *tolerances,
        scenarios,
        passed,
        failed,
        errored,
    }
}
