//! Deterministic remittance splitting.
//!
//! A [`Splitter`] divides a positive integer amount across spending, savings,
//! bills and insurance. The first three buckets are floored; insurance takes
//! the residual so every split conserves its input exactly. A [`Tracker`]
//! accumulates results, and [`invariants`] holds the checks both must satisfy.

pub mod constants;
pub mod errors;
pub mod events;
pub mod invariants;
pub mod report;
pub mod scenarios;
pub mod splitter;
pub mod state;
pub mod tracker;
mod utils;

pub use errors::{ConfigError, InvalidAmountError, InvariantViolation, SplitError};
pub use invariants::Tolerances;
pub use scenarios::{Scenario, ScenarioOutcome, ScenarioReport, SuiteReport};
pub use splitter::Splitter;
pub use state::{AllocationResult, Bucket, SplitConfig};
pub use tracker::Tracker;
pub use utils::calculate_bucket_amount;
