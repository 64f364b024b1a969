//! Test helpers for remittance split integration tests
//!
//! Each test binary pulls in only what it needs, so some helpers look unused
//! from any single file.
#![allow(dead_code, unused_imports)]

pub mod amounts;

pub use amounts::*;

use remittance_split::{SplitConfig, Splitter, Tracker};

/// The 40/30/20/10 split every reference scenario uses
pub const STANDARD_SPLIT: SplitConfig = SplitConfig::new(40, 30, 20, 10);

/// Splitter over `STANDARD_SPLIT`
pub fn standard_splitter() -> Splitter {
    Splitter::new(STANDARD_SPLIT).expect("standard split is valid")
}

/// Splitter over an arbitrary, known-valid split
pub fn splitter_with(spending: u32, savings: u32, bills: u32, insurance: u32) -> Splitter {
    Splitter::new(SplitConfig::new(spending, savings, bills, insurance))
        .expect("test split must sum to 100")
}

/// Feeds every amount through `splitter` into a fresh tracker
///
/// Asserts per-call conservation along the way and returns the tracker with
/// the exact sum of the amounts.
pub fn run_sequence(splitter: &Splitter, amounts: &[i128]) -> (Tracker, i128) {
    let mut tracker = Tracker::new();
    let mut total_remitted = 0i128;

    for (i, &amount) in amounts.iter().enumerate() {
        let result = splitter
            .split(amount)
            .unwrap_or_else(|err| panic!("remittance {} ({amount}) rejected: {err}", i + 1));
        assert!(
            result.is_consistent(),
            "remittance {} allocations must sum to total: {result:?}",
            i + 1
        );
        tracker.allocate(&result);
        total_remitted += amount;
    }

    (tracker, total_remitted)
}
