//! Console and JSON rendering for split results and suite runs.

use std::fmt::Write;

use serde::Serialize;

use crate::{
    invariants::realized_percents,
    scenarios::{Scenario, ScenarioOutcome, SuiteReport},
    state::{AllocationResult, Bucket, SplitConfig},
};

const RULE_WIDTH: usize = 60;

/// Pretty-printed JSON for any report value
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Formats an amount with `,` thousands separators
pub fn group_digits(amount: i128) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One split, one line per bucket
pub fn render_allocation(config: &SplitConfig, result: &AllocationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Remittance: {}", group_digits(result.total));
    for bucket in Bucket::ALL {
        let label = format!("{}:", capitalize(bucket.name()));
        let _ = writeln!(
            out,
            "{label:<11}{} ({}%)",
            group_digits(result.amount(bucket)),
            config.percent(bucket)
        );
    }
    let sum = result
        .sum_allocations()
        .map(group_digits)
        .unwrap_or_else(|| "overflow".to_string());
    let _ = writeln!(out, "{:<11}{sum}", "Sum:");
    out
}

/// Full suite summary: one block per scenario, then the tally
pub fn render_suite(report: &SuiteReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Remittance Split Invariant Verification");
    let _ = writeln!(
        out,
        "Split {} | tolerance 1/{} of remitted, ±{} pt per bucket",
        report.config, report.tolerances.relative_divisor, report.tolerances.percent_points
    );
    let _ = writeln!(out, "{rule}");

    for scenario in &report.scenarios {
        let marker = match scenario.outcome {
            ScenarioOutcome::Passed => "PASS",
            ScenarioOutcome::Failed(_) => "FAIL",
            ScenarioOutcome::Errored(_) => "ERROR",
        };
        let title = scenario
            .name
            .parse::<Scenario>()
            .map(Scenario::description)
            .unwrap_or("Custom amount sequence");
        let _ = writeln!(out, "[{marker}] {} - {title}", scenario.name);
        let _ = writeln!(
            out,
            "  calls: {}  remitted: {}  allocated: {}  tracked: {}",
            scenario.calls,
            group_digits(scenario.total_remitted),
            group_digits(scenario.totals.total_allocated()),
            group_digits(scenario.totals.tracked_total()),
        );
        if let Some(percents) = realized_percents(&scenario.totals, scenario.total_remitted) {
            let realized: Vec<String> = percents.iter().map(|p| format!("{p}%")).collect();
            let _ = writeln!(out, "  realized: {}", realized.join(" / "));
        }
        if let Some(detail) = scenario.outcome.detail() {
            let _ = writeln!(out, "  {detail}");
        }
    }

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Results: {} passed, {} failed, {} errored",
        report.passed, report.failed, report.errored
    );
    let _ = writeln!(out, "{rule}");
    if report.success() {
        let _ = writeln!(out, "All invariant checks PASSED");
    } else {
        let _ = writeln!(
            out,
            "{} scenario(s) did not pass - discrepancies detected",
            report.failed + report.errored
        );
    }
    out
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_digits_inserts_separators() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(100_000_000_000), "100,000,000,000");
        assert_eq!(group_digits(-1_234_567), "-1,234,567");
    }

    #[test]
    fn render_allocation_lists_every_bucket() {
        let config = SplitConfig::new(40, 30, 20, 10);
        let result = AllocationResult {
            total: 1_000,
            spending: 400,
            savings: 300,
            bills: 200,
            insurance: 100,
        };
        let text = render_allocation(&config, &result);
        assert!(text.contains("Total Remittance: 1,000"));
        assert!(text.contains("Spending:  400 (40%)"));
        assert!(text.contains("Insurance: 100 (10%)"));
        assert!(text.contains("Sum:       1,000"));
    }

    #[test]
    fn render_suite_reports_tally() {
        let splitter = crate::Splitter::new(SplitConfig::new(40, 30, 20, 10)).unwrap();
        let suite = crate::scenarios::run_suite(
            &splitter,
            &[Scenario::SingleRemittance],
            &crate::Tolerances::default(),
        );
        let text = render_suite(&suite);
        assert!(text.contains(
            "[PASS] single-remittance - Single remittance allocation consistency"
        ));
        assert!(text.contains("realized: 40% / 30% / 20% / 10%"));
        assert!(text.contains("Results: 1 passed, 0 failed, 0 errored"));
        assert!(text.contains("All invariant checks PASSED"));
    }
}
