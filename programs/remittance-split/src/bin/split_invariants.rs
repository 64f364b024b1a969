//! CLI entrypoint for remittance split invariant verification.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use remittance_split::{
    constants::{DEFAULT_PERCENT_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE_DIVISOR},
    report,
    scenarios::{self, AggregateChecks},
    AllocationResult, Scenario, SplitConfig, SplitError, Splitter, SuiteReport, Tolerances,
};

/// Invariant tooling for the remittance splitter.
#[derive(Debug, Parser)]
#[command(name = "split-invariants")]
#[command(about = "Verify conservation invariants of the remittance split rule")]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the built-in verification scenarios.
    Run {
        /// Split percentages as spending,savings,bills,insurance.
        #[arg(long, env = "REMITTANCE_SPLIT", default_value = "40,30,20,10")]
        split: SplitConfig,
        /// Tracked-share tolerance as a divisor of total remitted.
        #[arg(long, env = "REMITTANCE_RELATIVE_TOLERANCE", default_value_t = DEFAULT_RELATIVE_TOLERANCE_DIVISOR)]
        relative_tolerance: i128,
        /// Per-bucket tolerance in whole percentage points.
        #[arg(long, env = "REMITTANCE_PERCENT_TOLERANCE", default_value_t = DEFAULT_PERCENT_TOLERANCE)]
        percent_tolerance: i128,
        /// Scenario to run (repeatable). Runs all scenarios when omitted.
        #[arg(long = "scenario")]
        scenarios: Vec<Scenario>,
        /// Extra amounts to run as a custom sequence (repeatable).
        #[arg(long = "amount", allow_negative_numbers = true)]
        amounts: Vec<i128>,
        /// Also check tracked share and bucket percentages on the custom sequence.
        #[arg(long, requires = "amounts")]
        check_shares: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Output file path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Split a single amount and print the allocation.
    Split {
        /// Amount in smallest currency units.
        #[arg(long, allow_negative_numbers = true)]
        amount: i128,
        /// Split percentages as spending,savings,bills,insurance.
        #[arg(long, env = "REMITTANCE_SPLIT", default_value = "40,30,20,10")]
        split: SplitConfig,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Run {
            split,
            relative_tolerance,
            percent_tolerance,
            scenarios,
            amounts,
            check_shares,
            format,
            output,
        } => {
            let tolerances = Tolerances {
                relative_divisor: relative_tolerance,
                percent_points: percent_tolerance,
            };
            let suite = run_suite(split, tolerances, scenarios, &amounts, check_shares)
                .context("invalid split configuration")?;

            let rendered = match format {
                Format::Text => report::render_suite(&suite),
                Format::Json => report::to_json(&suite)?,
            };
            write_output(output, &rendered)?;

            tracing::info!(
                passed = suite.passed,
                failed = suite.failed,
                errored = suite.errored,
                "verification complete"
            );
            Ok(exit_code(&suite))
        }
        Command::Split {
            amount,
            split,
            format,
        } => {
            let result = split_amount(split, amount)?;

            let rendered = match format {
                Format::Text => report::render_allocation(&split, &result),
                Format::Json => report::to_json(&result)?,
            };
            write_output(None, &rendered)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Runs the selected scenarios plus an optional custom sequence
///
/// With neither scenarios nor amounts selected, every built-in scenario runs.
fn run_suite(
    split: SplitConfig,
    tolerances: Tolerances,
    scenarios: Vec<Scenario>,
    amounts: &[i128],
    check_shares: bool,
) -> Result<SuiteReport, SplitError> {
    let splitter = Splitter::new(split)?;
    let selected = if scenarios.is_empty() && amounts.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        scenarios
    };

    let mut reports: Vec<_> = selected
        .iter()
        .map(|scenario| scenario.run(&splitter, &tolerances))
        .collect();
    if !amounts.is_empty() {
        let checks = AggregateChecks {
            tracked_share: check_shares,
            bucket_percentages: check_shares,
        };
        reports.push(scenarios::run_amounts(
            &splitter,
            "custom",
            amounts,
            checks,
            &tolerances,
        ));
    }
    Ok(scenarios::summarize(&splitter, reports, &tolerances))
}

fn exit_code(suite: &SuiteReport) -> ExitCode {
    if suite.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn split_amount(split: SplitConfig, amount: i128) -> Result<AllocationResult, SplitError> {
    let splitter = Splitter::new(split)?;
    Ok(splitter.split(amount)?)
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn write_output(path: Option<PathBuf>, rendered: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
