//! Project one trade history against a range of target balances
//!
//! Usage: cargo run --bin target_sweep -- --history data/sample_history.csv --from 1500 --to 5000 --step 500

use anyhow::{ensure, Context, Result};
use clap::Parser;
use leverage_projection::history::load_history;
use leverage_projection::{ProjectionConfig, ScenarioRunner, TerminationStatus};
use std::path::PathBuf;
use std::time::Instant;

/// Upper bound on the number of targets in one sweep
const MAX_TARGETS: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "target_sweep", about = "Transactions needed to reach each of a range of targets")]
struct Args {
    /// Trade history CSV
    #[arg(long, default_value = "data/sample_history.csv")]
    history: PathBuf,

    /// First target balance
    #[arg(long)]
    from: f64,

    /// Last target balance (inclusive)
    #[arg(long)]
    to: f64,

    /// Distance between targets
    #[arg(long, default_value_t = 1000.0)]
    step: f64,

    /// Maximum number of simulated transactions per target
    #[arg(long, default_value_t = leverage_projection::projection::DEFAULT_MAX_TRANSACTIONS)]
    max_transactions: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let targets = target_grid(args.from, args.to, args.step)?;
    let records = load_history(&args.history)
        .with_context(|| format!("failed to load history {}", args.history.display()))?;

    let start = Instant::now();
    let runner = ScenarioRunner::with_config(ProjectionConfig {
        max_transactions: args.max_transactions,
    });
    let reports = runner.run_targets(&records, &targets).context("projection failed")?;

    if let Some(first) = reports.first() {
        println!("Average profit:       {:.2}%", first.average_profit_pct);
        println!("Average reinvestment: {:.2}%", first.average_reinvestment_pct);
        println!("Historical trades:    {}", first.historical_count);
        println!();
    }

    println!("{:>14} {:>14} {:>14}", "Target", "Transactions", "Final");
    println!("{}", "-".repeat(44));
    for report in &reports {
        let summary = report.summary();
        match report.status {
            TerminationStatus::TargetReached { transaction_count } => {
                println!("{:>14.2} {:>14} {:>14.2}",
                    report.target_balance, transaction_count, summary.final_balance);
            }
            TerminationStatus::BoundExhausted { max_transactions } => {
                println!("{:>14.2} {:>14} {:>14.2}",
                    report.target_balance, format!(">{}", max_transactions), summary.final_balance);
            }
        }
    }

    println!("\n{} targets projected in {:?}", reports.len(), start.elapsed());
    Ok(())
}

/// Evenly spaced targets from `from` to `to` inclusive
fn target_grid(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    ensure!(from.is_finite() && to.is_finite(), "--from and --to must be finite");
    ensure!(step.is_finite() && step > 0.0, "--step must be positive");
    ensure!(from <= to, "--from must not exceed --to");

    let steps = ((to - from) / step).floor();
    ensure!(
        steps < MAX_TARGETS as f64,
        "sweep would produce more than {} targets",
        MAX_TARGETS
    );

    let steps = steps as usize;
    Ok((0..=steps).map(|i| from + step * i as f64).collect())
}
