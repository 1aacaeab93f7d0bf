//! Leverage Projection CLI
//!
//! Reduces a trade history and projects it forward to a target balance

use anyhow::{bail, Context, Result};
use clap::Parser;
use leverage_projection::history::{load_history, load_request};
use leverage_projection::projection::write_rows_csv;
use leverage_projection::{ProjectionReport, ScenarioRunner, SimulationRequest};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leverage_projection", version, about = "Project a leveraged trading account toward a target balance")]
struct Cli {
    /// Trade history CSV (Number,StartingBalance,InvestedCapital,Profit)
    #[arg(long, conflicts_with = "request")]
    history: Option<PathBuf>,

    /// JSON request with transactions and target_amount
    #[arg(long)]
    request: Option<PathBuf>,

    /// Target account balance (overrides the request's target_amount)
    #[arg(long)]
    target: Option<f64>,

    /// Maximum number of simulated transactions
    #[arg(long)]
    max_transactions: Option<u32>,

    /// Write the full transaction table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut request = match (&cli.request, &cli.history) {
        (Some(path), _) => load_request(path)
            .with_context(|| format!("failed to load request {}", path.display()))?,
        (None, Some(path)) => {
            let records = load_history(path)
                .with_context(|| format!("failed to load history {}", path.display()))?;
            let target = cli.target.context("--target is required with --history")?;
            SimulationRequest::new(records, target)
        }
        (None, None) => bail!("either --history or --request must be given"),
    };

    if let Some(target) = cli.target {
        request.target_amount = target;
    }
    if let Some(max_transactions) = cli.max_transactions {
        request.max_transactions = Some(max_transactions);
    }
    request.validate()?;

    let report = ScenarioRunner::new()
        .run_request(&request)
        .context("projection failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        write_rows_csv(file, &report.transactions)?;
        println!("\nFull table written to: {}", path.display());
    }

    Ok(())
}

fn print_report(report: &ProjectionReport) {
    println!("Average profit:        {:.2}%", report.average_profit_pct);
    println!("Average reinvestment:  {:.2}%", report.average_reinvestment_pct);
    println!("Target balance:        {:.2}", report.target_balance);
    println!();

    println!("{:>6} {:>14} {:>14} {:>12} {:>9} {:>9} {:>14}",
        "No.", "Start", "Invested", "Profit", "Profit%", "Reinv%", "End");
    println!("{}", "-".repeat(84));

    for (i, row) in report.transactions.iter().enumerate() {
        if i == report.historical_count && i > 0 {
            println!("{}", "- ".repeat(42));
        }
        println!("{:>6} {:>14.2} {:>14.2} {:>12.2} {:>9.2} {:>9.2} {:>14.2}",
            row.number,
            row.starting_balance,
            row.invested_capital,
            row.profit,
            row.profit_pct,
            row.reinvestment_pct,
            row.ending_balance,
        );
    }

    let summary = report.summary();
    println!("\nSummary:");
    println!("  Historical transactions: {}", summary.historical_transactions);
    println!("  Simulated transactions:  {}", summary.simulated_transactions);
    println!("  Historical profit:       {:.2}", summary.historical_profit);
    println!("  Simulated profit:        {:.2}", summary.simulated_profit);
    println!("  Final balance:           {:.2}", summary.final_balance);
    println!("\n{}", report.message);
}
