//! Scenario runner: reduce a history, project it forward, and assemble the report
//!
//! Holds the projection configuration once, then runs any number of histories or
//! targets against it. Independent requests are projected in parallel.

use crate::error::DomainError;
use crate::history::{dedup_by_number, SimulationRequest, TransactionRecord};
use crate::projection::{HistorySummary, ProjectionConfig, ProjectionEngine, Simulation, TransactionRow};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How the forward simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TerminationStatus {
    /// Target met; `transaction_count` counts historical and simulated rows
    TargetReached { transaction_count: usize },
    /// Transaction cap hit before the target
    BoundExhausted { max_transactions: u32 },
}

/// Combined historical and simulated projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub average_profit_pct: f64,
    pub average_reinvestment_pct: f64,
    pub target_balance: f64,

    /// Number of leading rows taken from the history
    pub historical_count: usize,

    /// Historical rows followed by simulated rows
    pub transactions: Vec<TransactionRow>,

    pub status: TerminationStatus,

    /// Human-readable outcome
    pub message: String,
}

impl ProjectionReport {
    fn assemble(
        history: &HistorySummary,
        simulation: Simulation,
        target_balance: f64,
        max_transactions: u32,
    ) -> Self {
        let historical_count = history.transaction_count();
        let reached = simulation.is_reached();

        let mut transactions = Vec::with_capacity(historical_count + simulation.len());
        transactions.extend_from_slice(&history.rows);
        transactions.extend(simulation.into_rows());

        let (status, message) = if reached {
            let transaction_count = transactions.len();
            (
                TerminationStatus::TargetReached { transaction_count },
                format!(
                    "Target amount {} reached after {} transactions.",
                    target_balance, transaction_count
                ),
            )
        } else {
            (
                TerminationStatus::BoundExhausted { max_transactions },
                format!(
                    "Exceeded the maximum number of transactions ({}) for a return of {:.2}%. \
                     Increase the return or lower the target amount.",
                    max_transactions, history.average_profit_pct
                ),
            )
        };

        Self {
            average_profit_pct: history.average_profit_pct,
            average_reinvestment_pct: history.average_reinvestment_pct,
            target_balance,
            historical_count,
            transactions,
            status,
            message,
        }
    }

    pub fn is_target_reached(&self) -> bool {
        matches!(self.status, TerminationStatus::TargetReached { .. })
    }

    pub fn historical_rows(&self) -> &[TransactionRow] {
        &self.transactions[..self.historical_count]
    }

    pub fn simulated_rows(&self) -> &[TransactionRow] {
        &self.transactions[self.historical_count..]
    }

    /// Get summary statistics
    pub fn summary(&self) -> ReportSummary {
        let historical_profit: f64 = self.historical_rows().iter().map(|r| r.profit).sum();
        let simulated_profit: f64 = self.simulated_rows().iter().map(|r| r.profit).sum();
        let final_balance = self.transactions.last().map(|r| r.ending_balance).unwrap_or(0.0);

        ReportSummary {
            total_transactions: self.transactions.len(),
            historical_transactions: self.historical_count,
            simulated_transactions: self.transactions.len() - self.historical_count,
            historical_profit,
            simulated_profit,
            final_balance,
            target_reached: self.is_target_reached(),
        }
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_transactions: usize,
    pub historical_transactions: usize,
    pub simulated_transactions: usize,
    pub historical_profit: f64,
    pub simulated_profit: f64,
    pub final_balance: f64,
    pub target_reached: bool,
}

/// Pre-configured runner for projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let report = runner.run(&records, 5_000.0)?;
/// println!("{}", report.message);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project one history toward `target_balance`.
    ///
    /// Records are keyed by transaction number on every entry point; see
    /// [`dedup_by_number`].
    pub fn run(
        &self,
        records: &[TransactionRecord],
        target_balance: f64,
    ) -> Result<ProjectionReport, DomainError> {
        run_with(&self.config, records, target_balance)
    }

    /// Project a request; a cap set on the request replaces the runner's
    pub fn run_request(&self, request: &SimulationRequest) -> Result<ProjectionReport, DomainError> {
        let config = ProjectionConfig {
            max_transactions: request
                .max_transactions
                .unwrap_or(self.config.max_transactions),
        };
        run_with(&config, &request.transactions, request.target_amount)
    }

    /// Project independent requests in parallel, preserving input order
    pub fn run_batch(
        &self,
        requests: &[SimulationRequest],
    ) -> Vec<Result<ProjectionReport, DomainError>> {
        requests.par_iter().map(|request| self.run_request(request)).collect()
    }

    /// Project one history toward several targets, reducing it only once
    pub fn run_targets(
        &self,
        records: &[TransactionRecord],
        targets: &[f64],
    ) -> Result<Vec<ProjectionReport>, DomainError> {
        let engine = ProjectionEngine::new(self.config.clone());
        let history = reduce_keyed(&engine, records)?;

        Ok(targets
            .par_iter()
            .map(|&target| {
                let simulation = engine.project(&history, target);
                ProjectionReport::assemble(&history, simulation, target, self.config.max_transactions)
            })
            .collect())
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.config
    }
}

fn run_with(
    config: &ProjectionConfig,
    records: &[TransactionRecord],
    target_balance: f64,
) -> Result<ProjectionReport, DomainError> {
    let engine = ProjectionEngine::new(config.clone());
    let history = reduce_keyed(&engine, records)?;
    let simulation = engine.project(&history, target_balance);
    Ok(ProjectionReport::assemble(&history, simulation, target_balance, config.max_transactions))
}

/// Reduce with one record per transaction number
fn reduce_keyed(
    engine: &ProjectionEngine,
    records: &[TransactionRecord],
) -> Result<HistorySummary, DomainError> {
    engine.reduce(&dedup_by_number(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_trade() -> Vec<TransactionRecord> {
        vec![TransactionRecord::new(1, 1000.0, 100.0, 20.0)]
    }

    #[test]
    fn test_run_concatenates_history_and_simulation() {
        let runner = ScenarioRunner::new();
        let report = runner.run(&single_trade(), 1200.0).unwrap();

        assert!(report.is_target_reached());
        assert_eq!(report.historical_count, 1);
        assert_eq!(report.transactions.len(), 10);
        assert_eq!(report.status, TerminationStatus::TargetReached { transaction_count: 10 });
        assert_eq!(report.message, "Target amount 1200 reached after 10 transactions.");

        let numbers: Vec<u32> = report.transactions.iter().map(|r| r.number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u32>>());
        assert_relative_eq!(report.average_profit_pct, 20.0);
        assert_relative_eq!(report.average_reinvestment_pct, 10.0);
    }

    #[test]
    fn test_exhausted_report() {
        let runner = ScenarioRunner::with_config(ProjectionConfig { max_transactions: 30 });
        let records = vec![TransactionRecord::new(1, 1000.0, 100.0, 0.5)];
        let report = runner.run(&records, 1_000_000.0).unwrap();

        assert!(!report.is_target_reached());
        assert_eq!(report.status, TerminationStatus::BoundExhausted { max_transactions: 30 });
        assert_eq!(report.simulated_rows().len(), 30);
        assert!(report.message.starts_with("Exceeded the maximum number of transactions (30)"));
        assert!(report.message.contains("0.50%"));
    }

    #[test]
    fn test_run_request_dedups_and_uses_request_cap() {
        let mut request = SimulationRequest::new(
            vec![
                TransactionRecord::new(1, 1000.0, 100.0, 0.0),
                TransactionRecord::new(1, 1000.0, 100.0, 20.0),
            ],
            1_000_000.0,
        );
        request.max_transactions = Some(5);

        let report = ScenarioRunner::new().run_request(&request).unwrap();
        assert_eq!(report.historical_count, 1);
        assert_eq!(report.historical_rows()[0].profit, 20.0);
        assert_eq!(report.simulated_rows().len(), 5);
    }

    #[test]
    fn test_run_batch_applies_runner_cap() {
        let runner = ScenarioRunner::with_config(ProjectionConfig { max_transactions: 5 });
        let records = vec![TransactionRecord::new(1, 1000.0, 100.0, 0.5)];

        let mut capped = SimulationRequest::new(records.clone(), 1e9);
        capped.max_transactions = Some(8);
        let requests = vec![SimulationRequest::new(records, 1e9), capped];

        let results = runner.run_batch(&requests);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.simulated_rows().len(), 5);
        assert_eq!(first.status, TerminationStatus::BoundExhausted { max_transactions: 5 });

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.simulated_rows().len(), 8);
        assert_eq!(second.status, TerminationStatus::BoundExhausted { max_transactions: 8 });
    }

    #[test]
    fn test_duplicate_numbers_merged_on_every_entry_point() {
        let records = vec![
            TransactionRecord::new(1, 1000.0, 100.0, 20.0),
            TransactionRecord::new(1, 1000.0, 200.0, 40.0),
        ];
        let runner = ScenarioRunner::new();

        let from_run = runner.run(&records, 1200.0).unwrap();
        let from_request = runner
            .run_request(&SimulationRequest::new(records.clone(), 1200.0))
            .unwrap();
        let from_targets = runner.run_targets(&records, &[1200.0]).unwrap();

        for report in [&from_run, &from_request, &from_targets[0]] {
            assert_eq!(report.historical_count, 1);
            assert_eq!(report.historical_rows()[0].invested_capital, 200.0);
            assert_relative_eq!(report.average_reinvestment_pct, 20.0);
            assert_relative_eq!(report.average_profit_pct, 20.0);
        }
        assert_eq!(from_run.transactions, from_targets[0].transactions);
    }

    #[test]
    fn test_run_propagates_domain_error() {
        let records = vec![TransactionRecord::new(9, 1000.0, 0.0, 20.0)];
        let err = ScenarioRunner::new().run(&records, 1200.0).unwrap_err();
        assert_eq!(err, DomainError::ZeroInvestedCapital { index: 0, number: 9 });
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let requests = vec![
            SimulationRequest::new(single_trade(), 1200.0),
            SimulationRequest::new(Vec::new(), 1200.0),
            SimulationRequest::new(single_trade(), 2000.0),
        ];

        let results = ScenarioRunner::new().run_batch(&requests);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().target_balance, 1200.0);
        assert_eq!(results[1].as_ref().unwrap_err(), &DomainError::EmptyHistory);
        assert_eq!(results[2].as_ref().unwrap().target_balance, 2000.0);
    }

    #[test]
    fn test_run_targets_higher_target_needs_more_transactions() {
        let reports = ScenarioRunner::new()
            .run_targets(&single_trade(), &[1100.0, 1200.0, 1500.0])
            .unwrap();

        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.is_target_reached()));
        assert!(reports[0].transactions.len() < reports[1].transactions.len());
        assert!(reports[1].transactions.len() < reports[2].transactions.len());
    }

    #[test]
    fn test_summary() {
        let report = ScenarioRunner::new().run(&single_trade(), 1200.0).unwrap();
        let summary = report.summary();

        assert_eq!(summary.total_transactions, 10);
        assert_eq!(summary.historical_transactions, 1);
        assert_eq!(summary.simulated_transactions, 9);
        assert_relative_eq!(summary.historical_profit, 20.0);
        assert!(summary.final_balance >= 1200.0);
        assert!(summary.target_reached);
    }

    #[test]
    fn test_report_serializes_status_tag() {
        let report = ScenarioRunner::new().run(&single_trade(), 1200.0).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"]["status"], "target_reached");
        assert_eq!(json["status"]["transaction_count"], 10);
        assert_eq!(json["transactions"].as_array().unwrap().len(), 10);
    }
}
