//! Forward simulation: compound the average rates until the target balance

use super::reducer::{reduce_history, HistorySummary};
use super::rows::TransactionRow;
use super::state::{SimulationPhase, SimulationState};
use crate::error::DomainError;
use crate::history::TransactionRecord;

/// Default cap on simulated transactions
pub const DEFAULT_MAX_TRANSACTIONS: u32 = 1000;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Maximum number of simulated transactions before giving up on the target
    pub max_transactions: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_transactions: DEFAULT_MAX_TRANSACTIONS,
        }
    }
}

/// Outcome of a forward simulation
#[derive(Debug, Clone, PartialEq)]
pub enum Simulation {
    /// The last row's ending balance met the target
    Reached(Vec<TransactionRow>),
    /// The transaction cap was hit first; the rows stop short of the target
    Exhausted(Vec<TransactionRow>),
}

impl Simulation {
    pub fn rows(&self) -> &[TransactionRow] {
        match self {
            Simulation::Reached(rows) | Simulation::Exhausted(rows) => rows,
        }
    }

    pub fn into_rows(self) -> Vec<TransactionRow> {
        match self {
            Simulation::Reached(rows) | Simulation::Exhausted(rows) => rows,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Simulation::Reached(_))
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Simulate future transactions from `initial_balance`.
///
/// Numbering continues after `starting_number`. Each step reinvests
/// `average_reinvestment_pct` of the balance and earns `average_profit_pct` on it.
/// Stops as soon as the balance reaches `target_balance`, or after
/// `max_transactions` steps.
pub fn simulate(
    initial_balance: f64,
    average_profit_pct: f64,
    target_balance: f64,
    average_reinvestment_pct: f64,
    starting_number: u32,
    max_transactions: u32,
) -> Simulation {
    let mut state = SimulationState::new(initial_balance, starting_number);
    let mut rows = Vec::new();

    while let Some(row) = state.advance(
        average_profit_pct,
        average_reinvestment_pct,
        target_balance,
        max_transactions,
    ) {
        rows.push(row);
    }

    match state.phase {
        SimulationPhase::TargetReached => {
            log::info!(
                "target {:.2} reached after {} simulated transactions (balance {:.2})",
                target_balance,
                rows.len(),
                state.account_balance,
            );
            Simulation::Reached(rows)
        }
        SimulationPhase::BoundExhausted | SimulationPhase::Running => {
            log::warn!(
                "exceeded the maximum number of transactions ({}) for a return of {:.2}%; \
                 increase the return or lower the target amount",
                max_transactions,
                average_profit_pct,
            );
            Simulation::Exhausted(rows)
        }
    }
}

/// Projection engine holding the run configuration
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Reduce a transaction history
    pub fn reduce(&self, records: &[TransactionRecord]) -> Result<HistorySummary, DomainError> {
        reduce_history(records)
    }

    /// Simulate forward from a reduced history, continuing its numbering
    pub fn project(&self, history: &HistorySummary, target_balance: f64) -> Simulation {
        self.simulate(
            history.ending_balance,
            history.average_profit_pct,
            target_balance,
            history.average_reinvestment_pct,
            u32::try_from(history.transaction_count()).unwrap_or(u32::MAX),
        )
    }

    /// Simulate with the configured transaction cap
    pub fn simulate(
        &self,
        initial_balance: f64,
        average_profit_pct: f64,
        target_balance: f64,
        average_reinvestment_pct: f64,
        starting_number: u32,
    ) -> Simulation {
        simulate(
            initial_balance,
            average_profit_pct,
            target_balance,
            average_reinvestment_pct,
            starting_number,
            self.config.max_transactions,
        )
    }
}
