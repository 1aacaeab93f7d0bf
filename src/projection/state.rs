//! State carried through history reduction and forward simulation

use super::rows::TransactionRow;

/// Accumulator folded over the historical records
#[derive(Debug, Clone, Default)]
pub struct ReductionState {
    /// Running account balance; `None` until the first record is seen
    pub account_balance: Option<f64>,

    /// Profit of the previous record, folded into the balance one step late
    pub previous_profit: f64,

    /// Sum of unrounded profit percentages
    pub profit_pct_sum: f64,

    /// Sum of unrounded reinvestment percentages
    pub reinvestment_pct_sum: f64,

    /// Rows emitted so far
    pub rows: Vec<TransactionRow>,
}

impl ReductionState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Balance a record trades against.
    ///
    /// The first record supplies its own starting balance. Every later record
    /// starts from the running balance plus the previous record's profit.
    pub fn opening_balance(&self, starting_balance: f64) -> f64 {
        match self.account_balance {
            None => starting_balance,
            Some(balance) => balance + self.previous_profit,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Phase of a forward simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    Running,
    TargetReached,
    BoundExhausted,
}

/// Compounding state of a forward simulation
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub account_balance: f64,

    /// Number of the last emitted transaction
    pub transaction_number: u32,

    /// Simulated transactions emitted so far
    pub steps_taken: u32,

    pub phase: SimulationPhase,
}

impl SimulationState {
    pub fn new(initial_balance: f64, starting_number: u32) -> Self {
        Self {
            account_balance: initial_balance,
            transaction_number: starting_number,
            steps_taken: 0,
            phase: SimulationPhase::Running,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != SimulationPhase::Running
    }

    /// Apply one compounding step and return its row.
    ///
    /// Returns `None` once the run is terminal. A run still short of the target
    /// after `max_transactions` steps, or with no transaction number left to
    /// assign, moves to `BoundExhausted` on the next call.
    pub fn advance(
        &mut self,
        average_profit_pct: f64,
        average_reinvestment_pct: f64,
        target_balance: f64,
        max_transactions: u32,
    ) -> Option<TransactionRow> {
        if self.is_terminal() {
            return None;
        }
        let next_number = match self.transaction_number.checked_add(1) {
            Some(number) if self.steps_taken < max_transactions => number,
            _ => {
                self.phase = SimulationPhase::BoundExhausted;
                return None;
            }
        };

        self.transaction_number = next_number;
        self.steps_taken += 1;

        let invested_capital = self.account_balance * average_reinvestment_pct / 100.0;
        let return_amount = invested_capital * average_profit_pct / 100.0;
        self.account_balance += return_amount;

        let row = TransactionRow::rounded(
            self.transaction_number,
            self.account_balance - return_amount,
            invested_capital,
            return_amount,
            average_profit_pct,
            average_reinvestment_pct,
            self.account_balance,
        );

        if self.account_balance >= target_balance {
            self.phase = SimulationPhase::TargetReached;
        }

        Some(row)
    }
}
