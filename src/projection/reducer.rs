//! Reduce a transaction history into a normalized table and average rates

use super::rows::TransactionRow;
use super::state::ReductionState;
use crate::error::DomainError;
use crate::history::TransactionRecord;

/// Result of reducing a transaction history
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    /// One row per input record, in input order
    pub rows: Vec<TransactionRow>,

    /// Unweighted mean of the per-transaction profit percentages
    pub average_profit_pct: f64,

    /// Unweighted mean of the per-transaction reinvestment percentages
    pub average_reinvestment_pct: f64,

    /// Unrounded account balance after the last record
    pub ending_balance: f64,
}

impl HistorySummary {
    pub fn transaction_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reduce historical records in order.
///
/// Fails with a [`DomainError`] naming the offending record instead of dividing
/// by a zero balance or zero invested capital.
pub fn reduce_history(records: &[TransactionRecord]) -> Result<HistorySummary, DomainError> {
    if records.is_empty() {
        return Err(DomainError::EmptyHistory);
    }

    let state = records
        .iter()
        .enumerate()
        .try_fold(ReductionState::with_capacity(records.len()), |state, (index, record)| {
            fold_record(state, index, record)
        })?;

    let ending_balance = state.account_balance.ok_or(DomainError::EmptyHistory)?;
    let count = state.count() as f64;
    let summary = HistorySummary {
        average_profit_pct: state.profit_pct_sum / count,
        average_reinvestment_pct: state.reinvestment_pct_sum / count,
        ending_balance,
        rows: state.rows,
    };

    log::debug!(
        "reduced {} transactions: avg profit {:.4}%, avg reinvestment {:.4}%, ending balance {:.2}",
        summary.transaction_count(),
        summary.average_profit_pct,
        summary.average_reinvestment_pct,
        summary.ending_balance,
    );

    Ok(summary)
}

/// Fold one record into the running state
fn fold_record(
    mut state: ReductionState,
    index: usize,
    record: &TransactionRecord,
) -> Result<ReductionState, DomainError> {
    check_finite(index, record, state.account_balance.is_none())?;

    let balance = state.opening_balance(record.starting_balance);
    if balance == 0.0 {
        return Err(DomainError::ZeroBalance { index, number: record.number });
    }
    if record.invested_capital == 0.0 {
        return Err(DomainError::ZeroInvestedCapital { index, number: record.number });
    }

    let reinvestment_pct = record.invested_capital / balance * 100.0;
    let profit_pct = record.profit / record.invested_capital * 100.0;
    let ending_balance = balance + record.profit;

    state.rows.push(TransactionRow::rounded(
        record.number,
        balance,
        record.invested_capital,
        record.profit,
        profit_pct,
        reinvestment_pct,
        ending_balance,
    ));
    state.account_balance = Some(ending_balance);
    state.previous_profit = record.profit;
    state.profit_pct_sum += profit_pct;
    state.reinvestment_pct_sum += reinvestment_pct;

    Ok(state)
}

fn check_finite(index: usize, record: &TransactionRecord, first: bool) -> Result<(), DomainError> {
    let fields = [
        ("starting balance", record.starting_balance, first),
        ("invested capital", record.invested_capital, true),
        ("profit", record.profit, true),
    ];

    match fields.iter().find(|(_, value, used)| *used && !value.is_finite()) {
        Some((field, _, _)) => Err(DomainError::NonFiniteValue {
            index,
            number: record.number,
            field: *field,
        }),
        None => Ok(()),
    }
}
