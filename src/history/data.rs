//! Historical transaction records and the simulation request that carries them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{LoadError, LoadResult};

/// A settled trade supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Caller-assigned transaction number (need not be contiguous)
    #[serde(alias = "transaction_number")]
    pub number: u32,

    /// Account balance before the trade. Only the first record's value is used.
    pub starting_balance: f64,

    /// Capital committed to the trade
    pub invested_capital: f64,

    /// Realised profit (negative for a loss)
    pub profit: f64,
}

impl TransactionRecord {
    pub fn new(number: u32, starting_balance: f64, invested_capital: f64, profit: f64) -> Self {
        Self {
            number,
            starting_balance,
            invested_capital,
            profit,
        }
    }
}

/// A full projection request: the trade history plus the balance to aim for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub transactions: Vec<TransactionRecord>,

    #[serde(alias = "target_balance")]
    pub target_amount: f64,

    /// Cap on simulated transactions; the runner's configured cap applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_transactions: Option<u32>,
}

impl SimulationRequest {
    pub fn new(transactions: Vec<TransactionRecord>, target_amount: f64) -> Self {
        Self {
            transactions,
            target_amount,
            max_transactions: None,
        }
    }

    /// Reject requests the projection cannot interpret
    pub fn validate(&self) -> LoadResult<()> {
        if !self.target_amount.is_finite() {
            return Err(LoadError::InvalidRequest(format!(
                "target amount must be finite, got {}",
                self.target_amount
            )));
        }
        Ok(())
    }
}

/// Collapse records sharing a transaction number.
///
/// A repeated number overwrites the values of the earlier record but keeps the
/// earlier record's position in the sequence.
pub fn dedup_by_number(records: &[TransactionRecord]) -> Vec<TransactionRecord> {
    let mut positions: HashMap<u32, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<TransactionRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.number) {
            Some(&position) => unique[position] = *record,
            None => {
                positions.insert(record.number, unique.len());
                unique.push(*record);
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_position_with_last_values() {
        let records = vec![
            TransactionRecord::new(1, 1000.0, 100.0, 20.0),
            TransactionRecord::new(2, 1020.0, 50.0, -5.0),
            TransactionRecord::new(1, 1000.0, 200.0, 40.0),
        ];

        let unique = dedup_by_number(&records);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].number, 1);
        assert_eq!(unique[0].invested_capital, 200.0);
        assert_eq!(unique[0].profit, 40.0);
        assert_eq!(unique[1].number, 2);
    }

    #[test]
    fn test_dedup_many_repeats() {
        let records: Vec<TransactionRecord> = (0..3000)
            .map(|i| TransactionRecord::new(i % 3, 1000.0, 100.0, i as f64))
            .collect();

        let unique = dedup_by_number(&records);
        let numbers: Vec<u32> = unique.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(unique[0].profit, 2997.0);
        assert_eq!(unique[2].profit, 2999.0);
    }

    #[test]
    fn test_request_leaves_max_transactions_unset() {
        let json = r#"{
            "transactions": [
                {"transaction_number": 1, "starting_balance": 1000.0, "invested_capital": 100.0, "profit": 20.0}
            ],
            "target_amount": 1200.0
        }"#;

        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.max_transactions, None);
        assert_eq!(request.transactions[0].number, 1);
        assert_eq!(request.target_amount, 1200.0);
    }

    #[test]
    fn test_request_accepts_field_aliases() {
        let json = r#"{
            "transactions": [
                {"number": 7, "starting_balance": 500.0, "invested_capital": 50.0, "profit": 5.0}
            ],
            "target_balance": 900.0,
            "max_transactions": 12
        }"#;

        let request: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.transactions[0].number, 7);
        assert_eq!(request.target_amount, 900.0);
        assert_eq!(request.max_transactions, Some(12));
    }

    #[test]
    fn test_validate_rejects_non_finite_target() {
        let records = vec![TransactionRecord::new(1, 1000.0, 100.0, 20.0)];

        for target in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = SimulationRequest::new(records.clone(), target).validate().unwrap_err();
            assert!(matches!(err, LoadError::InvalidRequest(_)));
        }
        assert!(SimulationRequest::new(records, 1200.0).validate().is_ok());
    }
}
