//! Load transaction histories from CSV and simulation requests from JSON

use super::{SimulationRequest, TransactionRecord};
use crate::error::LoadResult;
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row matching the history file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Number")]
    number: u32,
    #[serde(rename = "StartingBalance")]
    starting_balance: f64,
    #[serde(rename = "InvestedCapital")]
    invested_capital: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

impl From<CsvRow> for TransactionRecord {
    fn from(row: CsvRow) -> Self {
        TransactionRecord::new(row.number, row.starting_balance, row.invested_capital, row.profit)
    }
}

/// Load a transaction history from a CSV file
pub fn load_history<P: AsRef<Path>>(path: P) -> LoadResult<Vec<TransactionRecord>> {
    let file = File::open(path)?;
    load_history_from_reader(file)
}

/// Load a transaction history from any reader (e.g., string buffer, stdin)
pub fn load_history_from_reader<R: Read>(reader: R) -> LoadResult<Vec<TransactionRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into());
    }

    log::debug!("loaded {} historical transactions", records.len());
    Ok(records)
}

/// Load a simulation request from a JSON file
pub fn load_request<P: AsRef<Path>>(path: P) -> LoadResult<SimulationRequest> {
    let file = File::open(path)?;
    load_request_from_reader(BufReader::new(file))
}

/// Load a simulation request from any reader
pub fn load_request_from_reader<R: Read>(reader: R) -> LoadResult<SimulationRequest> {
    let request: SimulationRequest = serde_json::from_reader(reader)?;
    request.validate()?;
    Ok(request)
}
