//! Transaction table rows shared by the historical and simulated segments

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Round to whole cents (2 fractional digits)
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One row of the transaction table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub number: u32,
    pub starting_balance: f64,
    pub invested_capital: f64,
    pub profit: f64,
    pub profit_pct: f64,
    pub reinvestment_pct: f64,
    pub ending_balance: f64,
}

impl TransactionRow {
    /// Build a display row; every amount and percentage is rounded to cents
    pub fn rounded(
        number: u32,
        starting_balance: f64,
        invested_capital: f64,
        profit: f64,
        profit_pct: f64,
        reinvestment_pct: f64,
        ending_balance: f64,
    ) -> Self {
        Self {
            number,
            starting_balance: round_cents(starting_balance),
            invested_capital: round_cents(invested_capital),
            profit: round_cents(profit),
            profit_pct: round_cents(profit_pct),
            reinvestment_pct: round_cents(reinvestment_pct),
            ending_balance: round_cents(ending_balance),
        }
    }
}

/// CSV layout of an output row
#[derive(Debug, Serialize)]
struct CsvRecord {
    #[serde(rename = "Number")]
    number: u32,
    #[serde(rename = "StartingBalance")]
    starting_balance: f64,
    #[serde(rename = "InvestedCapital")]
    invested_capital: f64,
    #[serde(rename = "Profit")]
    profit: f64,
    #[serde(rename = "ProfitPct")]
    profit_pct: f64,
    #[serde(rename = "ReinvestmentPct")]
    reinvestment_pct: f64,
    #[serde(rename = "EndingBalance")]
    ending_balance: f64,
}

impl From<&TransactionRow> for CsvRecord {
    fn from(row: &TransactionRow) -> Self {
        Self {
            number: row.number,
            starting_balance: row.starting_balance,
            invested_capital: row.invested_capital,
            profit: row.profit,
            profit_pct: row.profit_pct,
            reinvestment_pct: row.reinvestment_pct,
            ending_balance: row.ending_balance,
        }
    }
}

/// Write the table as CSV with a header row
pub fn write_rows_csv<W: Write>(writer: W, rows: &[TransactionRow]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(CsvRecord::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}
