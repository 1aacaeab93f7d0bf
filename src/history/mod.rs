//! Historical transaction records and file loading

mod data;
pub mod loader;

pub use data::{dedup_by_number, SimulationRequest, TransactionRecord};
pub use loader::{load_history, load_history_from_reader, load_request, load_request_from_reader};
