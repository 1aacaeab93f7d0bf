//! History reduction and forward simulation

mod state;
mod engine;
mod reducer;
mod rows;

pub use state::{ReductionState, SimulationPhase, SimulationState};
pub use engine::{simulate, ProjectionConfig, ProjectionEngine, Simulation, DEFAULT_MAX_TRANSACTIONS};
pub use reducer::{reduce_history, HistorySummary};
pub use rows::{round_cents, write_rows_csv, TransactionRow};
