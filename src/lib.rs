//! Leverage Projection - forward projection engine for leveraged trading accounts
//!
//! This library provides:
//! - Reduction of a trade history into per-transaction and average profit/reinvestment rates
//! - Compounding simulation of future transactions toward a target balance
//! - Combined reports with an explicit target-reached / bound-exhausted outcome
//! - CSV and JSON loading of histories and requests

pub mod error;
pub mod history;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{DomainError, LoadError};
pub use history::{SimulationRequest, TransactionRecord};
pub use projection::{ProjectionConfig, ProjectionEngine, Simulation, TransactionRow};
pub use scenario::{ProjectionReport, ScenarioRunner, TerminationStatus};
