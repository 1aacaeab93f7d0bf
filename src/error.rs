//! Error types for history reduction and input loading

use thiserror::Error;

/// Invalid transaction history, detected before any division takes place
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("transaction history is empty")]
    EmptyHistory,

    #[error("transaction {number} (index {index}) starts from a zero account balance")]
    ZeroBalance { index: usize, number: u32 },

    #[error("transaction {number} (index {index}) has zero invested capital")]
    ZeroInvestedCapital { index: usize, number: u32 },

    #[error("transaction {number} (index {index}) has a non-finite {field}")]
    NonFiniteValue {
        index: usize,
        number: u32,
        field: &'static str,
    },
}

impl DomainError {
    /// Position in the input sequence of the offending record, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            DomainError::EmptyHistory => None,
            DomainError::ZeroBalance { index, .. }
            | DomainError::ZeroInvestedCapital { index, .. }
            | DomainError::NonFiniteValue { index, .. } => Some(*index),
        }
    }
}

/// Failure while reading a history or request file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type LoadResult<T> = Result<T, LoadError>;
