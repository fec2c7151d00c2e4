//! Error types for the shared crate

use thiserror::Error;

/// Errors raised while loading a bill
#[derive(Debug, Error)]
pub enum BillDataError {
    /// Input is not valid bill JSON
    #[error("Invalid bill JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An item carries a quantity of zero
    #[error("Item #{index} ({name}) has quantity 0")]
    ZeroQuantity { index: usize, name: String },
}

/// Result type for bill loading
pub type BillDataResult<T> = Result<T, BillDataError>;
