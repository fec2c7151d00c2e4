//! Shared types for the receipt toolkit
//!
//! The bill model exchanged between the POS front end, the text formatter
//! and the printing front end.

pub mod error;
pub mod models;

// Re-exports
pub use error::{BillDataError, BillDataResult};
pub use models::{Bill, BillData, BillItem, DineIn, Restaurant, Totals};
pub use serde::{Deserialize, Serialize};
