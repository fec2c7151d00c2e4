//! Data models
//!
//! Field names follow the camelCase JSON emitted by the POS front end.

pub mod bill;

// Re-exports
pub use bill::*;
