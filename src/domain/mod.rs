/// Domain module containing the core record model and derived calculations
///
/// This module defines the DrinkLog record, its category labels, and the
/// pure streak derivations that the analytics layer builds on.

pub mod log;
pub mod streak;

// Re-export public types for easy access
pub use log::*;
pub use streak::*;

use thiserror::Error;

/// Errors that can occur during domain validation
///
/// These are raised at the write boundary, before a record reaches the
/// store. Stored data is never re-validated on load.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid category: {0}")]
    InvalidKind(String),

    #[error("Invalid breakdown: {0}")]
    InvalidBreakdown(String),

    #[error("Invalid note: {0}")]
    InvalidNote(String),
}
