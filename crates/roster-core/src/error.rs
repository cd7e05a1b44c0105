//! Roster error types.
//!
//! Every store operation is all-or-nothing: when one of these errors is
//! returned the roster is left exactly as it was before the call.

use thiserror::Error;

/// A single field failed its declared constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field was empty or absent.
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// The field parsed but lies outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// The field was expected to be an integer.
    #[error("{field} must be a whole number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

/// Errors returned by roster store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registration attempted with an id that is already on the roster.
    #[error("student ID must be unique: {0} is already registered")]
    DuplicateId(String),

    /// No student with this id exists.
    #[error("student not found: {0}")]
    NotFound(String),
}
