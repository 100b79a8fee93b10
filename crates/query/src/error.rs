//! Error types for query building
//!
//! Only structural misuse is reported as an error. The tree is left
//! unmodified whenever one of these is returned.

use thiserror::Error;

use crate::query::types::Command;

/// Result type for fallible builder operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by clause-building calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The scope already has a table clause
    #[error("Table clause is already set for this scope")]
    TableAlreadySet,

    /// The requested clause does not fit the command already set
    #[error("Cannot apply {requested} to a {current} statement")]
    CommandConflict {
        current: Command,
        requested: &'static str,
    },

    /// A statement-level clause was called inside a bracketed condition group
    #[error("{0} is not allowed inside a condition group")]
    NotInStatement(&'static str),
}

impl QueryError {
    pub fn command_conflict(current: Command, requested: &'static str) -> Self {
        Self::CommandConflict { current, requested }
    }
}
