//! Session error types.

use thiserror::Error;

use tether_core::InterpreterError;

/// Session errors.
///
/// Only genuine failures travel this way (directory creation, interpreter
/// startup, binding rejection). Evaluation problems never do; they are the
/// `Error` variant of [`crate::ExecuteResult`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Working directory creation failure.
    #[error("working directory: {message}")]
    WorkDir { message: String },

    /// Interpreter-reported failure.
    #[error("interpreter: {0}")]
    Interpreter(#[from] InterpreterError),
}

impl SessionError {
    pub fn work_dir(message: impl Into<String>) -> Self {
        Self::WorkDir {
            message: message.into(),
        }
    }
}

/// Table conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The target value is not a sequence of rows.
    #[error("table expects a sequence of rows, got {type_name}")]
    NotASequence { type_name: String },

    /// A row is not itself a sequence.
    #[error("row {index} is not a sequence, got {type_name}")]
    RowNotASequence { index: usize, type_name: String },

    /// A row's cell count differs from the first row's.
    #[error("row {index} has {found} cells, expected {expected}")]
    RaggedRow {
        index: usize,
        expected: usize,
        found: usize,
    },
}

impl TableError {
    pub fn not_a_sequence(type_name: impl Into<String>) -> Self {
        Self::NotASequence {
            type_name: type_name.into(),
        }
    }

    pub fn row_not_a_sequence(index: usize, type_name: impl Into<String>) -> Self {
        Self::RowNotASequence {
            index,
            type_name: type_name.into(),
        }
    }

    pub fn ragged_row(index: usize, expected: usize, found: usize) -> Self {
        Self::RaggedRow {
            index,
            expected,
            found,
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
