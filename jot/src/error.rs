//! Error types for the jot interpreter.

use thiserror::Error;

/// A failure raised while evaluating statements.
///
/// The `name` is a short classification (`NameError`, `TypeError`,
/// `ArithmeticError`, `ValueError`, `LoadError`) that callers surface
/// alongside the message.
#[derive(Debug, Clone, Error)]
#[error("{name}: {message}")]
pub struct EvalError {
    pub name: &'static str,
    pub message: String,
    /// Source line the failing expression starts on (1-based).
    pub line: usize,
}

impl EvalError {
    pub(crate) fn new(name: &'static str, message: impl Into<String>, line: usize) -> Self {
        Self {
            name,
            message: message.into(),
            line,
        }
    }
}

/// Errors surfaced while turning source text into statements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JotError {
    /// The input stopped mid-construct and could become valid with more
    /// text. Nothing has been evaluated when this is returned.
    #[error("unexpected end of input")]
    Incomplete,

    /// The input is malformed in a way more text cannot repair.
    #[error("{message} at line {line}")]
    Parse { message: String, line: usize },
}

impl JotError {
    pub(crate) fn parse(message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }
}
