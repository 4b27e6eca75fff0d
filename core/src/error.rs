//! Common error types for interpreter implementations.

use thiserror::Error;

/// Errors raised by an interpreter outside of code evaluation.
///
/// Evaluation problems are never errors at this boundary; they are carried
/// as the `Interpretation::Error` outcome instead.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The interpreter could not be started.
    #[error("interpreter failed to start: {message}")]
    Start { message: String },

    /// A name/value binding was rejected.
    #[error("binding failed: {message}")]
    Binding { message: String },

    /// Classpath entries could not be applied.
    #[error("classpath extension failed: {message}")]
    Classpath { message: String },

    /// The completion subsystem failed internally.
    #[error("completion failed: {message}")]
    Completion { message: String },
}

impl InterpreterError {
    pub fn start(message: impl Into<String>) -> Self {
        Self::Start {
            message: message.into(),
        }
    }

    pub fn binding(message: impl Into<String>) -> Self {
        Self::Binding {
            message: message.into(),
        }
    }

    pub fn classpath(message: impl Into<String>) -> Self {
        Self::Classpath {
            message: message.into(),
        }
    }

    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion {
            message: message.into(),
        }
    }
}
