//! jot, a small embedded expression language with interactive-shell
//! semantics.
//!
//! jot stands behind the [`tether_core::Interpreter`] seam. It evaluates
//! `val` bindings and expressions, auto-names expression results
//! (`res0`, `res1`, ...), renders each non-unit result as
//! `val <name>: <Type> = <value>` into the session's output sink, and
//! classifies partial input as incomplete instead of failing it, so a
//! driver can accumulate lines until a statement is whole.

mod ast;
mod error;
mod eval;
mod interpreter;
mod lexer;
mod parser;

pub use error::{EvalError, JotError};
pub use interpreter::JotInterpreter;
