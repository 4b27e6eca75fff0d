//! The interpreter capability seam.
//!
//! A session drives exactly one interpreter through this trait. The trait
//! mirrors the operations a read-eval-print capability exposes: start with
//! an output sink, interpret blocks of source, complete at a cursor, look
//! up and inject bound values, extend the classpath, close.
//! Everything about how code is parsed and evaluated stays behind it.

use std::path::{Path, PathBuf};

use crate::{InterpreterError, OutputSink, Value};

/// Outcome of interpreting one block of source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// The block was evaluated; output and renderings went to the sink.
    Success,
    /// Evaluation failed with a classified error.
    Error {
        /// Short classification name (`NameError`, `TypeError`, ...).
        name: String,
        /// Human-readable message.
        message: String,
        /// Ordered trace lines.
        trace: Vec<String>,
    },
    /// The block is a syntactically valid prefix of a larger construct.
    ///
    /// Implementations must guarantee that nothing was evaluated in this
    /// case: the caller will resubmit the combined text later, and a
    /// partial evaluation would then run twice.
    Incomplete,
}

impl Interpretation {
    /// Helper for building the error outcome.
    pub fn error(
        name: impl Into<String>,
        message: impl Into<String>,
        trace: Vec<String>,
    ) -> Self {
        Self::Error {
            name: name.into(),
            message: message.into(),
            trace,
        }
    }
}

/// An embedded read-eval-print capability.
///
/// Implementations are stateful and sequential: each interpreted statement
/// may change the environment seen by the next one. Callers serialize all
/// access; the trait takes `&mut self` throughout to make that explicit.
pub trait Interpreter {
    /// Start the interpreter.
    ///
    /// `sink` receives everything evaluated code prints plus the
    /// interpreter's own result renderings. `output_dir` is the session's
    /// private working directory for any files the interpreter emits or
    /// resolves during the session.
    fn start(&mut self, sink: OutputSink, output_dir: &Path) -> Result<(), InterpreterError>;

    /// Interpret one block of source text and classify the outcome.
    fn interpret(&mut self, code: &str) -> Interpretation;

    /// Completion candidates for the position `cursor` in `code`.
    ///
    /// Ordering and duplication are implementation-defined.
    fn complete_candidates(
        &mut self,
        code: &str,
        cursor: usize,
    ) -> Result<Vec<String>, InterpreterError>;

    /// Current value of a bound name, without re-evaluating it as code.
    ///
    /// Implementations must resolve through whatever path sees every
    /// binding, including auto-named results, not just user declarations.
    fn value_of_term(&mut self, name: &str) -> Option<Value>;

    /// Introduce `name` into the environment with the given value.
    ///
    /// `tpe` is the declared type as source text; `modifiers` are
    /// declaration modifiers, both advisory for implementations without a
    /// matching concept.
    fn bind(
        &mut self,
        name: &str,
        tpe: &str,
        value: Value,
        modifiers: &[&str],
    ) -> Result<(), InterpreterError>;

    /// Append entries to the interpreter's classpath.
    ///
    /// Entries are local files that already passed the session's filter.
    fn extend_classpath(&mut self, entries: Vec<PathBuf>) -> Result<(), InterpreterError>;

    /// Release interpreter resources. Must be safe to call more than once.
    fn close(&mut self);
}
