//! The [`Interpreter`] implementation backed by the jot machine.

use std::path::Path;
use std::path::PathBuf;

use tether_core::{Interpretation, Interpreter, InterpreterError, OutputSink, Value};

use crate::error::JotError;
use crate::eval::Machine;
use crate::lexer::Lexer;
use crate::parser;

/// An in-process jot interpreter.
///
/// Callers must [`start`](Interpreter::start) the interpreter before
/// anything else; every other operation except [`close`](Interpreter::close)
/// asserts that. Auto-named results (`res0`, `res1`, ...) live in the
/// same environment as `val` bindings, so [`value_of_term`]
/// (Interpreter::value_of_term) resolves both.
pub struct JotInterpreter {
    machine: Machine,
    started: bool,
}

impl JotInterpreter {
    pub fn new() -> Self {
        Self {
            machine: Machine::new(),
            started: false,
        }
    }
}

impl Default for JotInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter for JotInterpreter {
    fn start(&mut self, sink: OutputSink, output_dir: &Path) -> Result<(), InterpreterError> {
        if self.started {
            return Err(InterpreterError::start("interpreter already started"));
        }
        self.machine.sink = Some(sink);
        self.machine.work_dir = Some(output_dir.to_path_buf());
        self.started = true;
        Ok(())
    }

    fn interpret(&mut self, code: &str) -> Interpretation {
        assert!(self.started, "interpret() before start()");
        let stmts = match Lexer::new(code).tokenize().and_then(parser::parse) {
            Ok(stmts) => stmts,
            Err(JotError::Incomplete) => return Interpretation::Incomplete,
            Err(JotError::Parse { message, line }) => {
                return Interpretation::error(
                    "ParseError",
                    message.clone(),
                    vec![
                        format!("ParseError: {}", message),
                        format!("  at <input>:{}", line),
                    ],
                )
            }
        };
        // Empty and comment-only input reads as the prefix of a statement
        // yet to come.
        if stmts.is_empty() {
            return Interpretation::Incomplete;
        }
        match self.machine.eval_stmts(&stmts) {
            Ok(()) => Interpretation::Success,
            Err(err) => Interpretation::error(
                err.name,
                err.message.clone(),
                vec![
                    format!("{}: {}", err.name, err.message),
                    format!("  at <input>:{}", err.line),
                ],
            ),
        }
    }

    fn complete_candidates(
        &mut self,
        code: &str,
        cursor: usize,
    ) -> Result<Vec<String>, InterpreterError> {
        assert!(self.started, "complete_candidates() before start()");
        Ok(self.machine.complete(code, cursor))
    }

    fn value_of_term(&mut self, name: &str) -> Option<Value> {
        assert!(self.started, "value_of_term() before start()");
        self.machine.lookup(name)
    }

    /// The declared type and modifiers are advisory; jot values carry
    /// their own type, so only the name and value are recorded.
    fn bind(
        &mut self,
        name: &str,
        _tpe: &str,
        value: Value,
        _modifiers: &[&str],
    ) -> Result<(), InterpreterError> {
        assert!(self.started, "bind() before start()");
        if !is_valid_name(name) {
            return Err(InterpreterError::binding(format!(
                "invalid binding name: {:?}",
                name
            )));
        }
        self.machine.insert(name, value);
        Ok(())
    }

    fn extend_classpath(&mut self, entries: Vec<PathBuf>) -> Result<(), InterpreterError> {
        assert!(self.started, "extend_classpath() before start()");
        self.machine.search_path.extend(entries);
        Ok(())
    }

    fn close(&mut self) {
        self.machine.reset();
        self.started = false;
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}
