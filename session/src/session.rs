//! Interpreter session lifecycle and the execute protocol.

use std::mem;
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use tether_core::{Interpretation, Interpreter, OutputSink, Value};

use crate::classpath::{filter_entries, HostEnvironment, ProcessEnvironment};
use crate::comments::strip_trailing_comments;
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::magic::{split_segments, Segment};
use crate::result::{ExecuteResult, Payload, TABLE_JSON, TEXT_PLAIN};
use crate::table::table_data;

/// Lifecycle state. The interpreter handle travels with the state, so a
/// session that is not running has no way to reach it.
enum State {
    NotStarted {
        interpreter: Box<dyn Interpreter>,
    },
    Running {
        interpreter: Box<dyn Interpreter>,
        /// Exclusive working directory, removed when the session closes
        /// or is dropped.
        work_dir: TempDir,
    },
    Closed,
}

/// A single interpreter session: one interpreter, one output sink, one
/// working directory.
///
/// Not thread-safe; the exclusive receiver on every mutating operation
/// encodes that. Calling `execute`, `complete`, `bind` or
/// `value_of_term` while the session is not running is programmer
/// misuse and panics. [`close`](Session::close) is total and idempotent.
pub struct Session {
    config: SessionConfig,
    host: Box<dyn HostEnvironment>,
    /// Capture buffer shared with the interpreter; cleared per execute.
    sink: OutputSink,
    state: State,
}

impl Session {
    /// Create a session that reads extra classpath entries from the
    /// process environment (variable named by the configuration).
    pub fn new(config: SessionConfig, interpreter: Box<dyn Interpreter>) -> Self {
        let host = Box::new(ProcessEnvironment::new(config.classpath_env_var()));
        Self::with_host(config, interpreter, host)
    }

    /// Create a session with an explicit host environment.
    pub fn with_host(
        config: SessionConfig,
        interpreter: Box<dyn Interpreter>,
        host: Box<dyn HostEnvironment>,
    ) -> Self {
        Self {
            config,
            host,
            sink: OutputSink::new(),
            state: State::NotStarted { interpreter },
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True exactly while the session is running.
    pub fn is_started(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// The working directory, while running.
    pub fn work_dir(&self) -> Option<&Path> {
        match &self.state {
            State::Running { work_dir, .. } => Some(work_dir.path()),
            _ => None,
        }
    }

    /// Start the interpreter: create the working directory, hand the
    /// interpreter the sink and the directory, then inject the filtered
    /// host classpath entries.
    ///
    /// Panics when the session was already started or closed. Real
    /// failures (directory creation, interpreter startup) return an
    /// error and leave the session not started.
    pub fn start(&mut self) -> SessionResult<()> {
        match mem::replace(&mut self.state, State::Closed) {
            State::NotStarted { mut interpreter } => {
                let work_dir = match self.create_work_dir() {
                    Ok(dir) => dir,
                    Err(err) => {
                        self.state = State::NotStarted { interpreter };
                        return Err(err);
                    }
                };
                if let Err(err) = interpreter.start(self.sink.clone(), work_dir.path()) {
                    self.state = State::NotStarted { interpreter };
                    return Err(err.into());
                }
                let entries = filter_entries(
                    self.host.extra_classpath_entries(),
                    self.config.self_prefix(),
                    self.config.conflict_marker(),
                );
                if !entries.is_empty() {
                    debug!(entries = entries.len(), "injecting classpath entries");
                    if let Err(err) = interpreter.extend_classpath(entries) {
                        interpreter.close();
                        self.state = State::NotStarted { interpreter };
                        return Err(err.into());
                    }
                }
                info!(work_dir = %work_dir.path().display(), "session started");
                self.state = State::Running {
                    interpreter,
                    work_dir,
                };
                Ok(())
            }
            other => {
                self.state = other;
                panic!("start() on a session that was already started or closed");
            }
        }
    }

    /// Execute a block of code and classify the outcome.
    ///
    /// The block is split into code and magic segments which run in
    /// order; an error or incomplete segment aborts the rest. On
    /// success the payload carries the sink contents verbatim under
    /// [`TEXT_PLAIN`], plus the converted table under [`TABLE_JSON`]
    /// when the block's final segment was a `%table` directive.
    pub fn execute(&mut self, code: &str) -> ExecuteResult {
        self.sink.clear();
        let segments = split_segments(code);
        debug!(segments = segments.len(), "executing block");

        let mut table: Option<serde_json::Value> = None;
        let mut ends_with_table = false;

        for segment in &segments {
            match segment {
                Segment::Code(text) => {
                    ends_with_table = false;
                    if let Some(aborted) = self.run_code(text) {
                        return aborted;
                    }
                }
                Segment::TableDirective(expr) => {
                    ends_with_table = true;
                    match self.run_table(expr) {
                        Ok(json) => table = Some(json),
                        Err(aborted) => return aborted,
                    }
                }
                Segment::UnknownDirective { name } => {
                    let message = format!("unknown magic directive %{}", name);
                    let trace = vec![format!("MagicError: {}", message)];
                    return ExecuteResult::error("MagicError", message, trace);
                }
            }
        }

        let mut data = Payload::new();
        data.insert(
            TEXT_PLAIN.to_string(),
            serde_json::Value::String(self.sink.contents()),
        );
        if ends_with_table {
            if let Some(json) = table {
                data.insert(TABLE_JSON.to_string(), json);
            }
        }
        ExecuteResult::Success { data }
    }

    /// Completion candidates for the cursor position. Best-effort: an
    /// interpreter-side failure degrades to an empty list. Panics when
    /// the session is not running or the cursor is not a char boundary
    /// within the code.
    pub fn complete(&mut self, code: &str, cursor: usize) -> Vec<String> {
        assert!(
            code.is_char_boundary(cursor),
            "completion cursor {} is out of bounds or not a char boundary",
            cursor
        );
        match self.interpreter_mut().complete_candidates(code, cursor) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "completion failed");
                Vec::new()
            }
        }
    }

    /// Introduce a named value into the interpreter environment.
    pub fn bind(
        &mut self,
        name: &str,
        tpe: &str,
        value: Value,
        modifiers: &[&str],
    ) -> SessionResult<()> {
        self.interpreter_mut().bind(name, tpe, value, modifiers)?;
        Ok(())
    }

    /// Current value of a bound name (trimmed), without re-evaluating
    /// it as code.
    pub fn value_of_term(&mut self, name: &str) -> Option<Value> {
        let name = name.trim();
        self.interpreter_mut().value_of_term(name)
    }

    /// Close the session: release the interpreter and remove the
    /// working directory. Callable from any state, any number of times;
    /// never panics.
    pub fn close(&mut self) {
        match mem::replace(&mut self.state, State::Closed) {
            State::Running {
                mut interpreter,
                work_dir,
            } => {
                interpreter.close();
                let path = work_dir.path().to_path_buf();
                if let Err(err) = work_dir.close() {
                    warn!(path = %path.display(), error = %err, "failed to remove working directory");
                }
                info!("session closed");
            }
            State::NotStarted { mut interpreter } => {
                interpreter.close();
            }
            State::Closed => {}
        }
    }

    fn create_work_dir(&self) -> SessionResult<TempDir> {
        let root = self.config.output_root();
        tempfile::Builder::new()
            .prefix("tether-session-")
            .tempdir_in(&root)
            .map_err(|err| {
                SessionError::work_dir(format!(
                    "cannot create working directory under {}: {}",
                    root.display(),
                    err
                ))
            })
    }

    fn interpreter_mut(&mut self) -> &mut dyn Interpreter {
        match &mut self.state {
            State::Running { interpreter, .. } => interpreter.as_mut(),
            _ => panic!("session is not running"),
        }
    }

    /// Run one code segment. `None` means carry on; `Some` is the
    /// result that aborts the block.
    fn run_code(&mut self, code: &str) -> Option<ExecuteResult> {
        let outcome = match self.interpreter_mut().interpret(code) {
            Interpretation::Incomplete => {
                let stripped = strip_trailing_comments(code);
                if stripped.trim().is_empty() {
                    // Nothing but comments and blanks: nothing to run.
                    return None;
                }
                if stripped.len() < code.len() {
                    // Incomplete ran nothing, so the shortened text is
                    // safe to submit again.
                    self.interpreter_mut().interpret(stripped)
                } else {
                    Interpretation::Incomplete
                }
            }
            other => other,
        };
        match outcome {
            Interpretation::Success => None,
            Interpretation::Error {
                name,
                message,
                trace,
            } => Some(ExecuteResult::error(name, message, trace)),
            Interpretation::Incomplete => Some(ExecuteResult::Incomplete),
        }
    }

    /// Resolve and convert one `%table` directive.
    fn run_table(&mut self, expr: &str) -> Result<serde_json::Value, ExecuteResult> {
        if expr.is_empty() {
            return Err(ExecuteResult::error(
                "MagicError",
                "missing expression for %table",
                vec!["MagicError: missing expression for %table".to_string()],
            ));
        }
        let Some(value) = self.interpreter_mut().value_of_term(expr) else {
            let message = format!("not found: value {}", expr);
            let trace = vec![format!("NameError: {}", message)];
            return Err(ExecuteResult::error("NameError", message, trace));
        };
        let table = table_data(&value).map_err(|err| {
            ExecuteResult::error(
                "TableError",
                err.to_string(),
                vec![format!("TableError: {}", err)],
            )
        })?;
        serde_json::to_value(&table).map_err(|err| {
            ExecuteResult::error(
                "TableError",
                err.to_string(),
                vec![format!("TableError: {}", err)],
            )
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
