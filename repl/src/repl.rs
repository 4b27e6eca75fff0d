//! REPL state and the line-feeding loops around a session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::debug;

use tether_jot::JotInterpreter;
use tether_session::{ExecuteResult, Session, SessionConfig};

use crate::format::{format_table, print_help};

/// Interactive shell state: one running session.
pub struct Repl {
    session: Session,
}

impl Repl {
    /// Create the REPL and start its session.
    pub fn new() -> Result<Self, String> {
        let mut session = Session::new(SessionConfig::new(), Box::new(JotInterpreter::new()));
        session
            .start()
            .map_err(|e| format!("cannot start session: {}", e))?;
        Ok(Self { session })
    }

    /// Execute one block of code.
    pub fn execute(&mut self, code: &str) -> ExecuteResult {
        self.session.execute(code)
    }

    /// Run a file as a script.
    pub fn run_file(&mut self, path: &Path) -> Result<(), String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
        debug!(path = %path.display(), "running script file");
        self.run_script(&content)
    }

    /// Run a script line by line, buffering while a block is still
    /// incomplete. Errors are reported and the script carries on; input
    /// left incomplete at the end is an error.
    pub fn run_script(&mut self, content: &str) -> Result<(), String> {
        let mut buffer = String::new();
        for line in content.lines() {
            buffer.push_str(line);
            buffer.push('\n');
            match self.session.execute(&buffer) {
                ExecuteResult::Incomplete => {}
                result => {
                    buffer.clear();
                    self.report(&result);
                }
            }
        }

        if buffer.trim().is_empty() {
            Ok(())
        } else {
            Err("unexpected end of input".to_string())
        }
    }

    /// Run the interactive loop until EOF or a quit command.
    pub fn interactive(&mut self) {
        println!("Tether REPL v0.1.0");
        println!("Type 'help' for commands, 'quit' to exit");
        println!();

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() { "jot> " } else { "....> " };
            print!("{}", prompt);
            stdout.flush().unwrap();

            let mut line = String::new();
            if stdin.lock().read_line(&mut line).unwrap() == 0 {
                break; // EOF
            }

            // Commands apply only at a fresh prompt, never inside a
            // continuation.
            if buffer.is_empty() {
                let trimmed = line.trim();
                match trimmed.to_lowercase().as_str() {
                    "quit" | "exit" | "\\q" => break,
                    "help" | "\\h" => {
                        print_help();
                        continue;
                    }
                    "" => continue,
                    _ => {}
                }

                if let Some(rest) = trimmed.strip_prefix("\\i ") {
                    if let Err(e) = self.run_file(Path::new(rest.trim())) {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }

            buffer.push_str(&line);

            // An incomplete block ran nothing, so the grown buffer is
            // resubmitted whole on the next round.
            match self.session.execute(&buffer) {
                ExecuteResult::Incomplete => {}
                result => {
                    buffer.clear();
                    self.report(&result);
                }
            }
        }

        println!("Goodbye!");
    }

    /// Print a finished result: text and table grids to stdout, errors
    /// to stderr.
    fn report(&self, result: &ExecuteResult) {
        match result {
            ExecuteResult::Success { .. } => {
                if let Some(text) = result.text() {
                    if !text.is_empty() {
                        println!("{}", text);
                    }
                }
                if let Some(table) = result.table() {
                    println!("{}", format_table(table));
                }
            }
            ExecuteResult::Error {
                name,
                message,
                trace,
            } => {
                if trace.is_empty() {
                    eprintln!("{}: {}", name, message);
                } else {
                    for frame in trace {
                        eprintln!("{}", frame);
                    }
                }
            }
            ExecuteResult::Incomplete => {}
        }
    }
}
