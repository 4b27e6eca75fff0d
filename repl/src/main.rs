//! Entry point for the tether binary.

use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tether_repl::Repl;

fn main() -> ExitCode {
    // Respects RUST_LOG; logs go to stderr so results stay clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let mut repl = match Repl::new() {
        Ok(repl) => repl,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Run any files passed as arguments
    for arg in &args[1..] {
        if let Err(e) = repl.run_file(Path::new(arg)) {
            eprintln!("Error loading {}: {}", arg, e);
            return ExitCode::FAILURE;
        }
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl.interactive();
    } else if args.len() == 1 {
        // Only read from the stdin pipe if no files were passed
        let mut input = String::new();
        if let Err(e) = stdin.lock().read_to_string(&mut input) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::FAILURE;
        }
        if let Err(e) = repl.run_script(&input) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
