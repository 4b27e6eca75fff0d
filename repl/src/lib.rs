//! Interactive shell for jot sessions.
//!
//! - `repl`: session state and the line-feeding loops
//! - `format`: table grids and help text

mod format;
mod repl;

pub use format::{format_table, print_help};
pub use repl::Repl;
