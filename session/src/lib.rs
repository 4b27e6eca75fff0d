//! Session layer over a [`tether_core::Interpreter`].
//!
//! A [`Session`] owns one interpreter, its captured output and an
//! exclusive working directory. It speaks the execute protocol: blocks
//! of code go in, [`ExecuteResult`]s come out, with `%table` directives
//! turned into a JSON table payload along the way.

mod classpath;
mod comments;
mod config;
mod error;
mod magic;
mod result;
mod session;
mod table;

pub use classpath::{HostEnvironment, ProcessEnvironment, StaticEnvironment};
pub use config::{
    SessionConfig, CLASSPATH_ENV_VAR, CONFLICT_MARKER, OUTPUT_ROOT, SELF_PREFIX,
};
pub use error::{SessionError, SessionResult, TableError};
pub use result::{ExecuteResult, Payload, TABLE_JSON, TEXT_PLAIN};
pub use session::Session;
pub use table::{ColumnHeader, ColumnKind, TableData};
