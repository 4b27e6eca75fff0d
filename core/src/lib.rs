//! Tether Core Types
//!
//! This crate provides the foundational types shared across the tether system:
//! - Value types (the runtime Value enum with scalar and sequence variants)
//! - The interpreter capability seam (Interpreter trait, Interpretation outcome)
//! - Output capture (OutputSink, the shared stdout buffer)
//! - Common error types

mod error;
mod interpreter;
mod sink;
mod value;

pub use error::*;
pub use interpreter::*;
pub use sink::*;
pub use value::*;
