//! Execution result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Payload tag for captured plain-text output. Always present on success.
pub const TEXT_PLAIN: &str = "text/plain";

/// Payload tag for structured table output. Present only when the final
/// segment of the executed block was a `%table` directive.
pub const TABLE_JSON: &str = "application/vnd.tether.table.v1+json";

/// Success payload: MIME-like tags mapped to JSON content.
pub type Payload = BTreeMap<String, serde_json::Value>;

/// Result of executing a block of code.
///
/// Closed and exhaustive: callers match on exactly these three outcomes.
/// Evaluation problems are the `Error` variant, never an `Err` from
/// `execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecuteResult {
    /// Evaluation completed; `data` holds the tagged payloads.
    Success { data: Payload },
    /// Evaluation failed: short classification name, message, trace lines.
    Error {
        name: String,
        message: String,
        trace: Vec<String>,
    },
    /// The code is a syntactically incomplete fragment; nothing ran.
    Incomplete,
}

impl ExecuteResult {
    /// Success carrying only the plain-text payload.
    pub fn success_text(text: impl Into<String>) -> Self {
        let mut data = Payload::new();
        data.insert(
            TEXT_PLAIN.to_string(),
            serde_json::Value::String(text.into()),
        );
        Self::Success { data }
    }

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

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }

    /// The plain-text payload, when this is a success.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { data } => data.get(TEXT_PLAIN).and_then(|v| v.as_str()),
            _ => None,
        }
    }

    /// The table payload, when this is a success that produced one.
    pub fn table(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success { data } => data.get(TABLE_JSON),
            _ => None,
        }
    }
}
