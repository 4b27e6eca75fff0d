//! Conversion of sequence values into structured table data.

use serde::{Deserialize, Serialize};

use tether_core::Value;

use crate::error::TableError;

/// Structured table: column headers plus rows of JSON cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<ColumnHeader>,
    pub data: Vec<Vec<serde_json::Value>>,
}

/// One column: positional name (the column index as a string) and an
/// inferred type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
}

/// Closed set of column type labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Double,
    Boolean,
    String,
    Other,
}

impl ColumnKind {
    /// The label the payload carries.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Double => "double",
            ColumnKind::Boolean => "boolean",
            ColumnKind::String => "string",
            ColumnKind::Other => "other",
        }
    }

    /// Infer a column kind from a single cell value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Int(_) => ColumnKind::Integer,
            Value::Float(_) => ColumnKind::Double,
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Str(_) => ColumnKind::String,
            _ => ColumnKind::Other,
        }
    }
}

/// Convert a two-level sequence (rows of cells) into [`TableData`].
///
/// Column count is fixed by the first row and every row must match it.
/// Column types are inferred from the first row only; later rows are
/// converted verbatim without re-validation. An empty outer sequence
/// yields empty headers and data.
pub fn table_data(value: &Value) -> Result<TableData, TableError> {
    let rows = value
        .as_seq()
        .ok_or_else(|| TableError::not_a_sequence(value.type_name()))?;

    let Some(first) = rows.first() else {
        return Ok(TableData {
            headers: Vec::new(),
            data: Vec::new(),
        });
    };
    let cells = first
        .as_seq()
        .ok_or_else(|| TableError::row_not_a_sequence(0, first.type_name()))?;

    let headers = cells
        .iter()
        .enumerate()
        .map(|(index, cell)| ColumnHeader {
            name: index.to_string(),
            kind: ColumnKind::of(cell),
        })
        .collect();

    let width = cells.len();
    let mut data = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let cells = row
            .as_seq()
            .ok_or_else(|| TableError::row_not_a_sequence(index, row.type_name()))?;
        if cells.len() != width {
            return Err(TableError::ragged_row(index, width, cells.len()));
        }
        data.push(cells.iter().map(Value::to_json).collect());
    }

    Ok(TableData { headers, data })
}
