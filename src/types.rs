//! Core data model types.
//!
//! Parsing produces an in-memory [`DataSet`]: the header's column names plus rows of inferred
//! [`Value`]s. A [`Record`] is a borrowed, name-keyed view over one row.

use std::fmt;

use serde::Serialize;

/// A single inferred cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Empty cell.
    Absent,
    /// Integer or floating point literal.
    Number(f64),
    /// Boolean literal.
    Bool(bool),
    /// Anything else, kept verbatim.
    Text(String),
}

impl Value {
    /// The variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Absent => ValueKind::Absent,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Number(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Inferred type of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Absent,
    Number,
    Bool,
    Text,
}

/// One parsed data row, keyed by column name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Column names of this record, in header order.
    pub fn keys(self) -> impl Iterator<Item = &'a str> {
        self.columns.iter().map(String::as_str)
    }

    /// Value for `column`. With duplicate header names the first one wins.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the header columns. Every row holds
/// exactly `columns.len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Header column names, in declared order.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from header columns and rows.
    ///
    /// Rows are normalized to the header width: short rows are padded with [`Value::Absent`]
    /// and extra cells are dropped.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Absent);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Record at position `idx`, if any.
    pub fn record(&self, idx: usize) -> Option<Record<'_>> {
        self.rows.get(idx).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate the values of one column in row order. Empty if the column does not exist.
    ///
    /// With duplicate header names this reads the first match; use [`Self::column_values_at`]
    /// to address a column by position.
    pub fn column_values(&self, column: &str) -> impl Iterator<Item = &Value> {
        let idx = self.index_of(column).unwrap_or(usize::MAX);
        self.column_values_at(idx)
    }

    /// Iterate the values at column position `idx` in row order. Empty if out of range.
    pub fn column_values_at(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }
}
