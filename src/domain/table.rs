// ============================================================
// TABLE TYPES
// ============================================================
// In-memory form of the backing CSV: ordered columns plus rows of
// string cells. Cells stay untyped until they are serialized.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single record, cells aligned with the owning table's columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    /// True when `needle` (already lowercased) is a substring of at
    /// least one cell. An empty needle matches every row.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.cells.iter().any(|cell| cell.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns left after removing the hidden set.
    pub fn visible_columns(&self, hidden: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| !hidden.iter().any(|h| h == *column))
            .cloned()
            .collect()
    }

    /// Render a row as a JSON object, keeping only columns accepted by
    /// `include`. Cell types are inferred from the text.
    pub fn row_object(&self, row: &Row, include: impl Fn(&str) -> bool) -> Map<String, Value> {
        self.columns
            .iter()
            .zip(row.cells.iter())
            .filter(|(column, _)| include(column))
            .map(|(column, cell)| (column.clone(), cell_value(cell)))
            .collect()
    }

    /// Render a row with every column included.
    pub fn full_row_object(&self, row: &Row) -> Map<String, Value> {
        self.row_object(row, |_| true)
    }
}

/// Infer a JSON value from raw cell text: integer, then float, else
/// the original string. Empty cells become null.
pub fn cell_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(cell.to_string())
}
