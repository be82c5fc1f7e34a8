// ============================================================
// SEARCH
// ============================================================

use serde_json::{Map, Value};

use crate::domain::table::Table;

/// Case-insensitive substring match across every cell of every row.
/// Matching rows are returned in full; the dashboard's hidden-column
/// set does not apply here. An empty query matches everything.
pub fn search(table: &Table, query: &str) -> Vec<Map<String, Value>> {
    let needle = query.to_lowercase();
    table
        .rows
        .iter()
        .filter(|row| row.matches(&needle))
        .map(|row| table.full_row_object(row))
        .collect()
}
