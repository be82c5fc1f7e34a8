// ============================================================
// DASHBOARD PAGINATION
// ============================================================

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::table::Table;

pub const RECORDS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub total_rows: usize,
    pub total_columns: usize,
    pub column_names: Vec<String>,
    pub current_page: usize,
    pub total_pages: usize,
}

/// One page of the table view: visible columns, the row slice for the
/// requested page, and summary stats.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardPage {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
    pub stats: DashboardStats,
}

/// Slice the table for a 1-indexed page, hiding the configured
/// columns from both the column list and the row objects.
/// Out-of-range pages, page 0 included, yield an empty slice, not an
/// error.
pub fn paginate(table: &Table, page: usize, hidden: &[String]) -> DashboardPage {
    let columns = table.visible_columns(hidden);

    let rows: Vec<Map<String, Value>> = match page.checked_sub(1) {
        Some(offset) => table
            .rows
            .iter()
            .skip(offset * RECORDS_PER_PAGE)
            .take(RECORDS_PER_PAGE)
            .map(|row| table.row_object(row, |column| columns.iter().any(|c| c == column)))
            .collect(),
        None => Vec::new(),
    };

    let stats = DashboardStats {
        total_rows: table.len(),
        total_columns: columns.len(),
        column_names: columns.clone(),
        current_page: page,
        total_pages: (table.len() + RECORDS_PER_PAGE - 1) / RECORDS_PER_PAGE,
    };

    DashboardPage { columns, rows, stats }
}
