// ============================================================
// CSV STORE
// ============================================================
// Reads the backing CSV into a Table. There is deliberately no cache:
// every request reloads the file, matching the service contract.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Row, Table};

pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "{} file not found",
            path.display()
        )));
    }
    let content = read_lossy(path)?;
    let table = parse_table(&content)?;
    debug!(
        rows = table.len(),
        columns = table.columns.len(),
        path = %path.display(),
        "CSV loaded"
    );
    Ok(table)
}

pub fn parse_table(content: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| AppError::ParseError(format!("Failed to read CSV headers: {}", err)))?
        .clone();
    let columns: Vec<String> = headers.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|err| {
            AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, err))
        })?;
        // Short records pad with empty cells so every row spans the
        // full column set.
        let cells = (0..columns.len())
            .map(|idx| record.get(idx).unwrap_or("").to_string())
            .collect();
        rows.push(Row { cells });
    }

    Ok(Table::new(columns, rows))
}

/// Read file contents, replacing invalid UTF-8 rather than failing.
fn read_lossy(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .map_err(|err| AppError::IoError(format!("Failed to open {}: {}", path.display(), err)))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|err| AppError::IoError(format!("Failed to read {}: {}", path.display(), err)))?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}
