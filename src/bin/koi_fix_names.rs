//! One-off cleanup of the kepler_name column in the scored
//! predictions CSV: put an underscore before the final name part and
//! join the parts with dashes. Rewrites the file in place.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use exodash::domain::error::{AppError, Result};
use exodash::infrastructure::csv_store;

#[derive(Parser)]
#[command(name = "koi-fix-names")]
#[command(about = "Normalize the kepler_name column of the scored predictions CSV")]
struct Cli {
    /// CSV file to rewrite in place
    #[arg(long, default_value = "koi_predictions_with_scores.csv")]
    file: PathBuf,
}

/// Names that already contain an underscore pass through unchanged.
/// Multi-part names get an underscore prepended to the last part and
/// are re-joined with dashes.
fn fix_kepler_name(name: &str) -> String {
    if name.contains('_') {
        return name.to_string();
    }
    let mut parts: Vec<String> = name.split(' ').map(String::from).collect();
    if parts.len() > 1 {
        if let Some(last) = parts.last_mut() {
            *last = format!("_{}", last);
        }
        return parts.join("-");
    }
    name.to_string()
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let table = csv_store::load_table(&cli.file)?;
    let name_idx = table
        .columns
        .iter()
        .position(|column| column == "kepler_name")
        .ok_or_else(|| {
            AppError::ValidationError(format!(
                "{} has no kepler_name column",
                cli.file.display()
            ))
        })?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    let mut changed = 0usize;
    for row in &table.rows {
        let mut cells = row.cells.clone();
        let fixed = fix_kepler_name(&cells[name_idx]);
        if fixed != cells[name_idx] {
            changed += 1;
            cells[name_idx] = fixed;
        }
        writer.write_record(&cells)?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|err| AppError::Internal(format!("Failed to finish CSV output: {}", err)))?;
    fs::write(&cli.file, buffer)?;

    info!(file = %cli.file.display(), rows = table.len(), changed, "Planet names updated");
    println!("Planet names updated successfully!");
    Ok(())
}
