//! Apply a saved classifier bundle to the saved KOI testing sample
//! and write the predictions back out as CSV.
//!
//! Disposable tooling, not part of the serving core:
//!     koi-batch-score --model models/gradient_boosting.json

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use exodash::domain::error::{AppError, Result};
use exodash::infrastructure::{csv_store, model_store};

#[derive(Parser)]
#[command(name = "koi-batch-score")]
#[command(about = "Run KOI test predictions from a saved model bundle")]
struct Cli {
    /// Path to the saved model bundle (.json)
    #[arg(long)]
    model: PathBuf,

    /// Testing sample to score
    #[arg(long, default_value = "data/koi_testing_sample/X_test.csv")]
    input: PathBuf,

    /// Where the scored CSV is written
    #[arg(long, default_value = "data/koi_testing_sample/predictions.csv")]
    output: PathBuf,
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
    info!(model = %cli.model.display(), "Loading model bundle");
    let bundle = model_store::load_batch_bundle(&cli.model)?;
    info!(
        model = %bundle.model_name,
        features = bundle.feature_cols.len(),
        "Model loaded"
    );

    let table = csv_store::load_table(&cli.input)?;
    info!(rows = table.len(), columns = table.columns.len(), "Loaded test data");

    // Column order must follow the bundle, not the file.
    let indices: Vec<usize> = bundle
        .feature_cols
        .iter()
        .map(|name| {
            table
                .columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "Testing sample is missing feature column '{}'",
                        name
                    ))
                })
        })
        .collect::<Result<_>>()?;

    let mut writer = csv::Writer::from_path(&cli.output)?;
    let mut header: Vec<&str> = bundle.feature_cols.iter().map(String::as_str).collect();
    header.push("pred_encoded");
    header.push("pred_label");
    writer.write_record(&header)?;

    let mut preview = Vec::new();
    for row in &table.rows {
        let input: Vec<f64> = indices
            .iter()
            .map(|&idx| row.cells[idx].trim().parse().unwrap_or(0.0))
            .collect();
        let proba = bundle.model.probability(&input);
        let encoded = usize::from(proba >= 0.5);
        let label = bundle
            .labels
            .get(encoded)
            .cloned()
            .unwrap_or_else(|| encoded.to_string());

        let mut record: Vec<String> = indices.iter().map(|&idx| row.cells[idx].clone()).collect();
        record.push(encoded.to_string());
        record.push(label.clone());
        writer.write_record(&record)?;

        if preview.len() < 10 {
            preview.push((proba, label));
        }
    }
    writer.flush()?;

    info!(output = %cli.output.display(), rows = table.len(), "Predictions saved");

    println!("=== Sample Predictions ===");
    for (proba, label) in &preview {
        println!("{:>6.3}  {}", proba, label);
    }

    Ok(())
}
