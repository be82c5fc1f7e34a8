use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::{AppError, Result};

/// Columns the first web variant hid from the table view. Setting
/// HIDDEN_COLUMNS to an empty string reproduces the unfiltered
/// variant; search ignores the set either way.
pub const DEFAULT_HIDDEN_COLUMNS: &str = "gif,nasa_url,educational_summary";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub features_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Comma-separated column names removed from the dashboard view.
    pub hidden_columns: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            model_path: PathBuf::from("models/model.json"),
            features_path: PathBuf::from("models/feature_names.json"),
            host: "0.0.0.0".to_string(),
            port: 8000,
            hidden_columns: DEFAULT_HIDDEN_COLUMNS.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with the environment (DATA_PATH, MODEL_PATH,
    /// FEATURES_PATH, HOST, PORT, HIDDEN_COLUMNS).
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Env::raw().only(&[
                "data_path",
                "model_path",
                "features_path",
                "host",
                "port",
                "hidden_columns",
            ]))
            .extract()
            .map_err(|err| AppError::Internal(format!("Failed to load configuration: {}", err)))
    }

    pub fn hidden_column_list(&self) -> Vec<String> {
        self.hidden_columns
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}
