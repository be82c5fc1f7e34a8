pub mod config;
pub mod csv_store;
pub mod model_store;
