use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use exodash::application::predictor::Predictor;
use exodash::infrastructure::config::AppConfig;
use exodash::infrastructure::model_store;
use exodash::interfaces::http;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "Falling back to default configuration");
            AppConfig::default()
        }
    };

    let bundle = model_store::load_model_bundle(&config.model_path, &config.features_path);
    if bundle.is_none() {
        info!("No model bundle found, predictions use the heuristic scorer");
    }
    let predictor = Predictor::new(bundle);

    info!(host = %config.host, port = config.port, data = %config.data_path.display(), "Starting server");
    http::run_server(config, predictor)?.await
}
