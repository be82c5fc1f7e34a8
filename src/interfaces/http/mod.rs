use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::application::dashboard::{self, DashboardPage};
use crate::application::predictor::{decide, Predictor};
use crate::application::search;
use crate::domain::error::AppError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv_store;

pub mod pages;

pub struct AppState {
    pub config: AppConfig,
    pub predictor: Predictor,
}

#[derive(Deserialize)]
struct DashboardQuery {
    page: Option<usize>,
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[get("/")]
async fn index(data: web::Data<AppState>) -> impl Responder {
    html(pages::index_page(data.predictor.model_loaded()))
}

#[get("/about")]
async fn about() -> impl Responder {
    html(pages::about_page())
}

#[get("/dashboard")]
async fn dashboard_view(
    data: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    let page = query.page.unwrap_or(1);
    match csv_store::load_table(&data.config.data_path) {
        Ok(table) => {
            let view = dashboard::paginate(&table, page, &data.config.hidden_column_list());
            html(pages::dashboard_page(&view, None))
        }
        Err(err) => {
            error!(error = %err, "Dashboard read failed");
            let message = match &err {
                AppError::NotFound(msg) => msg.clone(),
                other => format!("Error reading CSV file: {}", other),
            };
            html(pages::dashboard_page(&DashboardPage::default(), Some(&message)))
        }
    }
}

#[get("/search")]
async fn search_view(data: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    let q = query.q.clone().unwrap_or_default();
    match csv_store::load_table(&data.config.data_path) {
        Ok(table) => {
            let rows = search::search(&table, &q);
            HttpResponse::Ok().json(json!({
                "data": rows,
                "total_results": rows.len()
            }))
        }
        Err(err) => {
            error!(error = %err, query = %q, "Search failed");
            HttpResponse::InternalServerError().json(json!({"error": err.to_string()}))
        }
    }
}

#[get("/health")]
async fn health(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "ok": true,
        "model_loaded": data.predictor.model_loaded()
    }))
}

#[post("/predict")]
async fn predict(data: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let parsed: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let Some(features) = extract_features(&parsed) else {
        return HttpResponse::BadRequest().json(json!({
            "ok": false,
            "error": "Send JSON with a 'features' object containing numeric values."
        }));
    };

    let proba = data.predictor.score(&features);
    let prediction = decide(proba);
    info!(proba, prediction, "Prediction served");
    HttpResponse::Ok().json(json!({
        "ok": true,
        "prediction": prediction,
        "proba": proba,
        "used_features": features
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(pages::not_found_page())
}

/// Accept either `{"features": {...}}` or a bare feature object.
/// Anything that is not a non-empty JSON object is rejected.
fn extract_features(body: &Value) -> Option<Map<String, Value>> {
    let object = body.as_object()?;
    let features = match object.get("features") {
        Some(value) => value.as_object()?,
        None => object,
    };
    if features.is_empty() {
        None
    } else {
        Some(features.clone())
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn run_server(config: AppConfig, predictor: Predictor) -> std::io::Result<Server> {
    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState { config, predictor });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Local tool, no origin restrictions

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(index)
            .service(about)
            .service(dashboard_view)
            .service(search_view)
            .service(health)
            .service(predict)
            .default_service(web::route().to(not_found))
    })
    .bind(bind)?
    .run();

    Ok(server)
}
