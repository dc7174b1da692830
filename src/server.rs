use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::PredictError;
use crate::service::{PredictionReport, PriceService};
use crate::types::PredictRequest;

pub const ERROR_HINT: &str = "Please check your input values and try again.";

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PriceService>,
}

pub type ApiError = (StatusCode, Json<Value>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/predict", post(predict))
        .with_state(state)
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionReport>, ApiError> {
    let Json(req) = payload.map_err(|e| failure(StatusCode::UNPROCESSABLE_ENTITY, &e.body_text()))?;

    let inputs = req
        .into_inputs()
        .map_err(|e| failure(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()))?;

    match state.service.predict(&inputs) {
        Ok(report) => {
            tracing::info!(
                "predicted {} for year={} kms={} fuel={}",
                report.price_text,
                inputs.year,
                inputs.driven_kms,
                inputs.fuel_type
            );
            Ok(Json(report))
        }
        Err(e) => {
            tracing::warn!("prediction failed: {}", e);
            let status = match e {
                PredictError::Feature(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err(failure(status, &e.to_string()))
        }
    }
}

fn failure(status: StatusCode, detail: &str) -> ApiError {
    (
        status,
        Json(json!({
            "error": format!("An error occurred: {}", detail),
            "hint": ERROR_HINT,
        })),
    )
}
