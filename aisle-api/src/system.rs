use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/reset", post(reset))
}

/// GET /
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Flight Scheduler API",
        "endpoints": [
            "/health",
            "/version",
            "/flights",
            "/flights/{id}",
            "/flights/{id}/info",
            "/flights/{id}/book (POST)",
            "/flights/{id}/cancel (POST)",
            "/flights/sorted?by=flightNumber|departureDate",
            "/flights/search?flightNumber=...",
            "/passengers/status?name=...",
            "/reset (POST)"
        ],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

/// POST /reset
/// Drops every booking and waitlist entry
async fn reset(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.reservations.reset().await?;
    Ok(Json(json!({ "status": "reset" })))
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not Found", "path": uri.path() })),
    )
}
