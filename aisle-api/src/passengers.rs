use aisle_core::{PassengerStatus, ReservationError};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub name: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/passengers/status", get(passenger_status))
}

/// GET /passengers/status?name=...
/// First booking or waitlist entry for the name across all flights
async fn passenger_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Response, AppError> {
    let name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("Query param \"name\" is required".to_string()))?;

    match state.reservations.passenger_status(&name).await {
        Ok(status) => Ok(Json::<PassengerStatus>(status).into_response()),
        Err(ReservationError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "name": name.trim(),
                "status": "not_found",
                "message": "Passenger not found",
            })),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
