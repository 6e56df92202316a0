use aisle_catalog::{Flight, SortKey};
use aisle_core::FlightInfo;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub by: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedFlightsResponse {
    pub sorted_by: SortKey,
    pub flights: Vec<Flight>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub flight_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub flight: Flight,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights))
        .route("/flights/sorted", get(sorted_flights))
        .route("/flights/search", get(search_flight))
        .route("/flights/{flight_number}", get(get_flight))
        .route("/flights/{flight_number}/info", get(flight_info))
}

/// GET /flights
async fn list_flights(State(state): State<AppState>) -> Json<Vec<Flight>> {
    Json(state.reservations.list_flights().to_vec())
}

/// GET /flights/{flight_number}
async fn get_flight(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
) -> Result<Json<Flight>, AppError> {
    let flight_number = parse_path_number(&flight_number)?;
    let flight = state.reservations.get_flight(flight_number)?;
    Ok(Json(flight.clone()))
}

/// GET /flights/{flight_number}/info
/// Seat map and waitlists per class
async fn flight_info(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
) -> Result<Json<FlightInfo>, AppError> {
    let flight_number = parse_path_number(&flight_number)?;
    let info = state.reservations.flight_info(flight_number).await?;
    Ok(Json(info))
}

/// GET /flights/sorted?by=flightNumber|departureDate
async fn sorted_flights(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> Result<Json<SortedFlightsResponse>, AppError> {
    let sorted_by = match query.by.as_deref() {
        None => SortKey::default(),
        Some(by) => by.parse::<SortKey>().map_err(|_| AppError::InvalidChoice {
            message: "Invalid \"by\" parameter".to_string(),
            allowed: SortKey::ALL.iter().map(SortKey::as_str).collect(),
        })?,
    };

    Ok(Json(SortedFlightsResponse {
        sorted_by,
        flights: state.reservations.sorted_flights(sorted_by),
    }))
}

/// GET /flights/search?flightNumber=...
/// Binary search over the catalog sorted by flight number
async fn search_flight(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let raw = query
        .flight_number
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("Query param \"flightNumber\" is required".to_string()))?;
    let flight_number = raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::ValidationError("Query param \"flightNumber\" must be a positive integer".to_string()))?;

    let flight = state.reservations.search_flight(flight_number)?;
    Ok(Json(SearchResponse { flight }))
}

/// Flight numbers in paths are digits only; anything else is an unknown route.
pub(crate) fn parse_path_number(raw: &str) -> Result<u32, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFoundError("Not Found".to_string()));
    }
    raw.parse::<u32>()
        .map_err(|_| AppError::NotFoundError(format!("Flight {raw} not found")))
}
