use aisle_catalog::SeatClass;
use aisle_core::{BookingOutcome, CancelOutcome};
use axum::{
    extract::{FromRequest, Path, Request, State},
    http::header::CONTENT_TYPE,
    routing::post,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::flights::parse_path_number;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of book and cancel requests, sent either form-encoded or as JSON.
#[derive(Debug, Default, Deserialize)]
pub struct PassengerRequest {
    pub name: Option<String>,
    pub class: Option<String>,
}

impl PassengerRequest {
    fn name(&self) -> Result<&str, AppError> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::ValidationError("Passenger name required".to_string()))
    }

    /// Defaults to economy only when the field is absent; a blank class is invalid.
    fn class(&self) -> Result<SeatClass, AppError> {
        match self.class.as_deref() {
            None => Ok(SeatClass::Economy),
            Some(class) => class.parse().map_err(|_| AppError::InvalidChoice {
                message: "Invalid class".to_string(),
                allowed: SeatClass::ALL.iter().map(SeatClass::as_str).collect(),
            }),
        }
    }
}

impl<S> FromRequest<S> for PassengerRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<PassengerRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::ValidationError(e.body_text()))?;
            Ok(body)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<PassengerRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::ValidationError(e.body_text()))?;
            Ok(body)
        } else {
            // No usable body: the name check reports what is missing.
            Ok(PassengerRequest::default())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub outcome: CancelOutcome,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights/{flight_number}/book", post(book_seat))
        .route("/flights/{flight_number}/cancel", post(cancel_booking))
}

/// POST /flights/{flight_number}/book
/// Lowest free seat in the class, or the back of its waitlist
async fn book_seat(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
    req: PassengerRequest,
) -> Result<Json<BookingOutcome>, AppError> {
    let flight_number = parse_path_number(&flight_number)?;
    let name = req.name()?;
    let class = req.class()?;

    let outcome = state.reservations.book(flight_number, class, name).await?;
    Ok(Json(outcome))
}

/// POST /flights/{flight_number}/cancel
/// Frees the passenger's seat and promotes the head of the waitlist
async fn cancel_booking(
    State(state): State<AppState>,
    Path(flight_number): Path<String>,
    req: PassengerRequest,
) -> Result<Json<CancelResponse>, AppError> {
    let flight_number = parse_path_number(&flight_number)?;
    let name = req.name()?;
    let class = req.class()?;

    let outcome = state.reservations.cancel(flight_number, class, name).await?;
    Ok(Json(CancelResponse {
        status: "cancelled",
        outcome,
    }))
}
