use aisle_core::ReservationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    /// A parameter outside a closed set; the body lists the accepted values.
    InvalidChoice {
        message: String,
        allowed: Vec<&'static str>,
    },
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InvalidChoice { message, allowed } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message, "allowed": allowed }))
            }
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::BadRequest(msg) => AppError::ValidationError(msg),
            ReservationError::NotFound(msg) => AppError::NotFoundError(msg),
            ReservationError::Conflict(msg) => AppError::ConflictError(msg),
            ReservationError::Persistence(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}
