//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::BookingError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Booking operation error.
    Booking(BookingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Booking(err) => booking_error_to_response(err),
        };

        let body = serde_json::json!({
            "success": false,
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn booking_error_to_response(err: BookingError) -> (StatusCode, String) {
    let status = match &err {
        BookingError::Validation(_) => StatusCode::BAD_REQUEST,
        BookingError::UserValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BookingError::InventoryUnavailable { .. } => StatusCode::CONFLICT,
        BookingError::BookingNotFound(_) => StatusCode::NOT_FOUND,
        BookingError::ConfirmationFailed { .. } => StatusCode::CONFLICT,
        BookingError::Store(_) | BookingError::Domain(_) => {
            tracing::error!(error = %err, "internal server error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Booking(err)
    }
}
