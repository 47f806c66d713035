//! Mapping of engine errors to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use super::ApiResponse;
use crate::shared::errors::BookingError;

/// Error returned by handlers; renders as an `ApiResponse` envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        let status = match &e {
            BookingError::EmptySelection
            | BookingError::OutOfRange { .. }
            | BookingError::NonContiguous { .. }
            | BookingError::ClockChange { .. }
            | BookingError::InvalidRate(_) => StatusCode::BAD_REQUEST,
            BookingError::StationNotFound(_)
            | BookingError::UserNotFound(_)
            | BookingError::BookingNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::SlotConflict { .. } => StatusCode::CONFLICT,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let details = match &e {
            BookingError::OutOfRange { slots }
            | BookingError::NonContiguous { slots }
            | BookingError::ClockChange { slots }
            | BookingError::SlotConflict { slots } => json!({ "code": e.code(), "slots": slots }),
            _ => json!({ "code": e.code() }),
        };

        let message = match &e {
            BookingError::Storage(cause) => {
                error!(error = %cause, "Storage failure while handling request");
                "Internal storage error".to_string()
            }
            other => other.to_string(),
        };

        Self {
            status,
            message,
            details: Some(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = ApiResponse::<()>::error(self.message);
        body.details = self.details;
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_status_codes() {
        let cases = [
            (BookingError::EmptySelection, StatusCode::BAD_REQUEST),
            (BookingError::OutOfRange { slots: vec![48] }, StatusCode::BAD_REQUEST),
            (BookingError::NonContiguous { slots: vec![1, 3] }, StatusCode::BAD_REQUEST),
            (BookingError::ClockChange { slots: vec![4, 5] }, StatusCode::BAD_REQUEST),
            (BookingError::StationNotFound(1), StatusCode::NOT_FOUND),
            (BookingError::UserNotFound("u".into()), StatusCode::NOT_FOUND),
            (BookingError::BookingNotFound(3), StatusCode::NOT_FOUND),
            (BookingError::SlotConflict { slots: vec![2] }, StatusCode::CONFLICT),
            (BookingError::Storage("io".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn conflict_details_echo_requested_slots() {
        let api = ApiError::from(BookingError::SlotConflict { slots: vec![11, 12] });
        assert_eq!(
            api.details,
            Some(json!({ "code": "SLOT_CONFLICT", "slots": [11, 12] }))
        );
    }

    #[test]
    fn storage_cause_is_not_exposed() {
        let api = ApiError::from(BookingError::Storage("disk /var/db full".into()));
        assert_eq!(api.message, "Internal storage error");
    }
}
