//! Translation of service failures into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};

use crate::backend::domain::DomainError;
use shared::ErrorResponse;

/// Status code a service failure maps to
pub fn status_for(error: &anyhow::Error) -> StatusCode {
    match error.downcast_ref::<DomainError>() {
        Some(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(DomainError::Conflict(_)) => StatusCode::CONFLICT,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error body for a failed request.
///
/// Domain failures carry their own message and are logged as warnings.
/// Anything else is logged in full and answered with `fallback` only.
pub fn error_response(error: anyhow::Error, fallback: &str) -> Response {
    let status = status_for(&error);
    let message = match error.downcast_ref::<DomainError>() {
        Some(domain_error) => {
            warn!("{}: {}", fallback, domain_error);
            domain_error.to_string()
        }
        None => {
            error!("{}: {:#}", fallback, error);
            fallback.to_string()
        }
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}
