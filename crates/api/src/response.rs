//! HTTP mapping for the error taxonomy.
//!
//! Every denial and failure on the /api routes funnels through here, so the
//! status codes and body shape come from `AppError` in one place instead of
//! being restated per handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::middleware::AuthSession;
use fundtrack_core::auth::{AuthzError, authorize};
use fundtrack_shared::{AppError, Role};

/// Renders an `AppError` as a JSON response. Store and internal failures
/// keep their detail out of the body.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.public_message()
        })),
    )
        .into_response()
}

pub(crate) fn validation_failure(message: &str) -> Response {
    error_response(&AppError::Validation(message.to_string()))
}

pub(crate) fn internal_error() -> Response {
    error_response(&AppError::Internal(String::new()))
}

pub(crate) fn unauthenticated() -> Response {
    error_response(&AppError::Unauthenticated(
        "a valid session is required".to_string(),
    ))
}

/// Runs the authorization guard, converting a denial into a response.
pub(crate) fn check_role(auth: &AuthSession, required: &[Role]) -> Result<(), Response> {
    match authorize(Some(auth.context()), required) {
        Ok(_) => Ok(()),
        Err(AuthzError::Forbidden) => Err(error_response(&AppError::Forbidden(
            "your role does not allow this operation".to_string(),
        ))),
        Err(AuthzError::Unauthenticated) => Err(unauthenticated()),
    }
}
