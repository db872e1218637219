//! Mapping from domain errors to HTTP responses.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};

use deskbook_core::DirectoryError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// One status code and body per error variant. Failed logins and bad tokens
/// share a response on purpose; internal detail never reaches the client.
pub fn error_response(err: DirectoryError) -> Response {
    match err {
        DirectoryError::InvalidCredentials | DirectoryError::Unauthenticated => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid authentication credentials",
        ),
        DirectoryError::Forbidden => {
            json_error(StatusCode::FORBIDDEN, "forbidden", "permission denied")
        }
        DirectoryError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DirectoryError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DirectoryError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DirectoryError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}
