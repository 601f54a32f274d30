use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use warden_auth::{AuthError, AuthzError, ErrorClass};

/// Map a core failure to an HTTP response.
///
/// Authentication failures share one body so callers cannot tell which check
/// failed. Internal details are logged, never returned.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err.class() {
        ErrorClass::Unauthenticated => {
            tracing::debug!(error = %err, "request unauthenticated");
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "invalid credentials")
        }
        ErrorClass::Conflict => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
        ErrorClass::InvalidInput => {
            json_error(StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
        ErrorClass::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        ErrorClass::Internal => {
            tracing::error!(error = %err, "request failed");
            internal_error()
        }
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn internal_error() -> axum::response::Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "internal error",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
