use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::dto::PrincipalResponse;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(PrincipalResponse::from(principal.profile()))
}
