use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use warden_auth::ErrorClass;

use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?.to_string();

    let services = Arc::clone(&state.services);
    let profile = tokio::task::spawn_blocking(move || services.authentication.validate_bearer(&token))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "bearer validation task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| match e.class() {
            ErrorClass::Unauthenticated => {
                tracing::debug!(error = %e, "bearer rejected");
                StatusCode::UNAUTHORIZED
            }
            _ => {
                tracing::error!(error = %e, "bearer validation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    req.extensions_mut()
        .insert(TenantContext::new(profile.tenant.id));
    req.extensions_mut().insert(PrincipalContext::new(profile));

    Ok(next.run(req).await)
}

pub(crate) fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
