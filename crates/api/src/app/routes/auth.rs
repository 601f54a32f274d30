//! Register, login and token validation handlers.
//!
//! The core services block (bcrypt, repository IO), so every call runs on the
//! blocking pool.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use warden_auth::AuthResult;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Run a core call on the blocking pool and map its failure to a response.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, axum::response::Response>
where
    F: FnOnce() -> AuthResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(errors::auth_error_to_response),
        Err(e) => {
            tracing::error!(error = %e, "blocking task failed");
            Err(errors::internal_error())
        }
    }
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let user = match run_blocking(move || {
        services.register(&body.email, &body.password, &body.tenant_domain)
    })
    .await
    {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    (
        StatusCode::CREATED,
        Json(dto::RegisterResponse {
            user_id: user.id.to_string(),
            tenant_id: user.tenant_id.to_string(),
        }),
    )
        .into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let authenticated = match run_blocking(move || {
        services.authentication.authenticate(&body.email, &body.password)
    })
    .await
    {
        Ok(a) => a,
        Err(resp) => return resp,
    };

    Json(dto::LoginResponse {
        user_id: authenticated.user.id.to_string(),
        tenant_id: authenticated.user.tenant_id.to_string(),
        token: authenticated.token,
    })
    .into_response()
}

pub async fn validate_token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ValidateTokenRequest>,
) -> axum::response::Response {
    match run_blocking(move || services.authentication.validate_bearer(&body.token)).await {
        Ok(profile) => Json(dto::PrincipalResponse::from(&profile)).into_response(),
        Err(resp) => resp,
    }
}
