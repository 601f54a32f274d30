use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod system;
pub mod users;

/// Unauthenticated credential endpoints.
pub fn public_router() -> Router {
    Router::new()
        .route("/v1/register", post(auth::register))
        .route("/v1/login", post(auth::login))
        .route("/v1/token/validate", post(auth::validate_token))
}

/// Router for all authenticated (tenant-scoped) endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .route("/v1/whoami", get(system::whoami))
        .route("/v1/users/:user_id/roles", post(users::assign_role))
}
