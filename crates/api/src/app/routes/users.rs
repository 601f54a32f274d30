use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use warden_auth::AuthError;
use warden_core::{RepositoryError, UserId, UserRepository};

use crate::app::routes::auth::run_blocking;
use crate::app::services::{ASSIGN_ROLES_PERMISSION, AppServices};
use crate::app::{dto, errors};
use crate::authz;
use crate::context::{PrincipalContext, TenantContext};

/// POST /v1/users/:user_id/roles - grant a named role to a user of the
/// caller's tenant.
pub async fn assign_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(user_id): Path<String>,
    Json(body): Json<dto::AssignRoleRequest>,
) -> axum::response::Response {
    if let Err(e) = authz::require_permission(&tenant, &principal, ASSIGN_ROLES_PERMISSION) {
        return errors::authz_error_to_response(e);
    }

    let user_id: UserId = match user_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("{e}")),
    };

    let tenant_id = tenant.tenant_id();
    let result = run_blocking(move || {
        // Users of other tenants are reported as absent.
        match services.users.find_by_id(user_id) {
            Ok(target) if target.user.tenant_id == tenant_id => {}
            Ok(_) | Err(RepositoryError::NotFound { .. }) => return Ok(false),
            Err(e) => return Err(AuthError::storage(e)),
        }
        services.roles.assign_role(user_id, &body.role).map(|()| true)
    })
    .await;

    match result {
        Ok(true) => {
            tracing::info!(
                user_id = %user_id,
                granted_by = %principal.user_id(),
                "role assignment requested"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(resp) => resp,
    }
}
