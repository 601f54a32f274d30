//! Role assignment extension point.
//!
//! Only the contract is defined: unknown users and roles are rejected and
//! re-assigning a held role is a no-op. No further business rules apply.

use tracing::{debug, info};

use warden_core::{RepositoryError, RoleRepository, UserId, UserRepository};

use crate::error::{AuthError, AuthResult};

pub struct RoleAssignment<U, R> {
    users: U,
    roles: R,
}

impl<U: UserRepository, R: RoleRepository> RoleAssignment<U, R> {
    pub fn new(users: U, roles: R) -> Self {
        Self { users, roles }
    }

    /// Grant `role_name` to `user_id`. Idempotent.
    pub fn assign_role(&self, user_id: UserId, role_name: &str) -> AuthResult<()> {
        let profile = self.users.find_by_id(user_id).map_err(|e| match e {
            RepositoryError::NotFound { .. } => AuthError::UserNotFound,
            other => AuthError::storage(other),
        })?;

        let role = self.roles.find_by_name(role_name).map_err(|e| match e {
            RepositoryError::NotFound { .. } => AuthError::RoleNotFound(role_name.to_string()),
            other => AuthError::storage(other),
        })?;

        if profile.user.has_role_id(role.id) {
            debug!(user_id = %user_id, role = %role.name, "role already held");
            return Ok(());
        }

        self.roles
            .assign_to_user(user_id, role.id)
            .map_err(AuthError::storage)?;

        info!(user_id = %user_id, role = %role.name, "role assigned");
        Ok(())
    }
}
