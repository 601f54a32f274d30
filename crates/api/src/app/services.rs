//! Service wiring: repositories behind trait objects, core services on top.

use std::sync::Arc;

use warden_auth::{
    AuthConfig, AuthResult, AuthenticationService, CredentialCodec, CredentialError,
    RegistrationService, RoleAssignment, TokenService,
};
use warden_core::{
    Email, Permission, PermissionId, Role, RoleId, RoleRepository, TenantRepository, User,
    UserRepository, WILDCARD_PERMISSION,
};
use warden_infra::InMemoryStore;

pub type DynUsers = Arc<dyn UserRepository>;
pub type DynTenants = Arc<dyn TenantRepository>;
pub type DynRoles = Arc<dyn RoleRepository>;

/// Permission required to grant roles to other users.
pub const ASSIGN_ROLES_PERMISSION: &str = "roles.assign";

/// Role names seeded into a fresh in-memory store.
pub const ADMIN_ROLE: &str = "admin";
pub const MEMBER_ROLE: &str = "member";

pub struct AppServices {
    pub users: DynUsers,
    pub registration: RegistrationService<DynUsers, DynTenants>,
    pub authentication: AuthenticationService<DynUsers>,
    pub roles: RoleAssignment<DynUsers, DynRoles>,
    bootstrap_admins: Vec<Email>,
}

impl AppServices {
    pub fn new(
        users: DynUsers,
        tenants: DynTenants,
        roles: DynRoles,
        config: &AuthConfig,
        bootstrap_admins: Vec<Email>,
    ) -> Result<Self, CredentialError> {
        let codec = Arc::new(CredentialCodec::new(config.bcrypt_cost)?);
        let tokens = TokenService::new(&config.signing_secret);

        Ok(Self {
            registration: RegistrationService::new(
                Arc::clone(&users),
                tenants,
                Arc::clone(&codec),
                config,
            ),
            authentication: AuthenticationService::new(Arc::clone(&users), codec, tokens),
            roles: RoleAssignment::new(Arc::clone(&users), roles),
            users,
            bootstrap_admins,
        })
    }

    /// Dev/test wiring over a single [`InMemoryStore`] seeded with the
    /// default roles.
    pub fn in_memory(
        config: &AuthConfig,
        bootstrap_admins: Vec<Email>,
    ) -> Result<Self, CredentialError> {
        let store = Arc::new(InMemoryStore::new());
        for role in default_roles() {
            if let Err(e) = store.insert_role(role) {
                tracing::warn!(error = %e, "failed to seed role");
            }
        }

        Self::new(store.clone(), store.clone(), store, config, bootstrap_admins)
    }

    /// Register a user, granting [`ADMIN_ROLE`] when the email is one of the
    /// configured bootstrap administrators.
    ///
    /// A failed grant is logged and does not undo the registration; another
    /// admin can promote the user later.
    pub fn register(&self, email: &str, password: &str, tenant_domain: &str) -> AuthResult<User> {
        let user = self.registration.register(email, password, tenant_domain)?;

        if self.bootstrap_admins.contains(&user.email) {
            match self.roles.assign_role(user.id, ADMIN_ROLE) {
                Ok(()) => tracing::info!(user_id = %user.id, "bootstrap admin granted"),
                Err(e) => {
                    tracing::error!(user_id = %user.id, error = %e, "bootstrap admin grant failed")
                }
            }
        }

        Ok(user)
    }
}

fn default_roles() -> Vec<Role> {
    let permission = |code: &str| Permission {
        id: PermissionId::new(),
        code: code.to_string(),
        name: code.to_string(),
    };

    vec![
        Role {
            id: RoleId::new(),
            name: ADMIN_ROLE.to_string(),
            description: "Full access within the tenant".to_string(),
            permissions: vec![permission(WILDCARD_PERMISSION)],
        },
        Role {
            id: RoleId::new(),
            name: MEMBER_ROLE.to_string(),
            description: "Read-only access to the user directory".to_string(),
            permissions: vec![permission("users.read")],
        },
    ]
}
