//! User registration: tenant resolution, uniqueness, hashing, persistence.
//!
//! The steps are not atomic. A tenant provisioned in step one stays even if
//! user creation later fails; wrap the repositories in a transaction-aware
//! adapter if stronger guarantees are needed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use warden_core::{
    Email, ProviderType, RepositoryError, TenantRepository, User, UserRepository,
};

use crate::config::AuthConfig;
use crate::credential::CredentialCodec;
use crate::error::{AuthError, AuthResult};
use crate::tenant::TenantResolver;

pub struct RegistrationService<U, T> {
    users: U,
    tenants: TenantResolver<T>,
    codec: Arc<CredentialCodec>,
    local_provider_allowed: bool,
    stamp_last_login_on_register: bool,
}

impl<U: UserRepository, T: TenantRepository> RegistrationService<U, T> {
    pub fn new(users: U, tenants: T, codec: Arc<CredentialCodec>, config: &AuthConfig) -> Self {
        Self {
            users,
            tenants: TenantResolver::new(tenants),
            codec,
            local_provider_allowed: config.allows_provider(&ProviderType::Local),
            stamp_last_login_on_register: config.stamp_last_login_on_register,
        }
    }

    pub fn tenants(&self) -> &TenantResolver<T> {
        &self.tenants
    }

    /// Register a password-based user under `tenant_domain`.
    ///
    /// Rejects an already registered email with [`AuthError::DuplicateUser`]
    /// regardless of the tenant it was registered under.
    #[instrument(skip_all, fields(domain = %tenant_domain))]
    pub fn register(&self, email: &str, password: &str, tenant_domain: &str) -> AuthResult<User> {
        let email = Email::parse(email)?;
        if !self.local_provider_allowed {
            return Err(AuthError::ProviderNotAllowed(ProviderType::LOCAL.to_string()));
        }

        let tenant = self.tenants.resolve_or_provision(tenant_domain)?;

        match self.users.find_by_email(&email) {
            Ok(_) => return Err(AuthError::DuplicateUser),
            Err(RepositoryError::NotFound { .. }) => {}
            Err(e) => return Err(AuthError::storage(e)),
        }

        let digest = self.codec.hash(password)?;

        let now = Utc::now();
        let mut user = User::local(email, digest, tenant.id, now);
        if self.stamp_last_login_on_register {
            user.last_login = Some(now);
        }

        self.users.create(&user).map_err(|e| match e {
            // Lost a race against a concurrent registration of the same email.
            RepositoryError::Conflict { .. } => AuthError::DuplicateUser,
            other => AuthError::storage(other),
        })?;

        info!(user_id = %user.id, tenant_id = %tenant.id, "user registered");
        Ok(user)
    }
}
