//! Storage-agnostic repository contract consumed by the credential engine.
//!
//! Every lookup distinguishes "does not exist" ([`RepositoryError::NotFound`])
//! from a failure to answer ([`RepositoryError::Storage`]); callers must never
//! treat the latter as the former.
//!
//! Implementations own their concurrency discipline. The engine assumes at
//! least read-committed isolation and atomic single-row inserts that enforce
//! the uniqueness keys (user email, tenant domain, role name).

use std::sync::Arc;

use thiserror::Error;

use crate::email::Email;
use crate::id::{RoleId, TenantId, UserId};
use crate::model::{Role, Tenant, TenantStatus, User, UserProfile};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness constraint rejected the write.
    #[error("{entity} already exists: {key}")]
    Conflict { entity: &'static str, key: String },

    /// Transient or infrastructure failure; not retried by the engine.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn conflict(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            key: key.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Contracts
// ─────────────────────────────────────────────────────────────────────────────

pub trait UserRepository: Send + Sync {
    fn find_by_email(&self, email: &Email) -> RepositoryResult<User>;
    /// Rehydrates the user together with its tenant and roles.
    fn find_by_id(&self, id: UserId) -> RepositoryResult<UserProfile>;
    /// Fails with `Conflict` when the email is taken.
    fn create(&self, user: &User) -> RepositoryResult<()>;
    /// Full replace of an existing user; `NotFound` if it does not exist.
    fn update(&self, user: &User) -> RepositoryResult<()>;
}

pub trait TenantRepository: Send + Sync {
    fn find_by_domain(&self, domain: &str) -> RepositoryResult<Tenant>;
    /// Fails with `Conflict` when the domain is taken.
    fn create(&self, tenant: &Tenant) -> RepositoryResult<()>;
    fn update_status(&self, id: TenantId, status: TenantStatus) -> RepositoryResult<()>;
}

pub trait RoleRepository: Send + Sync {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Role>;
    /// Record that `user_id` holds `role_id`. Must be idempotent.
    fn assign_to_user(&self, user_id: UserId, role_id: RoleId) -> RepositoryResult<()>;
}

impl<S> UserRepository for Arc<S>
where
    S: UserRepository + ?Sized,
{
    fn find_by_email(&self, email: &Email) -> RepositoryResult<User> {
        (**self).find_by_email(email)
    }

    fn find_by_id(&self, id: UserId) -> RepositoryResult<UserProfile> {
        (**self).find_by_id(id)
    }

    fn create(&self, user: &User) -> RepositoryResult<()> {
        (**self).create(user)
    }

    fn update(&self, user: &User) -> RepositoryResult<()> {
        (**self).update(user)
    }
}

impl<S> TenantRepository for Arc<S>
where
    S: TenantRepository + ?Sized,
{
    fn find_by_domain(&self, domain: &str) -> RepositoryResult<Tenant> {
        (**self).find_by_domain(domain)
    }

    fn create(&self, tenant: &Tenant) -> RepositoryResult<()> {
        (**self).create(tenant)
    }

    fn update_status(&self, id: TenantId, status: TenantStatus) -> RepositoryResult<()> {
        (**self).update_status(id, status)
    }
}

impl<S> RoleRepository for Arc<S>
where
    S: RoleRepository + ?Sized,
{
    fn find_by_name(&self, name: &str) -> RepositoryResult<Role> {
        (**self).find_by_name(name)
    }

    fn assign_to_user(&self, user_id: UserId, role_id: RoleId) -> RepositoryResult<()> {
        (**self).assign_to_user(user_id, role_id)
    }
}
