//! User entity for identity management.
//!
//! A user belongs to exactly one tenant and carries a one-way password digest,
//! never the plaintext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::entity::Entity;
use crate::id::{RoleId, TenantId, UserId};
use crate::model::{Role, Tenant};

// ─────────────────────────────────────────────────────────────────────────────
// Credential digest
// ─────────────────────────────────────────────────────────────────────────────

/// One-way hashed password representation.
///
/// `Debug` is redacted so digests never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialDigest(String);

impl CredentialDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for CredentialDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("CredentialDigest(<redacted>)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider / status
// ─────────────────────────────────────────────────────────────────────────────

/// How the user authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderType {
    /// Password credentials managed by this service.
    Local,
    /// A federated provider, identified by name (e.g. `"ldap"`).
    External(String),
}

impl ProviderType {
    pub const LOCAL: &'static str = "local";

    pub fn as_str(&self) -> &str {
        match self {
            ProviderType::Local => Self::LOCAL,
            ProviderType::External(name) => name,
        }
    }
}

impl From<String> for ProviderType {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(Self::LOCAL) {
            ProviderType::Local
        } else {
            ProviderType::External(value)
        }
    }
}

impl From<ProviderType> for String {
    fn from(value: ProviderType) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// User is active and can authenticate.
    #[default]
    Active,
    /// Administratively blocked.
    Suspended,
    /// Dormant or deactivated account.
    Inactive,
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "ACTIVE"),
            UserStatus::Suspended => write!(f, "SUSPENDED"),
            UserStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// Identity record.
///
/// # Invariants
/// - `email` is unique across all tenants.
/// - `tenant_id` never changes after creation.
/// - `roles` holds no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_digest: CredentialDigest,
    pub tenant_id: TenantId,
    pub roles: Vec<RoleId>,
    pub last_login: Option<DateTime<Utc>>,
    pub provider: ProviderType,
    /// Identifier at the external provider; empty for local users.
    pub provider_user_id: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A new active, password-based user.
    pub fn local(
        email: Email,
        password_digest: CredentialDigest,
        tenant_id: TenantId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_digest,
            tenant_id,
            roles: Vec::new(),
            last_login: None,
            provider: ProviderType::Local,
            provider_user_id: String::new(),
            status: UserStatus::Active,
            created_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn has_role_id(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }

    /// Add a role reference; returns `false` when it was already held.
    pub fn grant_role(&mut self, role_id: RoleId) -> bool {
        if self.has_role_id(role_id) {
            return false;
        }
        self.roles.push(role_id);
        true
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

/// A user rehydrated together with its tenant and resolved roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
    pub tenant: Tenant,
    pub roles: Vec<Role>,
}

impl UserProfile {
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn has_permission(&self, code: &str) -> bool {
        self.roles.iter().any(|r| r.grants(code))
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
