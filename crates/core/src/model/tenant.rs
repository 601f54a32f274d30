//! Tenant entity: the isolation boundary users belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::DomainError;
use crate::id::TenantId;

/// Tenant lifecycle status.
///
/// Tenants provisioned implicitly by registration start in `Provisioning`;
/// promotion to `Active` is an administrative action outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Active,
    Suspended,
    Provisioning,
}

impl core::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TenantStatus::Active => write!(f, "ACTIVE"),
            TenantStatus::Suspended => write!(f, "SUSPENDED"),
            TenantStatus::Provisioning => write!(f, "PROVISIONING"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    /// Unique lookup key (normalised, see [`Tenant::normalize_domain`]).
    pub domain: String,
    pub name: String,
    pub status: TenantStatus,
    /// Opaque to the engine.
    pub subscription_tier: String,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// A freshly provisioned tenant for an unseen domain.
    pub fn provisioning(domain: String, now: DateTime<Utc>) -> Self {
        Self {
            id: TenantId::new(),
            name: domain.clone(),
            domain,
            status: TenantStatus::Provisioning,
            subscription_tier: String::new(),
            created_at: now,
        }
    }

    /// Trim and lower-case a tenant domain; rejects empty or whitespace-bearing input.
    pub fn normalize_domain(raw: &str) -> Result<String, DomainError> {
        let domain = raw.trim().to_lowercase();
        if domain.is_empty() {
            return Err(DomainError::validation("tenant domain cannot be empty"));
        }
        if domain.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("tenant domain cannot contain whitespace"));
        }
        Ok(domain)
    }

    pub fn is_suspended(&self) -> bool {
        self.status == TenantStatus::Suspended
    }
}

impl Entity for Tenant {
    type Id = TenantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
