//! Role/permission membership checks.
//!
//! Answers "does this user hold permission X" from a rehydrated profile. There
//! is no policy engine behind it: a permission is granted when one of the
//! user's roles lists it or lists the `"*"` wildcard.

use thiserror::Error;

use warden_core::{TenantId, UserProfile};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("tenant mismatch")]
    TenantMismatch,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a profile for `required`.
///
/// - No IO
/// - No panics
pub fn authorize(profile: &UserProfile, required: &str) -> Result<(), AuthzError> {
    if profile.has_permission(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.to_string()))
    }
}

/// Like [`authorize`], but also requires the profile to belong to `tenant_id`.
pub fn authorize_in_tenant(
    profile: &UserProfile,
    tenant_id: TenantId,
    required: &str,
) -> Result<(), AuthzError> {
    if profile.user.tenant_id != tenant_id || profile.tenant.id != tenant_id {
        return Err(AuthzError::TenantMismatch);
    }
    authorize(profile, required)
}
