use warden_core::{TenantId, UserId, UserProfile};

/// Tenant context for a request.
///
/// Derived from the bearer token's subject, never from request input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self { tenant_id }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Principal context for a request: the freshly re-read profile of the
/// token's subject.
#[derive(Debug, Clone)]
pub struct PrincipalContext {
    profile: UserProfile,
}

impl PrincipalContext {
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    pub fn user_id(&self) -> UserId {
        self.profile.user.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}
