//! API-side authorization guard for privileged endpoints.

use warden_auth::{AuthzError, authorize_in_tenant};

use crate::context::{PrincipalContext, TenantContext};

/// Check that the caller holds `permission` within the request's tenant.
///
/// Call this **before** touching any repository on the caller's behalf.
pub fn require_permission(
    tenant: &TenantContext,
    principal: &PrincipalContext,
    permission: &str,
) -> Result<(), AuthzError> {
    authorize_in_tenant(principal.profile(), tenant.tenant_id(), permission)
}
