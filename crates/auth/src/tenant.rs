//! Tenant resolution: find a tenant by domain or provision it.

use chrono::Utc;
use tracing::{debug, info};

use warden_core::{RepositoryError, Tenant, TenantId, TenantRepository, TenantStatus};

use crate::error::{AuthError, AuthResult};

/// Finds tenants by domain, provisioning unseen domains on demand.
#[derive(Debug, Clone)]
pub struct TenantResolver<T> {
    tenants: T,
}

impl<T: TenantRepository> TenantResolver<T> {
    pub fn new(tenants: T) -> Self {
        Self { tenants }
    }

    /// Look up `domain`, creating a `PROVISIONING` tenant only when the
    /// repository positively reports it absent.
    ///
    /// Storage failures during lookup propagate; they never trigger creation.
    pub fn resolve_or_provision(&self, domain: &str) -> AuthResult<Tenant> {
        let domain = Tenant::normalize_domain(domain)?;

        match self.tenants.find_by_domain(&domain) {
            Ok(tenant) => Ok(tenant),
            Err(RepositoryError::NotFound { .. }) => self.provision(domain),
            Err(e) => Err(AuthError::storage(e)),
        }
    }

    fn provision(&self, domain: String) -> AuthResult<Tenant> {
        let tenant = Tenant::provisioning(domain, Utc::now());

        match self.tenants.create(&tenant) {
            Ok(()) => {
                info!(tenant_id = %tenant.id, domain = %tenant.domain, "tenant provisioned");
                Ok(tenant)
            }
            // Another request provisioned the same domain first; use theirs.
            Err(e) if e.is_conflict() => {
                debug!(domain = %tenant.domain, "tenant provisioned concurrently");
                self.tenants
                    .find_by_domain(&tenant.domain)
                    .map_err(AuthError::storage)
            }
            Err(e) => Err(AuthError::storage(e)),
        }
    }

    /// Administrative status change (e.g. promote to `ACTIVE`, suspend).
    pub fn update_status(&self, tenant_id: TenantId, status: TenantStatus) -> AuthResult<()> {
        self.tenants
            .update_status(tenant_id, status)
            .map_err(|e| match e {
                RepositoryError::NotFound { .. } => {
                    AuthError::InvalidInput(format!("unknown tenant {tenant_id}"))
                }
                other => AuthError::storage(other),
            })?;
        info!(tenant_id = %tenant_id, status = %status, "tenant status updated");
        Ok(())
    }
}
