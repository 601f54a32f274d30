//! In-memory repository adapter for tests/dev.
//!
//! One store backs all three repository traits so that `find_by_id` can
//! rehydrate a user's tenant and roles. Uniqueness keys (email, tenant domain,
//! role name) are enforced under the write lock, which makes each insert
//! atomic with respect to concurrent registrations.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use warden_core::{
    Email, Entity, RepositoryError, RepositoryResult, Role, RoleId, RoleRepository, Tenant, TenantId,
    TenantRepository, TenantStatus, User, UserId, UserProfile, UserRepository,
};

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    users_by_email: HashMap<Email, UserId>,
    tenants: HashMap<TenantId, Tenant>,
    tenants_by_domain: HashMap<String, TenantId>,
    roles: HashMap<RoleId, Role>,
    roles_by_name: HashMap<String, RoleId>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed role definitions; names must be unique.
    pub fn insert_role(&self, role: Role) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.roles_by_name.contains_key(&role.name) {
            return Err(RepositoryError::conflict("role", &role.name));
        }
        let id = *role.id();
        state.roles_by_name.insert(role.name.clone(), id);
        state.roles.insert(id, role);
        Ok(())
    }

    pub fn tenant_count(&self) -> usize {
        self.read().map(|s| s.tenants.len()).unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.read().map(|s| s.users.len()).unwrap_or_default()
    }

    pub fn tenant(&self, id: TenantId) -> Option<Tenant> {
        self.read().ok()?.tenants.get(&id).cloned()
    }

    /// Administrative removal; tokens already issued to the user stay signed
    /// but no longer resolve.
    pub fn remove_user(&self, id: UserId) -> RepositoryResult<User> {
        let mut state = self.write()?;
        let user = state
            .users
            .remove(&id)
            .ok_or_else(|| RepositoryError::not_found("user", id.to_string()))?;
        state.users_by_email.remove(&user.email);
        Ok(user)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, State>> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::storage("in-memory store lock poisoned"))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, State>> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::storage("in-memory store lock poisoned"))
    }
}

impl UserRepository for InMemoryStore {
    fn find_by_email(&self, email: &Email) -> RepositoryResult<User> {
        let state = self.read()?;
        state
            .users_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("user", email.as_str()))
    }

    fn find_by_id(&self, id: UserId) -> RepositoryResult<UserProfile> {
        let state = self.read()?;
        let user = state
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("user", id.to_string()))?;

        let tenant = state.tenants.get(&user.tenant_id).cloned().ok_or_else(|| {
            RepositoryError::storage(format!(
                "user {} references missing tenant {}",
                user.id, user.tenant_id
            ))
        })?;

        let roles = user
            .roles
            .iter()
            .filter_map(|role_id| state.roles.get(role_id).cloned())
            .collect();

        Ok(UserProfile { user, tenant, roles })
    }

    fn create(&self, user: &User) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.users_by_email.contains_key(&user.email) {
            return Err(RepositoryError::conflict("user", user.email.as_str()));
        }
        if !state.tenants.contains_key(&user.tenant_id) {
            return Err(RepositoryError::storage(format!(
                "tenant {} does not exist",
                user.tenant_id
            )));
        }

        state.users_by_email.insert(user.email.clone(), *user.id());
        state.users.insert(*user.id(), user.clone());
        Ok(())
    }

    fn update(&self, user: &User) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let previous_email = match state.users.get(&user.id) {
            Some(existing) => existing.email.clone(),
            None => return Err(RepositoryError::not_found("user", user.id.to_string())),
        };

        if previous_email != user.email {
            if state.users_by_email.contains_key(&user.email) {
                return Err(RepositoryError::conflict("user", user.email.as_str()));
            }
            state.users_by_email.remove(&previous_email);
            state.users_by_email.insert(user.email.clone(), user.id);
        }

        state.users.insert(user.id, user.clone());
        Ok(())
    }
}

impl TenantRepository for InMemoryStore {
    fn find_by_domain(&self, domain: &str) -> RepositoryResult<Tenant> {
        let state = self.read()?;
        state
            .tenants_by_domain
            .get(domain)
            .and_then(|id| state.tenants.get(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("tenant", domain))
    }

    fn create(&self, tenant: &Tenant) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.tenants_by_domain.contains_key(&tenant.domain) {
            return Err(RepositoryError::conflict("tenant", &tenant.domain));
        }

        state
            .tenants_by_domain
            .insert(tenant.domain.clone(), *tenant.id());
        state.tenants.insert(*tenant.id(), tenant.clone());
        Ok(())
    }

    fn update_status(&self, id: TenantId, status: TenantStatus) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let tenant = state
            .tenants
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("tenant", id.to_string()))?;
        tenant.status = status;
        Ok(())
    }
}

impl RoleRepository for InMemoryStore {
    fn find_by_name(&self, name: &str) -> RepositoryResult<Role> {
        let state = self.read()?;
        state
            .roles_by_name
            .get(name)
            .and_then(|id| state.roles.get(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("role", name))
    }

    fn assign_to_user(&self, user_id: UserId, role_id: RoleId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.roles.contains_key(&role_id) {
            return Err(RepositoryError::not_found("role", role_id.to_string()));
        }
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| RepositoryError::not_found("user", user_id.to_string()))?;
        user.grant_role(role_id);
        Ok(())
    }
}
