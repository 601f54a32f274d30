//! Identity entities: users, tenants, roles and permissions.

pub mod role;
pub mod tenant;
pub mod user;

pub use role::{Permission, Role, WILDCARD_PERMISSION};
pub use tenant::{Tenant, TenantStatus};
pub use user::{CredentialDigest, ProviderType, User, UserProfile, UserStatus};
