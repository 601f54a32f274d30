//! `warden-core`: identity domain foundation.
//!
//! Identifiers, entities and the storage-agnostic repository contract shared by
//! the credential engine and its adapters. No IO lives here.

pub mod email;
pub mod entity;
pub mod error;
pub mod id;
pub mod model;
pub mod repository;
pub mod value_object;

pub use email::Email;
pub use entity::Entity;
pub use error::DomainError;
pub use id::{PermissionId, RoleId, TenantId, UserId};
pub use model::{
    CredentialDigest, Permission, ProviderType, Role, Tenant, TenantStatus, User, UserProfile,
    UserStatus, WILDCARD_PERMISSION,
};
pub use repository::{RepositoryError, RepositoryResult, RoleRepository, TenantRepository, UserRepository};
pub use value_object::ValueObject;
