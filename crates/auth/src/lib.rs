//! `warden-auth`: credential and token lifecycle engine.
//!
//! Password hashing, tenant provisioning on registration, login, and stateless
//! bearer-token validation. Storage is reached only through the
//! `warden-core` repository traits; transport lives elsewhere.

pub mod authentication;
pub mod authorize;
pub mod config;
pub mod credential;
pub mod error;
pub mod registration;
pub mod roles;
pub mod tenant;
pub mod token;

pub use authentication::{Authenticated, AuthenticationService};
pub use authorize::{AuthzError, authorize, authorize_in_tenant};
pub use config::AuthConfig;
pub use credential::{CredentialCodec, CredentialError};
pub use error::{AuthError, AuthResult, ErrorClass};
pub use registration::RegistrationService;
pub use roles::RoleAssignment;
pub use tenant::TenantResolver;
pub use token::{TOKEN_LIFETIME_HOURS, TokenClaims, TokenService, validate_claims};
