//! Authentication error types.

use thiserror::Error;

use warden_core::{DomainError, RepositoryError};

use crate::credential::CredentialError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong email or password. Deliberately says nothing about which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    DuplicateUser,

    #[error("credential digest is malformed: {0}")]
    CredentialFormat(String),

    #[error("credential hashing failed: {0}")]
    CredentialEncoding(String),

    #[error("token signature is invalid")]
    TokenSignature,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token claim: {0}")]
    TokenClaim(String),

    #[error("user not found")]
    UserNotFound,

    #[error("user or tenant is not active")]
    TenantOrUserSuspended,

    #[error("role not found: {0}")]
    RoleNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("authentication provider not allowed: {0}")]
    ProviderNotAllowed(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Coarse bucket used by transports to pick a status without leaking detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Unauthenticated,
    Conflict,
    InvalidInput,
    NotFound,
    Internal,
}

impl AuthError {
    /// Wrap a repository failure that the caller has already ruled out as
    /// "not found".
    pub fn storage(err: RepositoryError) -> Self {
        Self::Storage(err.to_string())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::InvalidCredentials
            | AuthError::TokenSignature
            | AuthError::TokenExpired
            | AuthError::TokenClaim(_)
            | AuthError::UserNotFound
            | AuthError::TenantOrUserSuspended => ErrorClass::Unauthenticated,
            AuthError::DuplicateUser => ErrorClass::Conflict,
            AuthError::InvalidInput(_) | AuthError::ProviderNotAllowed(_) => {
                ErrorClass::InvalidInput
            }
            AuthError::RoleNotFound(_) => ErrorClass::NotFound,
            AuthError::CredentialFormat(_)
            | AuthError::CredentialEncoding(_)
            | AuthError::Storage(_) => ErrorClass::Internal,
        }
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                AuthError::InvalidInput(msg)
            }
        }
    }
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Format(msg) => AuthError::CredentialFormat(msg),
            CredentialError::Encoding(msg) => AuthError::CredentialEncoding(msg),
        }
    }
}
