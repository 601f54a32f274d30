//! Login and bearer-token validation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use warden_core::{Email, RepositoryError, User, UserProfile, UserRepository};

use crate::credential::CredentialCodec;
use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;

/// Successful login result.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// The user as it was before `last_login` was bumped.
    pub user: User,
    /// Signed bearer token.
    pub token: String,
}

pub struct AuthenticationService<U> {
    users: U,
    codec: Arc<CredentialCodec>,
    tokens: TokenService,
}

impl<U: UserRepository> AuthenticationService<U> {
    pub fn new(users: U, codec: Arc<CredentialCodec>, tokens: TokenService) -> Self {
        Self {
            users,
            codec,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verify email + password and issue a bearer token.
    ///
    /// Every failure up to and including the password check is reported as
    /// [`AuthError::InvalidCredentials`], and a missing account still pays for a
    /// full hash verification.
    #[instrument(skip_all)]
    pub fn authenticate(&self, email: &str, password: &str) -> AuthResult<Authenticated> {
        let Some(user) = self.lookup(email) else {
            self.codec.verify_decoy(password);
            return Err(AuthError::InvalidCredentials);
        };

        match self.codec.verify(password, &user.password_digest) {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidCredentials),
            Err(e) => {
                error!(user_id = %user.id, error = %e, "stored credential digest is unreadable");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let token = self.tokens.issue(&user)?;

        let mut updated = user.clone();
        updated.last_login = Some(Utc::now());
        if let Err(e) = self.users.update(&updated) {
            warn!(user_id = %user.id, error = %e, "failed to record last login");
        }

        info!(user_id = %user.id, tenant_id = %user.tenant_id, "user authenticated");
        Ok(Authenticated { user, token })
    }

    /// Resolve a bearer token to the current state of its subject.
    ///
    /// The token only names the user; status, tenant and roles are re-read so
    /// that suspensions take effect for tokens that have not yet expired.
    pub fn validate_bearer(&self, token: &str) -> AuthResult<UserProfile> {
        let user_id = self.tokens.validate(token)?;

        let profile = self.users.find_by_id(user_id).map_err(|e| match e {
            RepositoryError::NotFound { .. } => AuthError::UserNotFound,
            other => AuthError::storage(other),
        })?;

        if !profile.user.is_active() || profile.tenant.is_suspended() {
            return Err(AuthError::TenantOrUserSuspended);
        }

        Ok(profile)
    }

    fn lookup(&self, email: &str) -> Option<User> {
        let email = Email::parse(email).ok()?;
        match self.users.find_by_email(&email) {
            Ok(user) => Some(user),
            Err(RepositoryError::NotFound { .. }) => None,
            Err(e) => {
                warn!(error = %e, "user lookup failed during login");
                None
            }
        }
    }
}
