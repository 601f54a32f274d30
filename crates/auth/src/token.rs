//! Stateless HS256 bearer tokens.
//!
//! A token asserts `{sub, email, tenant_id, iat, exp}` and is valid purely as a
//! function of its signature and expiry. There is no revocation: a token stays
//! valid until `exp` even if the account is suspended meanwhile, which is why
//! [`crate::AuthenticationService::validate_bearer`] re-reads the user.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use warden_core::{User, UserId};

use crate::error::{AuthError, AuthResult};

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user ID as a UUID string.
    pub sub: String,
    pub email: String,
    /// Tenant ID (UUID string).
    pub tenant_id: String,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Bearer tokens expire this long after issue. Not configurable; there is no
/// refresh.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Check the time window of already-verified claims.
///
/// Zero leeway: a token is expired from the second `exp` is reached.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> AuthResult<()> {
    if claims.exp <= claims.iat {
        return Err(AuthError::TokenClaim("invalid time window (exp <= iat)".into()));
    }
    if now.timestamp() >= claims.exp {
        return Err(AuthError::TokenExpired);
    }
    Ok(())
}

/// Issues and validates bearer tokens with a fixed symmetric secret.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    pub fn issue(&self, user: &User) -> AuthResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if the current instant were `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = TokenClaims {
            sub: user.id.to_string(),
            email: user.email.to_string(),
            tenant_id: user.tenant_id.to_string(),
            iat,
            exp: iat + self.lifetime.num_seconds(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::CredentialEncoding(format!("token signing failed: {e}")))
    }

    /// Validate a token and return its subject.
    ///
    /// Token contents are not a cache of user state; callers re-fetch the user.
    pub fn validate(&self, token: &str) -> AuthResult<UserId> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<UserId> {
        let claims = self.decode_at(token, now)?;
        claims
            .sub
            .parse::<UserId>()
            .map_err(|e| AuthError::TokenClaim(format!("sub: {e}")))
    }

    /// Verify signature and expiry and return the full claim set.
    ///
    /// Signature is checked before anything inside the payload is trusted, so
    /// a token signed with another secret is `TokenSignature` even when its
    /// `exp` has passed.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let payload = jsonwebtoken::decode::<serde_json::Value>(token, &self.decoding, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AuthError::TokenSignature
            })?
            .claims;

        let claims: TokenClaims = serde_json::from_value(payload)
            .map_err(|e| AuthError::TokenClaim(e.to_string()))?;

        validate_claims(&claims, now)?;
        Ok(claims)
    }
}

impl core::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
