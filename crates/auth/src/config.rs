//! Authentication configuration.

use warden_core::ProviderType;

/// Configuration for the credential engine.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA-256 signing secret. Never logged.
    pub signing_secret: Vec<u8>,
    /// bcrypt work factor (4..=31).
    pub bcrypt_cost: u32,
    /// Providers registration may create users for (e.g. `local`, `ldap`).
    pub allowed_providers: Vec<String>,
    /// Set `last_login` to the registration instant.
    ///
    /// On by default to match the behaviour existing deployments rely on;
    /// registration is not a login, so new deployments may want this off.
    pub stamp_last_login_on_register: bool,
}

impl AuthConfig {
    pub fn new(signing_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            ..Self::default()
        }
    }

    pub fn allows_provider(&self, provider: &ProviderType) -> bool {
        self.allowed_providers
            .iter()
            .any(|p| p.trim().eq_ignore_ascii_case(provider.as_str()))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_secret: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allowed_providers: vec![ProviderType::LOCAL.to_string()],
            stamp_last_login_on_register: true,
        }
    }
}

impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("allowed_providers", &self.allowed_providers)
            .field("stamp_last_login_on_register", &self.stamp_last_login_on_register)
            .finish()
    }
}
