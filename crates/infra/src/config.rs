//! Process configuration loaded from the environment.

use std::net::SocketAddr;

use thiserror::Error;
use tracing::warn;

use warden_auth::AuthConfig;
use warden_core::Email;

const DEV_SECRET: &str = "development-secret-please-change";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Connection string handed to the persistence adapter.
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub jwt_secret: Vec<u8>,
    pub allowed_providers: Vec<String>,
    pub log_level: String,
    pub bcrypt_cost: u32,
    pub stamp_last_login_on_register: bool,
    /// Emails granted the `admin` role when they register. This is the only
    /// way the first administrator of a deployment comes into being.
    pub bootstrap_admins: Vec<Email>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, fallback: &str| lookup(key).unwrap_or_else(|| fallback.to_string());

        let bind_address = get("BIND_ADDRESS", "0.0.0.0:8080")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDRESS", e.to_string()))?;

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if secret.is_empty() => {
                return Err(ConfigError::invalid("JWT_SECRET", "must not be empty"));
            }
            Some(secret) => secret.into_bytes(),
            None => {
                warn!("JWT_SECRET not set; using insecure dev default");
                DEV_SECRET.as_bytes().to_vec()
            }
        };

        let allowed_providers: Vec<String> = get("ALLOWED_PROVIDERS", "local,ldap,oauth")
            .split(',')
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        let bcrypt_cost = get("BCRYPT_COST", &bcrypt_default_cost().to_string())
            .parse::<u32>()
            .map_err(|e| ConfigError::invalid("BCRYPT_COST", e.to_string()))?;

        let stamp_last_login_on_register = get("STAMP_LAST_LOGIN_ON_REGISTER", "true")
            .parse::<bool>()
            .map_err(|e| ConfigError::invalid("STAMP_LAST_LOGIN_ON_REGISTER", e.to_string()))?;

        let bootstrap_admins = get("BOOTSTRAP_ADMIN_EMAILS", "")
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|e| {
                Email::parse(e)
                    .map_err(|err| ConfigError::invalid("BOOTSTRAP_ADMIN_EMAILS", err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            database_url: get("DATABASE_URL", "memory://"),
            bind_address,
            jwt_secret,
            allowed_providers,
            log_level: get("LOG_LEVEL", "info"),
            bcrypt_cost,
            stamp_last_login_on_register,
            bootstrap_admins,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            signing_secret: self.jwt_secret.clone(),
            bcrypt_cost: self.bcrypt_cost,
            allowed_providers: self.allowed_providers.clone(),
            stamp_last_login_on_register: self.stamp_last_login_on_register,
        }
    }
}

fn bcrypt_default_cost() -> u32 {
    AuthConfig::default().bcrypt_cost
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .field("jwt_secret", &"<redacted>")
            .field("allowed_providers", &self.allowed_providers)
            .field("log_level", &self.log_level)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("stamp_last_login_on_register", &self.stamp_last_login_on_register)
            .field("bootstrap_admins", &self.bootstrap_admins)
            .finish()
    }
}
