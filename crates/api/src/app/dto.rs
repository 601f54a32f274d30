use serde::{Deserialize, Serialize};

use warden_core::UserProfile;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub tenant_domain: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub tenant_id: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub tenant_id: String,
}

/// Identity resolved from a bearer token.
#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub user_id: String,
    pub tenant_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&UserProfile> for PrincipalResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user.id.to_string(),
            tenant_id: profile.tenant.id.to_string(),
            email: profile.user.email.to_string(),
            roles: profile.role_names(),
        }
    }
}
