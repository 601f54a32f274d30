use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{PermissionId, RoleId};

/// Permission code granting everything.
pub const WILDCARD_PERMISSION: &str = "*";

/// A stable machine-keyed permission (e.g. `"users.read"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    /// Unique machine key.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Permission {
    pub fn is_wildcard(&self) -> bool {
        self.code == WILDCARD_PERMISSION
    }
}

/// Named permission bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Unique name.
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Whether this role grants `code`, directly or through the wildcard.
    pub fn grants(&self, code: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p.is_wildcard() || p.code == code)
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
