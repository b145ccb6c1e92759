use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::constants::{ROLE_ADMIN, ROLE_PUBLISHER, ROLE_USER};

/// User roles for role-based access control
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Publisher,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Publisher => ROLE_PUBLISHER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Roles a visitor may pick for themselves when registering.
    pub fn is_self_assignable(&self) -> bool {
        !self.is_admin()
    }
}

/// User document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// bcrypt hash, never returned to clients
    pub password: String,
    pub created_at: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Publisher).unwrap(), "publisher");
        let role: Role = serde_json::from_value(serde_json::json!("admin")).unwrap();
        assert!(role.is_admin());
        assert!(!role.is_self_assignable());
        assert!(Role::User.is_self_assignable());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(serde_json::from_value::<Role>(serde_json::json!("root")).is_err());
    }
}
