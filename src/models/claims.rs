//! JWT Claims model.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::constants::{CODE_INVALID_TOKEN, ERR_INVALID_TOKEN, ROLE_ADMIN};
use crate::errors::ApiError;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String, // user/publisher/admin
    pub exp: usize,   // expiration timestamp
    pub iat: usize,   // issued at timestamp
}

impl Claims {
    /// Check if the claims belong to an admin user
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Check if the claims belong to the specified user
    pub fn is_user(&self, user_id: &ObjectId) -> bool {
        self.sub == user_id.to_hex()
    }

    pub fn has_role(&self, roles: &[&str]) -> bool {
        roles.contains(&self.role.as_str())
    }

    /// The caller's id as stored in documents.
    pub fn user_id(&self) -> Result<ObjectId, ApiError> {
        ObjectId::parse_str(&self.sub)
            .map_err(|_| ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN))
    }
}
