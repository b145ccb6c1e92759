//! Authentication request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Role;
use crate::validators::{validate_not_blank, validate_self_assignable_role};

/// Request payload for user registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    #[validate(custom(function = "validate_not_blank", message = "Please add a name"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User's email address
    #[validate(email(message = "Please add a valid email"))]
    #[schema(example = "john@gmail.com")]
    pub email: String,
    /// Password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "123456")]
    pub password: String,
    /// 'user' (default) or 'publisher'
    #[validate(custom(function = "validate_self_assignable_role"))]
    pub role: Option<Role>,
}

/// Request payload for user login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Please add a valid email"))]
    #[schema(example = "john@gmail.com")]
    pub email: String,
    /// User's password
    #[validate(length(min = 1, message = "Please provide a password"))]
    #[schema(example = "123456")]
    pub password: String,
}

/// Request payload for updating the caller's own name and email
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDetailsRequest {
    #[validate(custom(function = "validate_not_blank", message = "Please add a name"))]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[validate(email(message = "Please add a valid email"))]
    #[schema(example = "john@gmail.com")]
    pub email: Option<String>,
}

/// Request payload for changing the caller's password
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    /// Current password for verification
    #[validate(length(min = 1, message = "Please provide your current password"))]
    #[schema(example = "123456")]
    pub current_password: String,
    /// New password (minimum 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "1234567")]
    pub new_password: String,
}
