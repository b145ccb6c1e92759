//! User-related custom validators.

use validator::ValidationError;

use crate::constants::ERR_INVALID_ROLE;
use crate::models::Role;

/// Custom validator for the role picked at registration.
/// Only 'user' and 'publisher' may be chosen; admins are appointed by admins.
pub fn validate_self_assignable_role(role: &Role) -> Result<(), ValidationError> {
    if role.is_self_assignable() {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_role");
    error.message = Some(ERR_INVALID_ROLE.into());
    Err(error)
}
