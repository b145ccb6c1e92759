//! Shared field validators.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::constants::ERR_INVALID_PHONE;

lazy_static! {
    /// Digits with optional `+`, spaces, dots, dashes and parentheses.
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9 ().\-]{7,20}$").expect("phone pattern is valid");
}

/// Custom validator for phone numbers.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_phone");
    error.message = Some(ERR_INVALID_PHONE.into());
    Err(error)
}

/// Reject strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(111) 111-1111").is_ok());
        assert!(validate_phone("+1 617.555.0100").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("123").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Devworks").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
