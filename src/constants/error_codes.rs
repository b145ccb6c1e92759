//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_DUPLICATE_VALUE: &str = "DUPLICATE_VALUE";

// Authentication errors
pub const CODE_AUTH_REQUIRED: &str = "AUTH_REQUIRED";
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";
pub const CODE_INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";

// Authorization errors
pub const CODE_FORBIDDEN: &str = "FORBIDDEN";
pub const CODE_NOT_OWNER: &str = "NOT_OWNER";

// Resource errors
pub const CODE_RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
pub const CODE_BOOTCAMP_NOT_FOUND: &str = "BOOTCAMP_NOT_FOUND";
pub const CODE_COURSE_NOT_FOUND: &str = "COURSE_NOT_FOUND";
pub const CODE_REVIEW_NOT_FOUND: &str = "REVIEW_NOT_FOUND";
pub const CODE_USER_NOT_FOUND: &str = "USER_NOT_FOUND";
pub const CODE_BOOTCAMP_LIMIT: &str = "BOOTCAMP_LIMIT";

// Password errors
pub const CODE_WRONG_PASSWORD: &str = "WRONG_PASSWORD";

// Generic errors
pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
