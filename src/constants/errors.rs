//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Not authorized to access this route";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ERR_WRONG_PASSWORD: &str = "Password is incorrect";
pub const ERR_ACCOUNTS_UNAVAILABLE: &str = "Account lookup is not configured";

// Generic persistence errors
pub const ERR_RESOURCE_NOT_FOUND: &str = "Resource not found";
pub const ERR_DUPLICATE_VALUE: &str = "Duplicate value entered";
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";
pub const ERR_MISSING_INSERTED_ID: &str = "Database did not return an inserted id";

// Validation errors
pub const ERR_INVALID_ROLE: &str = "Role must be either 'user' or 'publisher'";
pub const ERR_INVALID_PHONE: &str = "Please add a valid phone number";
