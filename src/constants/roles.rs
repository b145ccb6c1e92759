//! Role names as stored in user documents and JWT claims.

pub const ROLE_USER: &str = "user";
pub const ROLE_PUBLISHER: &str = "publisher";
pub const ROLE_ADMIN: &str = "admin";
