//! Request middleware and the authorization policy applied by handlers.

pub mod auth_helpers;
pub mod auth_middleware;
pub mod rate_limiter;
pub mod security;

pub use auth_helpers::*;
pub use auth_middleware::AuthMiddleware;
pub use rate_limiter::create_rate_limiter_config;
pub use security::{cors, security_headers};
