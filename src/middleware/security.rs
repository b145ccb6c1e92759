//! Cross-origin access and hardening response headers.

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;

/// Any origin, method and header may call the API.
///
/// Usage:
/// ```ignore
/// App::new().wrap(Condition::new(CONFIG.cors_enabled, cors()))
/// ```
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Hardening headers added to every response.
///
/// No Content-Security-Policy is sent; the Swagger UI loads inline scripts.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Strict-Transport-Security", "max-age=15552000; includeSubDomains"))
        .add(("X-Download-Options", "noopen"))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Permitted-Cross-Domain-Policies", "none"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("X-XSS-Protection", "0"))
}
