//! Global rate limiting for the whole API.
//!
//! Every peer IP gets a bucket of `RATE_LIMIT_BURST` requests that refills
//! completely over `RATE_LIMIT_WINDOW_SECS`.

use actix_governor::{GovernorConfig, GovernorConfigBuilder};

use crate::config::CONFIG;

/// Build the governor configuration applied to every route.
///
/// Usage:
/// ```ignore
/// let config = create_rate_limiter_config();
/// App::new().wrap(Governor::new(&config))
/// ```
pub fn create_rate_limiter_config() -> GovernorConfig<
    actix_governor::PeerIpKeyExtractor,
    actix_governor::governor::middleware::NoOpMiddleware<
        actix_governor::governor::clock::QuantaInstant,
    >,
> {
    let burst = CONFIG.rate_limit_burst.max(1);
    let replenish_secs = (CONFIG.rate_limit_window_secs / burst as u64).max(1);

    GovernorConfigBuilder::default()
        .seconds_per_request(replenish_secs) // 600s / 100 requests = one every 6 seconds
        .burst_size(burst)
        .finish()
        .expect("Failed to create rate limiter config")
}
