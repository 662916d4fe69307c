//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Requests per second replenished per client.
const PER_SECOND: u64 = 2;
/// Requests a client may burst before being throttled.
const BURST_SIZE: u32 = 100;

fn config<K: KeyExtractor>(extractor: K) -> Arc<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>> {
    Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(extractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    )
}

/// Creates a per-client rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be started with `into_make_service_with_connect_info`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    GovernorLayer::new(config(PeerIpKeyExtractor))
}

/// Same limits as [`layer`], keyed by `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded` with a fallback to the peer address.
///
/// Enable only behind a trusted reverse proxy (`BEHIND_PROXY=true`).
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    GovernorLayer::new(config(SmartIpKeyExtractor))
}
