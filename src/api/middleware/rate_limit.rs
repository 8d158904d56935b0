//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::api::middleware::client_ip;

/// Keys requests by client IP.
///
/// Requests whose IP cannot be determined share one bucket keyed by `0.0.0.0`.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &axum::http::Request<T>) -> Result<Self::Key, GovernorError> {
        Ok(
            client_ip::resolve(req.headers(), req.extensions(), self.behind_proxy)
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
        )
    }
}

pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Builds a limiter that refills one request every `replenish_ms` milliseconds.
fn build(behind_proxy: bool, replenish_ms: u64, burst_size: u32) -> RateLimitLayer {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor { behind_proxy })
        .per_millisecond(replenish_ms)
        .burst_size(burst_size)
        .finish()
        .expect("rate limiter config with positive period and burst is valid");

    GovernorLayer::new(Arc::new(governor_conf))
}

/// Creates a rate limiter for public storefront endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second (one every 500 ms)
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Per client IP; with `behind_proxy` the IP comes from `X-Forwarded-For` /
/// `X-Real-IP`, otherwise from the socket peer address.
pub fn layer(behind_proxy: bool) -> RateLimitLayer {
    build(behind_proxy, 500, 100)
}

/// Creates a stricter rate limiter for authenticated endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second (one every 1000 ms)
/// - **Burst**: 30 requests
pub fn secure_layer(behind_proxy: bool) -> RateLimitLayer {
    build(behind_proxy, 1000, 30)
}
