//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, permission checks, rate limiting, audit capture and
//! observability middleware.

pub mod audit;
pub mod auth;
pub mod client_ip;
pub mod rate_limit;
pub mod tracing;
