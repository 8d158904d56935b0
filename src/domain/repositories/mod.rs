//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CatalogRepository`] - Discounted products, best sellers, brand/category options
//! - [`StorefrontRepository`] - Banners, quick services, home layout, settings
//! - [`CheckoutRepository`] - Addresses, cart lines, shipping zones and rates
//! - [`AuditRepository`] - Audit trail storage, listing and report aggregates
//! - [`TokenRepository`] - API token authentication

pub mod audit_repository;
pub mod catalog_repository;
pub mod checkout_repository;
pub mod storefront_repository;
pub mod token_repository;

pub use audit_repository::{AuditLogFilter, AuditRepository};
pub use catalog_repository::{CatalogRepository, DiscountFilter};
pub use checkout_repository::CheckoutRepository;
pub use storefront_repository::StorefrontRepository;
pub use token_repository::{ApiToken, NewApiToken, TokenRepository};

#[cfg(test)]
pub use audit_repository::MockAuditRepository;
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use checkout_repository::MockCheckoutRepository;
#[cfg(test)]
pub use storefront_repository::MockStorefrontRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
