//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgCatalogRepository`] - Discounted products, best sellers, brand/category options
//! - [`PgStorefrontRepository`] - Banners, quick services, home layout, settings
//! - [`PgCheckoutRepository`] - Addresses, cart lines, shipping zones and rates
//! - [`PgAuditRepository`] - Audit trail and report aggregates
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_audit_repository;
pub mod pg_catalog_repository;
pub mod pg_checkout_repository;
pub mod pg_storefront_repository;
pub mod pg_token_repository;

pub use pg_audit_repository::PgAuditRepository;
pub use pg_catalog_repository::PgCatalogRepository;
pub use pg_checkout_repository::PgCheckoutRepository;
pub use pg_storefront_repository::PgStorefrontRepository;
pub use pg_token_repository::PgTokenRepository;
