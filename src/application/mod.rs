//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and business rules. Services consume repository traits and provide a clean
//! API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::catalog_service::CatalogService`] - Amazing products, best sellers, options
//! - [`services::storefront_service::StorefrontService`] - Banners, quick services, layout, settings
//! - [`services::checkout_service::CheckoutService`] - Shipping options for a cart
//! - [`services::audit_service::AuditService`] - Audit log browsing
//! - [`services::report_service::ReportService`] - Admin traffic overview
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
