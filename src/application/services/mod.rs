//! Business logic services for the application layer.

pub mod audit_service;
pub mod auth_service;
pub mod catalog_service;
pub mod checkout_service;
pub mod report_service;
pub mod storefront_service;

pub use audit_service::AuditService;
pub use auth_service::{AuthService, hash_token};
pub use catalog_service::CatalogService;
pub use checkout_service::CheckoutService;
pub use report_service::ReportService;
pub use storefront_service::StorefrontService;
