//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod audit_logs;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod reports;
pub mod storefront;

pub use audit_logs::{audit_log_get_handler, audit_logs_list_handler};
pub use catalog::{
    amazing_products_handler, best_sellers_handler, brand_options_handler,
    category_options_handler,
};
pub use checkout::shipping_options_handler;
pub use health::health_handler;
pub use reports::reports_overview_handler;
pub use storefront::{
    home_banners_handler, home_layout_handler, quick_services_handler, settings_handler,
};
