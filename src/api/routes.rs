//! API route configuration.
//!
//! Three route groups share the `/api` prefix:
//!
//! - `/api/public`   - anonymous storefront reads
//! - `/api/checkout` - Bearer token required
//! - `/api/admin`    - Bearer token plus a named permission per route

use crate::api::handlers::{
    amazing_products_handler, audit_log_get_handler, audit_logs_list_handler,
    best_sellers_handler, brand_options_handler, category_options_handler, home_banners_handler,
    home_layout_handler, quick_services_handler, reports_overview_handler, settings_handler,
    shipping_options_handler,
};
use crate::api::middleware::auth;
use crate::domain::entities::permissions;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

/// Anonymous storefront routes.
///
/// # Endpoints
///
/// - `GET /amazing-products`            - Deepest current discounts
/// - `GET /best-selling-products`       - Products ranked by units sold
/// - `GET /home-layout`                 - Home page sections
/// - `GET /home-banners`                - Scheduled banners
/// - `GET /quick-services`              - Quick service shortcuts
/// - `GET /brands/options`              - Brand filter options
/// - `GET /productCategories/options`   - Category filter options
/// - `GET /settings`                    - Store settings
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/amazing-products", get(amazing_products_handler))
        .route("/best-selling-products", get(best_sellers_handler))
        .route("/home-layout", get(home_layout_handler))
        .route("/home-banners", get(home_banners_handler))
        .route("/quick-services", get(quick_services_handler))
        .route("/brands/options", get(brand_options_handler))
        .route("/productCategories/options", get(category_options_handler))
        .route("/settings", get(settings_handler))
}

/// Checkout routes for any authenticated caller.
///
/// # Endpoints
///
/// - `GET /shipping-options` - Priced shipping options for the caller's cart
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/shipping-options", get(shipping_options_handler))
}

/// Admin routes, each guarded by its permission.
///
/// # Endpoints
///
/// - `GET /audit-logs`        - Paginated audit trail (`audit_logs.read`)
/// - `GET /audit-logs/{id}`   - One audit entry (`audit_logs.read`)
/// - `GET /reports/overview`  - Traffic overview (`reports.read`)
pub fn admin_routes() -> Router<AppState> {
    let audit_logs = Router::new()
        .route("/audit-logs", get(audit_logs_list_handler))
        .route("/audit-logs/{id}", get(audit_log_get_handler))
        .route_layer(middleware::from_fn_with_state(
            permissions::AUDIT_LOGS_READ,
            auth::require_permission,
        ));

    let reports = Router::new()
        .route("/reports/overview", get(reports_overview_handler))
        .route_layer(middleware::from_fn_with_state(
            permissions::REPORTS_READ,
            auth::require_permission,
        ));

    Router::new().merge(audit_logs).merge(reports)
}
