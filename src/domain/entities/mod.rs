//! Core domain entities representing the storefront data model.
//!
//! Entities are plain data structures; the few rules that belong to a single
//! record (discount validity, line totals) live next to them.
//!
//! # Entity Types
//!
//! - [`catalog`] - Vendor offers, discounted products, best sellers, brand/category options
//! - [`checkout`] - Addresses and cart lines
//! - [`shipping`] - Zones, rates and priced options
//! - [`storefront`] - Banners, quick services, home layout, store settings
//! - [`audit`] - Request audit trail and report aggregates
//! - [`order`] - Order status values
//! - [`principal`] - Authenticated caller and permissions

pub mod audit;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod principal;
pub mod shipping;
pub mod storefront;

pub use audit::{
    AuditLog, NewAuditLog, RankedCount, ReportWindow, RequestCounts, WindowReport,
};
pub use catalog::{BestSeller, BrandOption, CategoryOption, DiscountedProduct, VendorOffer};
pub use checkout::{Address, CartLine, order_amount};
pub use order::OrderStatus;
pub use principal::{Principal, permissions};
pub use shipping::{ShippingOption, ShippingQuote, ShippingRate, ShippingZone};
pub use storefront::{HomeBanner, HomeSection, QuickService, StoreSettings};
