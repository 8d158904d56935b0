//! Shipping zones, rates and the priced options offered at checkout.

use rust_decimal::Decimal;

/// A geographic matching rule.
///
/// Unset (or blank) constraint fields match any value.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingZone {
    pub id: i64,
    pub name: String,
    pub country_code: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub sort_order: i32,
}

/// A method's price inside a zone, joined with its shipping method.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRate {
    pub id: i64,
    pub zone_id: i64,
    pub method_id: i64,
    pub method_name: String,
    pub method_code: String,
    pub method_is_deleted: bool,
    pub price: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub free_shipping_min_order_amount: Option<Decimal>,
    pub eta_days_min: Option<i32>,
    pub eta_days_max: Option<i32>,
    pub is_deleted: bool,
}

/// A rate that survived filtering, with its final price.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption {
    pub rate_id: i64,
    pub method_id: i64,
    pub method_name: String,
    pub method_code: String,
    pub base_price: Decimal,
    pub price: Decimal,
    pub is_free: bool,
    pub eta_days_min: Option<i32>,
    pub eta_days_max: Option<i32>,
}

/// Result of shipping resolution for one address and cart.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingQuote {
    pub zone: Option<ShippingZone>,
    pub order_amount: Decimal,
    pub options: Vec<ShippingOption>,
}
