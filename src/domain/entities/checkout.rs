//! Checkout entities: destination addresses and cart lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::catalog::VendorOffer;

/// A customer's saved shipping address.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: i64,
    pub user_id: String,
    pub recipient_name: String,
    pub country_code: String,
    pub province: Option<String>,
    pub city: Option<String>,
    pub line1: String,
    pub postal_code: Option<String>,
}

/// One non-deleted item in a customer's cart, priced through its vendor offer.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: i64,
    pub quantity: i32,
    pub offer: VendorOffer,
}

impl CartLine {
    /// Unit price multiplied by quantity at `now`.
    pub fn line_total(&self, now: DateTime<Utc>) -> Decimal {
        self.offer.effective_price(now) * Decimal::from(self.quantity)
    }
}

/// Sums every line's total; an empty slice yields zero.
pub fn order_amount(lines: &[CartLine], now: DateTime<Utc>) -> Decimal {
    lines.iter().map(|line| line.line_total(now)).sum()
}
