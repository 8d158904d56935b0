//! Catalog entities: products, vendor offers, brands and categories.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A seller's price listing for a product.
///
/// The discounted price only applies while it is positive, below the list
/// price and inside the optional `[discount_starts_at, discount_ends_at)` window.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorOffer {
    pub id: i64,
    pub product_id: i64,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub discount_starts_at: Option<DateTime<Utc>>,
    pub discount_ends_at: Option<DateTime<Utc>>,
}

impl VendorOffer {
    /// Returns the discounted price if it is currently valid.
    pub fn active_discount(&self, now: DateTime<Utc>) -> Option<Decimal> {
        let discount = self.discount_price?;

        if discount <= Decimal::ZERO || discount >= self.price {
            return None;
        }
        if self.discount_starts_at.is_some_and(|start| now < start) {
            return None;
        }
        if self.discount_ends_at.is_some_and(|end| now >= end) {
            return None;
        }

        Some(discount)
    }

    /// Price a buyer pays per unit right now.
    pub fn effective_price(&self, now: DateTime<Utc>) -> Decimal {
        self.active_discount(now).unwrap_or(self.price)
    }
}

/// A published product paired with the discount it currently carries.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedProduct {
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub brand_name: Option<String>,
    pub offer_id: i64,
    pub price: Decimal,
    pub discount_price: Decimal,
}

impl DiscountedProduct {
    /// Fraction of the list price taken off; zero for a non-positive list price.
    pub fn discount_ratio(&self) -> Decimal {
        if self.price <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.price - self.discount_price) / self.price
    }

    /// Discount relative to the list price, in percent rounded to two decimals.
    pub fn discount_percent(&self) -> Decimal {
        (self.discount_ratio() * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// True when the discount price is strictly between zero and the list price.
    pub fn has_positive_discount(&self) -> bool {
        self.discount_price > Decimal::ZERO && self.discount_price < self.price
    }
}

/// A product ranked by units sold.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSeller {
    pub product_id: i64,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub total_sold: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandOption {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOption {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn offer(price: i64, discount: Option<i64>) -> VendorOffer {
        VendorOffer {
            id: 1,
            product_id: 10,
            price: Decimal::from(price),
            discount_price: discount.map(Decimal::from),
            discount_starts_at: None,
            discount_ends_at: None,
        }
    }

    #[test]
    fn test_active_discount_valid() {
        let now = Utc::now();
        assert_eq!(offer(100, Some(80)).active_discount(now), Some(Decimal::from(80)));
        assert_eq!(offer(100, Some(80)).effective_price(now), Decimal::from(80));
    }

    #[test]
    fn test_discount_not_below_price_is_ignored() {
        let now = Utc::now();
        assert_eq!(offer(100, Some(100)).active_discount(now), None);
        assert_eq!(offer(100, Some(120)).active_discount(now), None);
        assert_eq!(offer(100, Some(0)).active_discount(now), None);
        assert_eq!(offer(100, None).effective_price(now), Decimal::from(100));
    }

    #[test]
    fn test_discount_window() {
        let now = Utc::now();
        let mut scheduled = offer(100, Some(70));
        scheduled.discount_starts_at = Some(now + Duration::hours(1));
        assert_eq!(scheduled.active_discount(now), None);

        let mut expired = offer(100, Some(70));
        expired.discount_ends_at = Some(now);
        assert_eq!(expired.active_discount(now), None);

        let mut running = offer(100, Some(70));
        running.discount_starts_at = Some(now - Duration::hours(1));
        running.discount_ends_at = Some(now + Duration::hours(1));
        assert_eq!(running.active_discount(now), Some(Decimal::from(70)));
    }

    #[test]
    fn test_discount_percent() {
        let product = DiscountedProduct {
            product_id: 1,
            name: "Kettle".to_string(),
            slug: "kettle".to_string(),
            image_url: None,
            brand_name: None,
            offer_id: 3,
            price: Decimal::from(80),
            discount_price: Decimal::from(60),
        };
        assert_eq!(product.discount_percent(), Decimal::from(25));
        assert!(product.has_positive_discount());
    }
}
