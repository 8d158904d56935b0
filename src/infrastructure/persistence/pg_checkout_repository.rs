//! PostgreSQL implementation of the checkout repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Address, CartLine, ShippingRate, ShippingZone, VendorOffer};
use crate::domain::repositories::CheckoutRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i64,
    user_id: String,
    recipient_name: String,
    country_code: String,
    province: Option<String>,
    city: Option<String>,
    line1: String,
    postal_code: Option<String>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            recipient_name: row.recipient_name,
            country_code: row.country_code,
            province: row.province,
            city: row.city,
            line1: row.line1,
            postal_code: row.postal_code,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i64,
    quantity: i32,
    offer_id: i64,
    product_id: i64,
    price: Decimal,
    discount_price: Option<Decimal>,
    discount_starts_at: Option<DateTime<Utc>>,
    discount_ends_at: Option<DateTime<Utc>>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: row.id,
            quantity: row.quantity,
            offer: VendorOffer {
                id: row.offer_id,
                product_id: row.product_id,
                price: row.price,
                discount_price: row.discount_price,
                discount_starts_at: row.discount_starts_at,
                discount_ends_at: row.discount_ends_at,
            },
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ShippingZoneRow {
    id: i64,
    name: String,
    country_code: Option<String>,
    province: Option<String>,
    city: Option<String>,
    sort_order: i32,
}

impl From<ShippingZoneRow> for ShippingZone {
    fn from(row: ShippingZoneRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            country_code: row.country_code,
            province: row.province,
            city: row.city,
            sort_order: row.sort_order,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ShippingRateRow {
    id: i64,
    zone_id: i64,
    method_id: i64,
    method_name: String,
    method_code: String,
    method_is_deleted: bool,
    price: Decimal,
    min_order_amount: Option<Decimal>,
    free_shipping_min_order_amount: Option<Decimal>,
    eta_days_min: Option<i32>,
    eta_days_max: Option<i32>,
    is_deleted: bool,
}

impl From<ShippingRateRow> for ShippingRate {
    fn from(row: ShippingRateRow) -> Self {
        Self {
            id: row.id,
            zone_id: row.zone_id,
            method_id: row.method_id,
            method_name: row.method_name,
            method_code: row.method_code,
            method_is_deleted: row.method_is_deleted,
            price: row.price,
            min_order_amount: row.min_order_amount,
            free_shipping_min_order_amount: row.free_shipping_min_order_amount,
            eta_days_min: row.eta_days_min,
            eta_days_max: row.eta_days_max,
            is_deleted: row.is_deleted,
        }
    }
}

/// PostgreSQL repository for addresses, carts and shipping configuration.
pub struct PgCheckoutRepository {
    pool: Arc<PgPool>,
}

impl PgCheckoutRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckoutRepository for PgCheckoutRepository {
    async fn find_address(
        &self,
        address_id: i64,
        user_id: &str,
    ) -> Result<Option<Address>, AppError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, user_id, recipient_name, country_code, province, city, line1, postal_code
            FROM addresses
            WHERE id = $1 AND user_id = $2 AND is_deleted = FALSE
            "#,
        )
        .bind(address_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn cart_lines(&self, user_id: &str) -> Result<Vec<CartLine>, AppError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT
                ci.id,
                ci.quantity,
                vo.id AS offer_id,
                vo.product_id,
                vo.price,
                vo.discount_price,
                vo.discount_starts_at,
                vo.discount_ends_at
            FROM carts c
            JOIN cart_items ci ON ci.cart_id = c.id
            JOIN vendor_offers vo ON vo.id = ci.vendor_offer_id
            WHERE c.user_id = $1
              AND ci.is_deleted = FALSE
              AND vo.is_deleted = FALSE
            ORDER BY ci.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn active_zones(&self) -> Result<Vec<ShippingZone>, AppError> {
        let rows = sqlx::query_as::<_, ShippingZoneRow>(
            r#"
            SELECT id, name, country_code, province, city, sort_order
            FROM shipping_zones
            WHERE is_active = TRUE AND is_deleted = FALSE
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn zone_rates(&self, zone_id: i64) -> Result<Vec<ShippingRate>, AppError> {
        let rows = sqlx::query_as::<_, ShippingRateRow>(
            r#"
            SELECT
                r.id,
                r.zone_id,
                r.method_id,
                m.name AS method_name,
                m.code AS method_code,
                m.is_deleted AS method_is_deleted,
                r.price,
                r.min_order_amount,
                r.free_shipping_min_order_amount,
                r.eta_days_min,
                r.eta_days_max,
                r.is_deleted
            FROM shipping_rates r
            JOIN shipping_methods m ON m.id = r.method_id
            WHERE r.zone_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(zone_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
