//! PostgreSQL implementation of the catalog repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{BestSeller, BrandOption, CategoryOption, DiscountedProduct, OrderStatus};
use crate::domain::repositories::{CatalogRepository, DiscountFilter};
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct DiscountedProductRow {
    product_id: i64,
    name: String,
    slug: String,
    image_url: Option<String>,
    brand_name: Option<String>,
    offer_id: i64,
    price: Decimal,
    discount_price: Decimal,
}

impl From<DiscountedProductRow> for DiscountedProduct {
    fn from(row: DiscountedProductRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            slug: row.slug,
            image_url: row.image_url,
            brand_name: row.brand_name,
            offer_id: row.offer_id,
            price: row.price,
            discount_price: row.discount_price,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BestSellerRow {
    product_id: i64,
    name: String,
    slug: String,
    image_url: Option<String>,
    price: Decimal,
    total_sold: i64,
}

impl From<BestSellerRow> for BestSeller {
    fn from(row: BestSellerRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            slug: row.slug,
            image_url: row.image_url,
            price: row.price,
            total_sold: row.total_sold,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BrandOptionRow {
    id: i64,
    name: String,
    slug: String,
    logo_url: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryOptionRow {
    id: i64,
    parent_id: Option<i64>,
    name: String,
    slug: String,
}

/// PostgreSQL repository for storefront catalog reads.
pub struct PgCatalogRepository {
    pool: Arc<PgPool>,
}

impl PgCatalogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn discounted_products(
        &self,
        filter: DiscountFilter,
    ) -> Result<Vec<DiscountedProduct>, AppError> {
        // One row per product: its offer with the deepest valid discount.
        let rows = sqlx::query_as::<_, DiscountedProductRow>(
            r#"
            WITH RECURSIVE category_scope AS (
                SELECT id FROM product_categories WHERE id = ANY($1::BIGINT[])
                UNION
                SELECT c.id
                FROM product_categories c
                JOIN category_scope s ON c.parent_id = s.id
            ),
            best_offer AS (
                SELECT DISTINCT ON (p.id)
                    p.id AS product_id,
                    p.name,
                    p.slug,
                    p.image_url,
                    b.name AS brand_name,
                    o.id AS offer_id,
                    o.price,
                    o.discount_price
                FROM products p
                JOIN vendor_offers o ON o.product_id = p.id AND o.is_deleted = FALSE
                LEFT JOIN brands b ON b.id = p.brand_id AND b.is_deleted = FALSE
                WHERE p.is_published = TRUE
                  AND p.is_deleted = FALSE
                  AND o.discount_price IS NOT NULL
                  AND o.discount_price > 0
                  AND o.discount_price < o.price
                  AND (o.discount_starts_at IS NULL OR o.discount_starts_at <= $2)
                  AND (o.discount_ends_at IS NULL OR o.discount_ends_at > $2)
                  AND (
                      cardinality($1::BIGINT[]) = 0
                      OR p.category_id IN (SELECT id FROM category_scope)
                  )
                ORDER BY p.id, (o.price - o.discount_price) / o.price DESC, o.id
            )
            SELECT product_id, name, slug, image_url, brand_name, offer_id, price, discount_price
            FROM best_offer
            ORDER BY (price - discount_price) / price DESC, product_id DESC
            LIMIT $3
            "#,
        )
        .bind(&filter.category_ids)
        .bind(filter.now)
        .bind(filter.limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn best_sellers(
        &self,
        statuses: Vec<OrderStatus>,
        limit: i64,
    ) -> Result<Vec<BestSeller>, AppError> {
        let statuses: Vec<String> = statuses.iter().map(ToString::to_string).collect();

        let rows = sqlx::query_as::<_, BestSellerRow>(
            r#"
            SELECT
                p.id AS product_id,
                p.name,
                p.slug,
                p.image_url,
                p.price,
                SUM(oi.quantity)::BIGINT AS total_sold
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE oi.is_deleted = FALSE
              AND o.is_deleted = FALSE
              AND o.status = ANY($1)
              AND p.is_published = TRUE
              AND p.is_deleted = FALSE
            GROUP BY p.id, p.name, p.slug, p.image_url, p.price
            ORDER BY total_sold DESC, p.id DESC
            LIMIT $2
            "#,
        )
        .bind(&statuses)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn brand_options(&self) -> Result<Vec<BrandOption>, AppError> {
        let rows = sqlx::query_as::<_, BrandOptionRow>(
            r#"
            SELECT id, name, slug, logo_url
            FROM brands
            WHERE is_active = TRUE AND is_deleted = FALSE
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| BrandOption {
                id: row.id,
                name: row.name,
                slug: row.slug,
                logo_url: row.logo_url,
            })
            .collect())
    }

    async fn category_options(&self) -> Result<Vec<CategoryOption>, AppError> {
        let rows = sqlx::query_as::<_, CategoryOptionRow>(
            r#"
            SELECT id, parent_id, name, slug
            FROM product_categories
            WHERE is_active = TRUE AND is_deleted = FALSE
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryOption {
                id: row.id,
                parent_id: row.parent_id,
                name: row.name,
                slug: row.slug,
            })
            .collect())
    }
}
