//! PostgreSQL implementation of the storefront content repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{HomeBanner, HomeSection, QuickService, StoreSettings};
use crate::domain::repositories::StorefrontRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct HomeBannerRow {
    id: i64,
    title: String,
    subtitle: Option<String>,
    image_url: String,
    link_url: Option<String>,
    placement: String,
    sort_order: i32,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
}

impl From<HomeBannerRow> for HomeBanner {
    fn from(row: HomeBannerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            image_url: row.image_url,
            link_url: row.link_url,
            placement: row.placement,
            sort_order: row.sort_order,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct QuickServiceRow {
    id: i64,
    title: String,
    icon_url: Option<String>,
    link_url: Option<String>,
    sort_order: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct HomeSectionRow {
    section_key: String,
    title: Option<String>,
    section_type: String,
    item_limit: Option<i32>,
    sort_order: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct StoreSettingsRow {
    store_name: String,
    support_email: Option<String>,
    support_phone: Option<String>,
    currency_code: String,
    logo_url: Option<String>,
    maintenance_mode: bool,
}

/// PostgreSQL repository for home page content.
pub struct PgStorefrontRepository {
    pool: Arc<PgPool>,
}

impl PgStorefrontRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorefrontRepository for PgStorefrontRepository {
    async fn home_banners(
        &self,
        placement: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<HomeBanner>, AppError> {
        let rows = sqlx::query_as::<_, HomeBannerRow>(
            r#"
            SELECT id, title, subtitle, image_url, link_url, placement, sort_order, starts_at, ends_at
            FROM home_banners
            WHERE is_active = TRUE
              AND is_deleted = FALSE
              AND ($1::TEXT IS NULL OR placement = $1)
              AND (starts_at IS NULL OR starts_at <= $2)
              AND (ends_at IS NULL OR ends_at > $2)
            ORDER BY sort_order, id
            "#,
        )
        .bind(placement)
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn quick_services(&self) -> Result<Vec<QuickService>, AppError> {
        let rows = sqlx::query_as::<_, QuickServiceRow>(
            r#"
            SELECT id, title, icon_url, link_url, sort_order
            FROM quick_services
            WHERE is_active = TRUE AND is_deleted = FALSE
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| QuickService {
                id: row.id,
                title: row.title,
                icon_url: row.icon_url,
                link_url: row.link_url,
                sort_order: row.sort_order,
            })
            .collect())
    }

    async fn home_sections(&self) -> Result<Vec<HomeSection>, AppError> {
        let rows = sqlx::query_as::<_, HomeSectionRow>(
            r#"
            SELECT section_key, title, section_type, item_limit, sort_order
            FROM home_layout_sections
            WHERE is_active = TRUE
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| HomeSection {
                key: row.section_key,
                title: row.title,
                section_type: row.section_type,
                item_limit: row.item_limit,
                sort_order: row.sort_order,
            })
            .collect())
    }

    async fn store_settings(&self) -> Result<Option<StoreSettings>, AppError> {
        let row = sqlx::query_as::<_, StoreSettingsRow>(
            r#"
            SELECT store_name, support_email, support_phone, currency_code, logo_url, maintenance_mode
            FROM store_settings
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| StoreSettings {
            store_name: r.store_name,
            support_email: r.support_email,
            support_phone: r.support_phone,
            currency_code: r.currency_code,
            logo_url: r.logo_url,
            maintenance_mode: r.maintenance_mode,
        }))
    }
}
