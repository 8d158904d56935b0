//! Repository trait for catalog reads.

use crate::domain::entities::{BestSeller, BrandOption, CategoryOption, DiscountedProduct, OrderStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Filter for the discounted-product candidate query.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountFilter {
    /// Restrict to these categories and their descendants; empty means all.
    pub category_ids: Vec<i64>,
    /// Instant used to evaluate discount windows.
    pub now: DateTime<Utc>,
    pub limit: i64,
}

impl DiscountFilter {
    pub fn new(now: DateTime<Utc>, limit: i64) -> Self {
        Self {
            category_ids: Vec::new(),
            now,
            limit,
        }
    }

    pub fn with_categories(mut self, category_ids: Vec<i64>) -> Self {
        self.category_ids = category_ids;
        self
    }
}

/// Repository interface for storefront catalog queries.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCatalogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Published, non-deleted products with a currently valid vendor discount.
    ///
    /// One row per product (its best offer), already ordered by discount percentage
    /// descending then product id descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn discounted_products(
        &self,
        filter: DiscountFilter,
    ) -> Result<Vec<DiscountedProduct>, AppError>;

    /// Products ranked by quantity sold in orders with one of `statuses`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn best_sellers(
        &self,
        statuses: Vec<OrderStatus>,
        limit: i64,
    ) -> Result<Vec<BestSeller>, AppError>;

    /// Active brands ordered by sort order, then name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn brand_options(&self) -> Result<Vec<BrandOption>, AppError>;

    /// Active categories ordered by sort order, then name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn category_options(&self) -> Result<Vec<CategoryOption>, AppError>;
}
