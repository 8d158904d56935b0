//! Catalog browsing: discount shelf, best sellers and filter options.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{BestSeller, BrandOption, CategoryOption, DiscountedProduct, OrderStatus};
use crate::domain::ranking::rank_discounted_products;
use crate::domain::repositories::{CatalogRepository, DiscountFilter};
use crate::error::AppError;

/// Service for storefront catalog queries.
pub struct CatalogService<R: CatalogRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns up to `take` products with the deepest current discounts.
    ///
    /// When `category_ids` is non-empty only products in those categories (or
    /// their descendants) are considered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn amazing_products(
        &self,
        category_ids: Vec<i64>,
        take: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<DiscountedProduct>, AppError> {
        let filter = DiscountFilter::new(now, take as i64).with_categories(category_ids);
        let candidates = self.repository.discounted_products(filter).await?;

        Ok(rank_discounted_products(candidates, take))
    }

    /// Returns up to `take` products ranked by units sold.
    ///
    /// Only processing, shipped and delivered orders count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn best_sellers(&self, take: usize) -> Result<Vec<BestSeller>, AppError> {
        self.repository
            .best_sellers(OrderStatus::SOLD.to_vec(), take as i64)
            .await
    }

    pub async fn brand_options(&self) -> Result<Vec<BrandOption>, AppError> {
        self.repository.brand_options().await
    }

    pub async fn category_options(&self) -> Result<Vec<CategoryOption>, AppError> {
        self.repository.category_options().await
    }
}
