//! Repository trait for home page content and store settings.

use crate::domain::entities::{HomeBanner, HomeSection, QuickService, StoreSettings};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontRepository: Send + Sync {
    /// Active banners whose schedule contains `now`, optionally for one placement.
    async fn home_banners(
        &self,
        placement: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<HomeBanner>, AppError>;

    async fn quick_services(&self) -> Result<Vec<QuickService>, AppError>;

    /// Active home layout sections in display order.
    async fn home_sections(&self) -> Result<Vec<HomeSection>, AppError>;

    /// The configured store settings row, if any.
    async fn store_settings(&self) -> Result<Option<StoreSettings>, AppError>;
}
