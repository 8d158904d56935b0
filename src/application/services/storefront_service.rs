//! Home page content and store settings.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{HomeBanner, HomeSection, QuickService, StoreSettings};
use crate::domain::repositories::StorefrontRepository;
use crate::error::AppError;

/// Service composing the storefront home page.
///
/// Falls back to built-in defaults when the home layout or the settings row
/// have not been configured yet.
pub struct StorefrontService<R: StorefrontRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: StorefrontRepository + ?Sized> StorefrontService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Banners currently on schedule, optionally for one placement.
    ///
    /// A blank placement is treated as no filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn home_banners(
        &self,
        placement: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<HomeBanner>, AppError> {
        let placement = placement
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        self.repository.home_banners(placement, now).await
    }

    pub async fn quick_services(&self) -> Result<Vec<QuickService>, AppError> {
        self.repository.quick_services().await
    }

    /// Active home sections, or [`HomeSection::default_layout`] when none are configured.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn home_layout(&self) -> Result<Vec<HomeSection>, AppError> {
        let sections = self.repository.home_sections().await?;

        if sections.is_empty() {
            tracing::debug!("No home sections configured, using default layout");
            return Ok(HomeSection::default_layout());
        }

        Ok(sections)
    }

    /// Store settings, or [`StoreSettings::default`] when none exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn settings(&self) -> Result<StoreSettings, AppError> {
        Ok(self
            .repository
            .store_settings()
            .await?
            .unwrap_or_default())
    }
}
