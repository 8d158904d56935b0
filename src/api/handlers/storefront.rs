//! Handlers for home page content and store settings.

use std::future::Future;
use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

use crate::api::dto::storefront::{
    HomeBannerItem, HomeBannersQuery, HomeLayoutResponse, QuickServiceItem, SettingsResponse,
};
use crate::api::extract::ApiQuery;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::state::AppState;

pub const HOME_LAYOUT_CACHE_KEY: &str = "home_layout";
pub const SETTINGS_CACHE_KEY: &str = "settings";

/// Serves `key` from the cache, loading and caching it on a miss.
///
/// # Cache Strategy
///
/// - **Cache hit**: Deserialize and return
/// - **Cache miss**: Load from DB, spawn async cache write
/// - **Cache error or unreadable payload**: Log and fall back to DB
async fn cached<T, F, Fut>(
    cache: &Arc<dyn CacheService>,
    key: &'static str,
    load: F,
) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    match cache.get(key).await {
        Ok(Some(payload)) => match serde_json::from_str::<T>(&payload) {
            Ok(value) => {
                debug!("Cache HIT for {}", key);
                return Ok(value);
            }
            Err(e) => error!("Discarding unreadable cache entry {}: {}", key, e),
        },
        Ok(None) => debug!("Cache MISS for {}", key),
        Err(e) => error!("Cache error: {}", e),
    }

    let value = load().await?;

    match serde_json::to_string(&value) {
        Ok(payload) => {
            let cache = cache.clone();
            tokio::spawn(async move {
                if let Err(e) = cache.set(key, &payload, None).await {
                    error!("Failed to cache {}: {}", key, e);
                }
            });
        }
        Err(e) => error!("Failed to serialize {} for cache: {}", key, e),
    }

    Ok(value)
}

/// Returns the home page layout.
///
/// # Endpoint
///
/// `GET /api/public/home-layout`
///
/// Falls back to the built-in layout (banners, quick services, amazing
/// products, best sellers) when no section is configured. Cached.
pub async fn home_layout_handler(
    State(state): State<AppState>,
) -> Result<Json<HomeLayoutResponse>, AppError> {
    let service = state.storefront_service.clone();

    let layout = cached(&state.cache, HOME_LAYOUT_CACHE_KEY, || async move {
        let sections = service.home_layout().await?;
        Ok(HomeLayoutResponse {
            sections: sections.into_iter().map(Into::into).collect(),
        })
    })
    .await?;

    Ok(Json(layout))
}

/// Lists banners currently on schedule.
///
/// # Endpoint
///
/// `GET /api/public/home-banners?placement=`
pub async fn home_banners_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HomeBannersQuery>,
) -> Result<Json<Vec<HomeBannerItem>>, AppError> {
    let banners = state
        .storefront_service
        .home_banners(params.placement, Utc::now())
        .await?;

    Ok(Json(banners.into_iter().map(Into::into).collect()))
}

/// `GET /api/public/quick-services`
pub async fn quick_services_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuickServiceItem>>, AppError> {
    let services = state.storefront_service.quick_services().await?;
    Ok(Json(services.into_iter().map(Into::into).collect()))
}

/// Returns store settings, or defaults when none are configured. Cached.
///
/// # Endpoint
///
/// `GET /api/public/settings`
pub async fn settings_handler(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let service = state.storefront_service.clone();

    let settings = cached(&state.cache, SETTINGS_CACHE_KEY, || async move {
        Ok(SettingsResponse::from(service.settings().await?))
    })
    .await?;

    Ok(Json(settings))
}
