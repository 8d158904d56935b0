//! DTOs for home page content and store settings.
//!
//! Layout and settings responses are also the payloads stored in the cache, so
//! they derive `Deserialize` as well.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{HomeBanner, HomeSection, QuickService, StoreSettings};

#[derive(Debug, Default, Deserialize)]
pub struct HomeBannersQuery {
    pub placement: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HomeBannerItem {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub placement: String,
    pub sort_order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl From<HomeBanner> for HomeBannerItem {
    fn from(b: HomeBanner) -> Self {
        Self {
            id: b.id,
            title: b.title,
            subtitle: b.subtitle,
            image_url: b.image_url,
            link_url: b.link_url,
            placement: b.placement,
            sort_order: b.sort_order,
            starts_at: b.starts_at,
            ends_at: b.ends_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuickServiceItem {
    pub id: i64,
    pub title: String,
    pub icon_url: Option<String>,
    pub link_url: Option<String>,
    pub sort_order: i32,
}

impl From<QuickService> for QuickServiceItem {
    fn from(q: QuickService) -> Self {
        Self {
            id: q.id,
            title: q.title,
            icon_url: q.icon_url,
            link_url: q.link_url,
            sort_order: q.sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSectionItem {
    pub key: String,
    pub title: Option<String>,
    pub section_type: String,
    pub item_limit: Option<i32>,
    pub sort_order: i32,
}

impl From<HomeSection> for HomeSectionItem {
    fn from(s: HomeSection) -> Self {
        Self {
            key: s.key,
            title: s.title,
            section_type: s.section_type,
            item_limit: s.item_limit,
            sort_order: s.sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeLayoutResponse {
    pub sections: Vec<HomeSectionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub store_name: String,
    pub support_email: Option<String>,
    pub support_phone: Option<String>,
    pub currency_code: String,
    pub logo_url: Option<String>,
    pub maintenance_mode: bool,
}

impl From<StoreSettings> for SettingsResponse {
    fn from(s: StoreSettings) -> Self {
        Self {
            store_name: s.store_name,
            support_email: s.support_email,
            support_phone: s.support_phone,
            currency_code: s.currency_code,
            logo_url: s.logo_url,
            maintenance_mode: s.maintenance_mode,
        }
    }
}
