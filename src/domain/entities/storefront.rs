//! Home page content and store-wide settings.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct HomeBanner {
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

#[derive(Debug, Clone, PartialEq)]
pub struct QuickService {
    pub id: i64,
    pub title: String,
    pub icon_url: Option<String>,
    pub link_url: Option<String>,
    pub sort_order: i32,
}

/// One block of the home page, rendered by the client according to `section_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSection {
    pub key: String,
    pub title: Option<String>,
    pub section_type: String,
    pub item_limit: Option<i32>,
    pub sort_order: i32,
}

impl HomeSection {
    fn builtin(key: &str, title: &str, sort_order: i32, item_limit: Option<i32>) -> Self {
        Self {
            key: key.to_string(),
            title: Some(title.to_string()),
            section_type: key.to_string(),
            item_limit,
            sort_order,
        }
    }

    /// Layout served when no section is configured.
    pub fn default_layout() -> Vec<HomeSection> {
        vec![
            Self::builtin("banners", "Featured", 0, None),
            Self::builtin("quick_services", "Services", 1, None),
            Self::builtin("amazing_products", "Amazing offers", 2, Some(12)),
            Self::builtin("best_sellers", "Best sellers", 3, Some(12)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    pub store_name: String,
    pub support_email: Option<String>,
    pub support_phone: Option<String>,
    pub currency_code: String,
    pub logo_url: Option<String>,
    pub maintenance_mode: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "Storefront".to_string(),
            support_email: None,
            support_phone: None,
            currency_code: "USD".to_string(),
            logo_url: None,
            maintenance_mode: false,
        }
    }
}
