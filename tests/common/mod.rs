#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::mpsc;

use storefront_api::application::services::hash_token;
use storefront_api::domain::audit_event::AuditEvent;
use storefront_api::domain::entities::{
    Address, AuditLog, BestSeller, BrandOption, CartLine, CategoryOption, DiscountedProduct,
    HomeBanner, HomeSection, NewAuditLog, OrderStatus, QuickService, RankedCount, RequestCounts,
    ShippingRate, ShippingZone, StoreSettings, VendorOffer,
};
use storefront_api::domain::repositories::{
    ApiToken, AuditLogFilter, AuditRepository, CatalogRepository, CheckoutRepository,
    DiscountFilter, NewApiToken, StorefrontRepository, TokenRepository,
};
use storefront_api::error::AppError;
use storefront_api::infrastructure::cache::{CacheResult, CacheService, NullCache};
use storefront_api::routes::router;
use storefront_api::state::{AppState, Repositories};

pub const SIGNING_SECRET: &str = "test-signing-secret";

/// No permissions: checkout only.
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const CUSTOMER_ID: &str = "u-100";
/// `audit_logs.read` only.
pub const AUDITOR_TOKEN: &str = "auditor-token";
pub const AUDITOR_ID: &str = "u-200";
/// Wildcard permission.
pub const ADMIN_TOKEN: &str = "admin-token";
pub const REVOKED_TOKEN: &str = "revoked-token";

pub fn money(units: i64) -> Decimal {
    Decimal::from(units)
}

// ---------------------------------------------------------------------------
// Catalog

#[derive(Default)]
pub struct FakeCatalogRepository {
    pub discounted: Vec<DiscountedProduct>,
    pub best_sellers: Vec<BestSeller>,
    pub brands: Vec<BrandOption>,
    pub categories: Vec<CategoryOption>,
    pub last_filter: Mutex<Option<DiscountFilter>>,
    pub last_statuses: Mutex<Vec<OrderStatus>>,
}

#[async_trait]
impl CatalogRepository for FakeCatalogRepository {
    async fn discounted_products(
        &self,
        filter: DiscountFilter,
    ) -> Result<Vec<DiscountedProduct>, AppError> {
        *self.last_filter.lock().unwrap() = Some(filter);
        Ok(self.discounted.clone())
    }

    async fn best_sellers(
        &self,
        statuses: Vec<OrderStatus>,
        limit: i64,
    ) -> Result<Vec<BestSeller>, AppError> {
        *self.last_statuses.lock().unwrap() = statuses;
        Ok(self
            .best_sellers
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn brand_options(&self) -> Result<Vec<BrandOption>, AppError> {
        Ok(self.brands.clone())
    }

    async fn category_options(&self) -> Result<Vec<CategoryOption>, AppError> {
        Ok(self.categories.clone())
    }
}

pub fn discounted(product_id: i64, price: i64, discount_price: i64) -> DiscountedProduct {
    DiscountedProduct {
        product_id,
        name: format!("Product {product_id}"),
        slug: format!("product-{product_id}"),
        image_url: None,
        brand_name: Some("Acme".to_string()),
        offer_id: product_id * 10,
        price: money(price),
        discount_price: money(discount_price),
    }
}

pub fn best_seller(product_id: i64, total_sold: i64) -> BestSeller {
    BestSeller {
        product_id,
        name: format!("Product {product_id}"),
        slug: format!("product-{product_id}"),
        image_url: None,
        price: money(100),
        total_sold,
    }
}

// ---------------------------------------------------------------------------
// Storefront

#[derive(Default)]
pub struct FakeStorefrontRepository {
    pub banners: Vec<HomeBanner>,
    pub quick_services: Vec<QuickService>,
    pub sections: Vec<HomeSection>,
    pub settings: Option<StoreSettings>,
    pub fail: bool,
}

impl FakeStorefrontRepository {
    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::internal("Database error", serde_json::json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl StorefrontRepository for FakeStorefrontRepository {
    async fn home_banners(
        &self,
        placement: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<HomeBanner>, AppError> {
        self.check()?;
        let mut banners: Vec<HomeBanner> = self
            .banners
            .iter()
            .filter(|b| placement.as_deref().is_none_or(|p| b.placement == p))
            .filter(|b| b.starts_at.is_none_or(|s| s <= now))
            .filter(|b| b.ends_at.is_none_or(|e| e > now))
            .cloned()
            .collect();
        banners.sort_by_key(|b| (b.sort_order, b.id));
        Ok(banners)
    }

    async fn quick_services(&self) -> Result<Vec<QuickService>, AppError> {
        self.check()?;
        Ok(self.quick_services.clone())
    }

    async fn home_sections(&self) -> Result<Vec<HomeSection>, AppError> {
        self.check()?;
        Ok(self.sections.clone())
    }

    async fn store_settings(&self) -> Result<Option<StoreSettings>, AppError> {
        self.check()?;
        Ok(self.settings.clone())
    }
}

pub fn banner(id: i64, placement: &str, sort_order: i32) -> HomeBanner {
    HomeBanner {
        id,
        title: format!("Banner {id}"),
        subtitle: None,
        image_url: format!("https://cdn.test/banners/{id}.jpg"),
        link_url: None,
        placement: placement.to_string(),
        sort_order,
        starts_at: None,
        ends_at: None,
    }
}

// ---------------------------------------------------------------------------
// Checkout

#[derive(Default)]
pub struct FakeCheckoutRepository {
    pub addresses: Vec<Address>,
    pub carts: HashMap<String, Vec<CartLine>>,
    pub zones: Vec<ShippingZone>,
    pub rates: Vec<ShippingRate>,
}

#[async_trait]
impl CheckoutRepository for FakeCheckoutRepository {
    async fn find_address(
        &self,
        address_id: i64,
        user_id: &str,
    ) -> Result<Option<Address>, AppError> {
        Ok(self
            .addresses
            .iter()
            .find(|a| a.id == address_id && a.user_id == user_id)
            .cloned())
    }

    async fn cart_lines(&self, user_id: &str) -> Result<Vec<CartLine>, AppError> {
        Ok(self.carts.get(user_id).cloned().unwrap_or_default())
    }

    async fn active_zones(&self) -> Result<Vec<ShippingZone>, AppError> {
        Ok(self.zones.clone())
    }

    async fn zone_rates(&self, zone_id: i64) -> Result<Vec<ShippingRate>, AppError> {
        Ok(self
            .rates
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect())
    }
}

pub fn address(
    id: i64,
    user_id: &str,
    country: &str,
    province: Option<&str>,
    city: Option<&str>,
) -> Address {
    Address {
        id,
        user_id: user_id.to_string(),
        recipient_name: "Recipient".to_string(),
        country_code: country.to_string(),
        province: province.map(str::to_string),
        city: city.map(str::to_string),
        line1: "1 Main St".to_string(),
        postal_code: None,
    }
}

pub fn cart_line(id: i64, price: i64, discount_price: Option<i64>, quantity: i32) -> CartLine {
    CartLine {
        id,
        quantity,
        offer: VendorOffer {
            id: id * 100,
            product_id: id,
            price: money(price),
            discount_price: discount_price.map(money),
            discount_starts_at: None,
            discount_ends_at: None,
        },
    }
}

pub fn zone(
    id: i64,
    name: &str,
    country: Option<&str>,
    province: Option<&str>,
    city: Option<&str>,
    sort_order: i32,
) -> ShippingZone {
    ShippingZone {
        id,
        name: name.to_string(),
        country_code: country.map(str::to_string),
        province: province.map(str::to_string),
        city: city.map(str::to_string),
        sort_order,
    }
}

pub fn rate(id: i64, zone_id: i64, code: &str, price: i64) -> ShippingRate {
    ShippingRate {
        id,
        zone_id,
        method_id: id,
        method_name: code.to_uppercase(),
        method_code: code.to_string(),
        method_is_deleted: false,
        price: money(price),
        min_order_amount: None,
        free_shipping_min_order_amount: None,
        eta_days_min: Some(1),
        eta_days_max: Some(3),
        is_deleted: false,
    }
}

// ---------------------------------------------------------------------------
// Audit

#[derive(Default)]
pub struct FakeAuditRepository {
    logs: Mutex<Vec<AuditLog>>,
    next_id: AtomicI64,
}

impl FakeAuditRepository {
    pub fn with_logs(logs: Vec<AuditLog>) -> Self {
        let next_id = logs.iter().map(|l| l.id).max().unwrap_or(0);
        Self {
            logs: Mutex::new(logs),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub fn len(&self) -> usize {
        self.logs.lock().unwrap().len()
    }

    fn matching(&self, filter: &AuditLogFilter) -> Vec<AuditLog> {
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut logs: Vec<AuditLog> = self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| filter.status_code.is_none_or(|c| l.status_code == c))
            .filter(|l| filter.method.as_deref().is_none_or(|m| l.method == m))
            .filter(|l| {
                search.as_deref().is_none_or(|needle| {
                    [
                        Some(l.path.as_str()),
                        l.user_name.as_deref(),
                        l.ip.as_deref(),
                        l.user_agent.as_deref(),
                    ]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        logs
    }

    fn since(&self, since: DateTime<Utc>) -> Vec<AuditLog> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.occurred_at >= since)
            .cloned()
            .collect()
    }
}

fn ranked(counts: BTreeMap<String, i64>, limit: i64) -> Vec<RankedCount> {
    let mut items: Vec<RankedCount> = counts
        .into_iter()
        .map(|(key, count)| RankedCount { key, count })
        .collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    items.truncate(limit as usize);
    items
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn record(&self, new_log: NewAuditLog) -> Result<AuditLog, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let log = AuditLog {
            id,
            occurred_at: new_log.occurred_at,
            user_id: new_log.user_id,
            user_name: new_log.user_name,
            method: new_log.method,
            path: new_log.path,
            query_string: new_log.query_string,
            status_code: new_log.status_code,
            duration_ms: new_log.duration_ms,
            ip: new_log.ip,
            user_agent: new_log.user_agent,
        };
        self.logs.lock().unwrap().push(log.clone());
        Ok(log)
    }

    async fn list(&self, filter: AuditLogFilter) -> Result<Vec<AuditLog>, AppError> {
        Ok(self
            .matching(&filter)
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn count(&self, filter: AuditLogFilter) -> Result<i64, AppError> {
        Ok(self.matching(&filter).len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AuditLog>, AppError> {
        Ok(self.logs.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn request_counts(&self, since: DateTime<Utc>) -> Result<RequestCounts, AppError> {
        let logs = self.since(since);
        Ok(RequestCounts {
            total: logs.len() as i64,
            errors: logs.iter().filter(|l| l.status_code >= 400).count() as i64,
        })
    }

    async fn top_paths(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<RankedCount>, AppError> {
        let mut counts = BTreeMap::new();
        for log in self.since(since) {
            *counts.entry(log.path).or_insert(0) += 1;
        }
        Ok(ranked(counts, limit))
    }

    async fn top_users(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<RankedCount>, AppError> {
        let mut counts = BTreeMap::new();
        for log in self.since(since) {
            let Some(user_id) = log.user_id else { continue };
            *counts.entry(log.user_name.unwrap_or(user_id)).or_insert(0) += 1;
        }
        Ok(ranked(counts, limit))
    }
}

pub fn audit_log(
    id: i64,
    minutes_ago: i64,
    method: &str,
    path: &str,
    status_code: i32,
) -> AuditLog {
    AuditLog {
        id,
        occurred_at: Utc::now() - Duration::minutes(minutes_ago),
        user_id: None,
        user_name: None,
        method: method.to_string(),
        path: path.to_string(),
        query_string: None,
        status_code,
        duration_ms: 5,
        ip: Some("10.0.0.1".to_string()),
        user_agent: Some("integration-test".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tokens

pub struct FakeTokenRepository {
    tokens: Mutex<Vec<ApiToken>>,
}

fn api_token(
    id: i64,
    raw: &str,
    user_id: &str,
    user_name: &str,
    permissions: &[&str],
) -> ApiToken {
    ApiToken {
        id,
        name: format!("token-{id}"),
        token_hash: hash_token(SIGNING_SECRET, raw),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        created_at: Utc::now(),
        last_used_at: None,
        revoked_at: None,
    }
}

impl Default for FakeTokenRepository {
    fn default() -> Self {
        let mut revoked = api_token(4, REVOKED_TOKEN, "u-400", "Gone", &["*"]);
        revoked.revoked_at = Some(Utc::now());

        Self {
            tokens: Mutex::new(vec![
                api_token(1, CUSTOMER_TOKEN, CUSTOMER_ID, "Sara", &[]),
                api_token(2, AUDITOR_TOKEN, AUDITOR_ID, "Omid", &["audit_logs.read"]),
                api_token(3, ADMIN_TOKEN, "u-300", "Root", &["*"]),
                revoked,
            ]),
        }
    }
}

#[async_trait]
impl TokenRepository for FakeTokenRepository {
    async fn find_active(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .cloned())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        if let Some(t) = self
            .tokens
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.token_hash == token_hash)
        {
            t.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(&self, new_token: NewApiToken) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        let token = ApiToken {
            id: tokens.len() as i64 + 1,
            name: new_token.name,
            token_hash: new_token.token_hash,
            user_id: new_token.user_id,
            user_name: new_token.user_name,
            permissions: new_token.permissions,
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        tokens.push(token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.iter_mut().find(|t| t.id == id && t.revoked_at.is_none()) {
            Some(t) => {
                t.revoked_at = Some(Utc::now());
                Ok(())
            }
            None => Err(AppError::not_found("Token not found", serde_json::json!({ "id": id }))),
        }
    }
}

// ---------------------------------------------------------------------------
// Cache

/// In-process cache used to exercise cache hits.
#[derive(Default)]
pub struct MemoryCache {
    pub entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn with_entry(key: &str, payload: &str) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
        cache
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, payload: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// State

pub struct Fixtures {
    pub catalog: Arc<FakeCatalogRepository>,
    pub storefront: Arc<FakeStorefrontRepository>,
    pub checkout: Arc<FakeCheckoutRepository>,
    pub audit: Arc<FakeAuditRepository>,
    pub tokens: Arc<FakeTokenRepository>,
    pub cache: Arc<dyn CacheService>,
    pub behind_proxy: bool,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            catalog: Arc::default(),
            storefront: Arc::default(),
            checkout: Arc::default(),
            audit: Arc::default(),
            tokens: Arc::default(),
            cache: Arc::new(NullCache),
            behind_proxy: false,
        }
    }
}

pub fn create_test_state(fixtures: Fixtures) -> (AppState, mpsc::Receiver<AuditEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let repositories = Repositories {
        catalog: fixtures.catalog,
        storefront: fixtures.storefront,
        checkout: fixtures.checkout,
        audit: fixtures.audit,
        tokens: fixtures.tokens,
    };

    let state = AppState::new(
        repositories,
        SIGNING_SECRET.to_string(),
        fixtures.cache,
        tx,
        fixtures.behind_proxy,
    );

    (state, rx)
}

/// Full router over `fixtures`, plus the audit channel receiver.
pub fn test_server(fixtures: Fixtures) -> (TestServer, mpsc::Receiver<AuditEvent>) {
    let (state, rx) = create_test_state(fixtures);
    (TestServer::new(router(state)).unwrap(), rx)
}
