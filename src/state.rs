//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{
    AuditService, AuthService, CatalogService, CheckoutService, ReportService, StorefrontService,
};
use crate::domain::audit_event::AuditEvent;
use crate::domain::repositories::{
    AuditRepository, CatalogRepository, CheckoutRepository, StorefrontRepository,
    TokenRepository,
};
use crate::infrastructure::cache::CacheService;

/// Services are held over trait-object repositories so the same state type
/// serves both the PostgreSQL wiring and in-memory test doubles.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService<dyn CatalogRepository>>,
    pub storefront_service: Arc<StorefrontService<dyn StorefrontRepository>>,
    pub checkout_service: Arc<CheckoutService<dyn CheckoutRepository>>,
    pub audit_service: Arc<AuditService<dyn AuditRepository>>,
    pub report_service: Arc<ReportService<dyn AuditRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub audit_sender: mpsc::Sender<AuditEvent>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the client IP.
    pub behind_proxy: bool,
}

/// Repositories backing an [`AppState`].
pub struct Repositories {
    pub catalog: Arc<dyn CatalogRepository>,
    pub storefront: Arc<dyn StorefrontRepository>,
    pub checkout: Arc<dyn CheckoutRepository>,
    pub audit: Arc<dyn AuditRepository>,
    pub tokens: Arc<dyn TokenRepository>,
}

impl AppState {
    /// Wires services over `repositories`.
    pub fn new(
        repositories: Repositories,
        signing_secret: String,
        cache: Arc<dyn CacheService>,
        audit_sender: mpsc::Sender<AuditEvent>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            catalog_service: Arc::new(CatalogService::new(repositories.catalog)),
            storefront_service: Arc::new(StorefrontService::new(repositories.storefront)),
            checkout_service: Arc::new(CheckoutService::new(repositories.checkout)),
            audit_service: Arc::new(AuditService::new(repositories.audit.clone())),
            report_service: Arc::new(ReportService::new(repositories.audit)),
            auth_service: Arc::new(AuthService::new(repositories.tokens, signing_secret)),
            cache,
            audit_sender,
            behind_proxy,
        }
    }
}
