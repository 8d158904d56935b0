//! Repository trait for the request audit trail and reports built on it.

use crate::domain::entities::{AuditLog, NewAuditLog, RankedCount, RequestCounts};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Filter criteria for audit log listings.
///
/// Supports free-text search, exact status code, HTTP method and pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogFilter {
    pub search: Option<String>,
    pub status_code: Option<i32>,
    pub method: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

impl AuditLogFilter {
    /// Creates a new filter with pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            search: None,
            status_code: None,
            method: None,
            offset,
            limit,
        }
    }

    /// Adds a case-insensitive substring search over path, user, IP and user agent.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn with_status_code(mut self, status_code: Option<i32>) -> Self {
        self.status_code = status_code;
        self
    }

    /// Adds an HTTP method filter, normalized to upper case.
    pub fn with_method(mut self, method: Option<String>) -> Self {
        self.method = method
            .map(|m| m.trim().to_ascii_uppercase())
            .filter(|m| !m.is_empty());
        self
    }
}

/// Repository interface for audit logs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAuditRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Stores one audit entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_log: NewAuditLog) -> Result<AuditLog, AppError>;

    /// Lists entries matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, filter: AuditLogFilter) -> Result<Vec<AuditLog>, AppError>;

    /// Counts entries matching `filter`, ignoring its pagination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: AuditLogFilter) -> Result<i64, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<AuditLog>, AppError>;

    /// Total and error (status >= 400) requests since `since`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn request_counts(&self, since: DateTime<Utc>) -> Result<RequestCounts, AppError>;

    /// Most requested paths since `since`, count descending then path ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_paths(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<RankedCount>, AppError>;

    /// Most active authenticated users since `since`, count descending then name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_users(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<RankedCount>, AppError>;
}
