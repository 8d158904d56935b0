//! Read access to the request audit trail.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::AuditLog;
use crate::domain::repositories::{AuditLogFilter, AuditRepository};
use crate::error::AppError;

/// Service for browsing audit logs.
pub struct AuditService<R: AuditRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AuditRepository + ?Sized> AuditService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of matching entries and the total match count.
    ///
    /// The page and the count are queried concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, filter: AuditLogFilter) -> Result<(Vec<AuditLog>, i64), AppError> {
        tokio::try_join!(
            self.repository.list(filter.clone()),
            self.repository.count(filter),
        )
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get(&self, id: i64) -> Result<AuditLog, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Audit log not found", json!({ "id": id })))
    }
}
