//! Handlers for the admin audit log endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::audit::{AuditLogItem, AuditLogListResponse, AuditLogQuery};
use crate::api::dto::pagination::PaginationMeta;
use crate::domain::repositories::AuditLogFilter;
use crate::api::extract::ApiQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Lists audit log entries, newest first.
///
/// # Endpoint
///
/// `GET /api/admin/audit-logs`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, range 10..=200)
/// - `q` (optional): substring of path, user name, IP or user agent
/// - `status_code` (optional): exact status code
/// - `method` (optional): HTTP method, any case
///
/// Requires the `audit_logs.read` permission.
///
/// # Errors
///
/// Returns 400 Bad Request if pagination or filter parameters are invalid.
pub async fn audit_logs_list_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AuditLogQuery>,
) -> Result<Json<AuditLogListResponse>, AppError> {
    params.validate()?;

    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = params.pagination.page();
    let page_size = params.pagination.page_size();

    let filter = AuditLogFilter::new(offset, limit)
        .with_search(params.q)
        .with_status_code(params.status_code)
        .with_method(params.method);

    let (logs, total_items) = state.audit_service.list(filter).await?;

    Ok(Json(AuditLogListResponse {
        pagination: PaginationMeta::new(page, page_size, total_items),
        items: logs.into_iter().map(Into::into).collect(),
    }))
}

/// Returns one audit log entry.
///
/// # Endpoint
///
/// `GET /api/admin/audit-logs/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no entry has this id.
pub async fn audit_log_get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AuditLogItem>, AppError> {
    let log = state.audit_service.get(id).await?;
    Ok(Json(log.into()))
}
