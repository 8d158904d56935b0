//! DTOs for audit log endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::domain::entities::AuditLog;

/// Query for `GET /api/admin/audit-logs`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct AuditLogQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Case-insensitive substring over path, user name, IP and user agent.
    #[validate(length(max = 200))]
    pub q: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 100, max = 599))]
    pub status_code: Option<i32>,

    #[validate(length(max = 16))]
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogItem {
    pub id: i64,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub method: String,
    pub path: String,
    pub query_string: Option<String>,
    pub status_code: i32,
    pub duration_ms: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl From<AuditLog> for AuditLogItem {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            occurred_at: log.occurred_at,
            user_id: log.user_id,
            user_name: log.user_name,
            method: log.method,
            path: log.path,
            query_string: log.query_string,
            status_code: log.status_code,
            duration_ms: log.duration_ms,
            ip: log.ip,
            user_agent: log.user_agent,
        }
    }
}

/// Paginated list of audit log entries.
#[derive(Debug, Serialize)]
pub struct AuditLogListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<AuditLogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_range() {
        let query = AuditLogQuery {
            pagination: PaginationParams {
                page: None,
                page_size: None,
            },
            q: None,
            status_code: Some(42),
            method: None,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_empty_query_is_valid() {
        let query = AuditLogQuery {
            pagination: PaginationParams {
                page: None,
                page_size: None,
            },
            q: None,
            status_code: None,
            method: None,
        };
        assert!(query.validate().is_ok());
    }
}
