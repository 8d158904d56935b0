//! PostgreSQL implementation of the audit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AuditLog, NewAuditLog, RankedCount, RequestCounts};
use crate::domain::repositories::{AuditLogFilter, AuditRepository};
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct AuditLogRow {
    id: i64,
    occurred_at: DateTime<Utc>,
    user_id: Option<String>,
    user_name: Option<String>,
    method: String,
    path: String,
    query_string: Option<String>,
    status_code: i32,
    duration_ms: i64,
    ip: Option<String>,
    user_agent: Option<String>,
}

impl From<AuditLogRow> for AuditLog {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            occurred_at: row.occurred_at,
            user_id: row.user_id,
            user_name: row.user_name,
            method: row.method,
            path: row.path,
            query_string: row.query_string,
            status_code: row.status_code,
            duration_ms: row.duration_ms,
            ip: row.ip,
            user_agent: row.user_agent,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RequestCountsRow {
    total: i64,
    errors: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct RankedCountRow {
    key: String,
    count: i64,
}

impl From<RankedCountRow> for RankedCount {
    fn from(row: RankedCountRow) -> Self {
        Self {
            key: row.key,
            count: row.count,
        }
    }
}

/// Builds an `ILIKE` substring pattern, escaping the wildcard characters in `term`.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

const AUDIT_COLUMNS: &str =
    "id, occurred_at, user_id, user_name, method, path, query_string, status_code, duration_ms, ip, user_agent";

const FILTER_CLAUSE: &str = r#"
    ($1::TEXT IS NULL
        OR path ILIKE $1 ESCAPE '\'
        OR user_name ILIKE $1 ESCAPE '\'
        OR ip ILIKE $1 ESCAPE '\'
        OR user_agent ILIKE $1 ESCAPE '\')
    AND ($2::INT IS NULL OR status_code = $2)
    AND ($3::TEXT IS NULL OR method = $3)
"#;

/// PostgreSQL repository for the request audit trail.
pub struct PgAuditRepository {
    pool: Arc<PgPool>,
}

impl PgAuditRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn record(&self, new_log: NewAuditLog) -> Result<AuditLog, AppError> {
        let sql = format!(
            r#"
            INSERT INTO audit_logs
                (occurred_at, user_id, user_name, method, path, query_string, status_code, duration_ms, ip, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {AUDIT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AuditLogRow>(&sql)
            .bind(new_log.occurred_at)
            .bind(new_log.user_id)
            .bind(new_log.user_name)
            .bind(new_log.method)
            .bind(new_log.path)
            .bind(new_log.query_string)
            .bind(new_log.status_code)
            .bind(new_log.duration_ms)
            .bind(new_log.ip)
            .bind(new_log.user_agent)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn list(&self, filter: AuditLogFilter) -> Result<Vec<AuditLog>, AppError> {
        let sql = format!(
            r#"
            SELECT {AUDIT_COLUMNS}
            FROM audit_logs
            WHERE {FILTER_CLAUSE}
            ORDER BY occurred_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#
        );

        let rows = sqlx::query_as::<_, AuditLogRow>(&sql)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(filter.status_code)
            .bind(filter.method)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: AuditLogFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM audit_logs WHERE {FILTER_CLAUSE}");

        let total: i64 = sqlx::query_scalar(&sql)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(filter.status_code)
            .bind(filter.method)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AuditLog>, AppError> {
        let sql = format!("SELECT {AUDIT_COLUMNS} FROM audit_logs WHERE id = $1");

        let row = sqlx::query_as::<_, AuditLogRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn request_counts(&self, since: DateTime<Utc>) -> Result<RequestCounts, AppError> {
        let row = sqlx::query_as::<_, RequestCountsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status_code >= 400) AS errors
            FROM audit_logs
            WHERE occurred_at >= $1
            "#,
        )
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(RequestCounts {
            total: row.total,
            errors: row.errors,
        })
    }

    async fn top_paths(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<RankedCount>, AppError> {
        let rows = sqlx::query_as::<_, RankedCountRow>(
            r#"
            SELECT path AS key, COUNT(*) AS count
            FROM audit_logs
            WHERE occurred_at >= $1
            GROUP BY 1
            ORDER BY 2 DESC, 1 ASC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn top_users(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<RankedCount>, AppError> {
        let rows = sqlx::query_as::<_, RankedCountRow>(
            r#"
            SELECT COALESCE(user_name, user_id) AS key, COUNT(*) AS count
            FROM audit_logs
            WHERE occurred_at >= $1 AND user_id IS NOT NULL
            GROUP BY 1
            ORDER BY 2 DESC, 1 ASC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
