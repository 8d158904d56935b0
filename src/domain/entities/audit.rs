//! Audit log entries and the aggregates built from them.

use chrono::{DateTime, Duration, Utc};

/// A persisted record of one API request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
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

impl AuditLog {
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

/// Input data for recording an audit entry.
///
/// `occurred_at` is captured when the request finished, not when it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
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

/// Fixed reporting windows of the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    Last24Hours,
    Last7Days,
}

impl ReportWindow {
    pub const ALL: [ReportWindow; 2] = [ReportWindow::Last24Hours, ReportWindow::Last7Days];

    /// Rows kept in each top-N list.
    pub const TOP_LIMIT: i64 = 8;

    pub fn label(&self) -> &'static str {
        match self {
            ReportWindow::Last24Hours => "24h",
            ReportWindow::Last7Days => "7d",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            ReportWindow::Last24Hours => Duration::hours(24),
            ReportWindow::Last7Days => Duration::days(7),
        }
    }

    /// Inclusive lower bound of the window ending at `now`.
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.duration()
    }
}

/// Total and error request counts inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestCounts {
    pub total: i64,
    pub errors: i64,
}

/// A key (path or user) with its request volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCount {
    pub key: String,
    pub count: i64,
}

/// Aggregates for one report window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    pub window: ReportWindow,
    pub since: DateTime<Utc>,
    pub counts: RequestCounts,
    pub top_paths: Vec<RankedCount>,
    pub top_users: Vec<RankedCount>,
}
