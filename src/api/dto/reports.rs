//! DTOs for the admin reports overview.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{RankedCount, WindowReport};

#[derive(Debug, Serialize)]
pub struct ReportsOverviewResponse {
    pub generated_at: DateTime<Utc>,
    pub windows: Vec<WindowReportItem>,
}

#[derive(Debug, Serialize)]
pub struct WindowReportItem {
    /// `24h` or `7d`.
    pub window: &'static str,
    pub since: DateTime<Utc>,
    pub total_requests: i64,
    pub error_requests: i64,
    pub top_paths: Vec<RankedItem>,
    pub top_users: Vec<RankedItem>,
}

impl From<WindowReport> for WindowReportItem {
    fn from(r: WindowReport) -> Self {
        Self {
            window: r.window.label(),
            since: r.since,
            total_requests: r.counts.total,
            error_requests: r.counts.errors,
            top_paths: r.top_paths.into_iter().map(Into::into).collect(),
            top_users: r.top_users.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedItem {
    pub key: String,
    pub count: i64,
}

impl From<RankedCount> for RankedItem {
    fn from(r: RankedCount) -> Self {
        Self {
            key: r.key,
            count: r.count,
        }
    }
}
