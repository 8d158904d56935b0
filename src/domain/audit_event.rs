//! Audit event model for asynchronous request logging.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewAuditLog;

const MAX_PATH_LEN: usize = 2048;
const MAX_QUERY_LEN: usize = 2048;
const MAX_USER_AGENT_LEN: usize = 512;

/// A finished API request captured by the audit middleware.
///
/// Sent through a bounded channel to [`crate::domain::audit_worker::run_audit_worker`]
/// so the response never waits on the database write.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub occurred_at: DateTime<Utc>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub method: String,
    pub path: String,
    pub query_string: Option<String>,
    pub status_code: u16,
    pub duration_ms: u64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Cuts `value` to at most `max` bytes on a char boundary.
fn truncate(mut value: String, max: usize) -> String {
    if value.len() > max {
        let mut end = max;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
    }
    value
}

impl AuditEvent {
    /// Converts the event into a storable record, bounding free-form fields.
    pub fn into_new_log(self) -> NewAuditLog {
        NewAuditLog {
            occurred_at: self.occurred_at,
            user_id: self.user_id,
            user_name: self.user_name,
            method: self.method.to_ascii_uppercase(),
            path: truncate(self.path, MAX_PATH_LEN),
            query_string: self
                .query_string
                .filter(|q| !q.is_empty())
                .map(|q| truncate(q, MAX_QUERY_LEN)),
            status_code: i32::from(self.status_code),
            duration_ms: i64::try_from(self.duration_ms).unwrap_or(i64::MAX),
            ip: self.ip,
            user_agent: self.user_agent.map(|ua| truncate(ua, MAX_USER_AGENT_LEN)),
        }
    }
}
