//! The authenticated caller resolved from an API token.

use std::collections::BTreeSet;

/// Grants every permission.
pub const WILDCARD_PERMISSION: &str = "*";

/// Named permissions checked by admin routes.
pub mod permissions {
    pub const AUDIT_LOGS_READ: &str = "audit_logs.read";
    pub const REPORTS_READ: &str = "reports.read";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub user_name: String,
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, S>(user_id: impl Into<String>, user_name: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(WILDCARD_PERMISSION) || self.permissions.contains(permission)
    }
}
