//! Admin traffic reports computed from the audit trail.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{ReportWindow, WindowReport};
use crate::domain::repositories::AuditRepository;
use crate::error::AppError;

/// Service building the admin overview report.
pub struct ReportService<R: AuditRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AuditRepository + ?Sized> ReportService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds one report per window in [`ReportWindow::ALL`], relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn overview(&self, now: DateTime<Utc>) -> Result<Vec<WindowReport>, AppError> {
        let mut reports = Vec::with_capacity(ReportWindow::ALL.len());

        for window in ReportWindow::ALL {
            reports.push(self.window_report(window, now).await?);
        }

        Ok(reports)
    }

    async fn window_report(
        &self,
        window: ReportWindow,
        now: DateTime<Utc>,
    ) -> Result<WindowReport, AppError> {
        let since = window.since(now);

        let (counts, top_paths, top_users) = tokio::try_join!(
            self.repository.request_counts(since),
            self.repository.top_paths(since, ReportWindow::TOP_LIMIT),
            self.repository.top_users(since, ReportWindow::TOP_LIMIT),
        )?;

        Ok(WindowReport {
            window,
            since,
            counts,
            top_paths,
            top_users,
        })
    }
}
