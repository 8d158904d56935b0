//! Handler for the admin reports overview.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::reports::ReportsOverviewResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Traffic overview for the last 24 hours and the last 7 days.
///
/// # Endpoint
///
/// `GET /api/admin/reports/overview`
///
/// Each window carries total and error (status >= 400) request counts, plus the
/// top 8 paths and top 8 authenticated users by request count.
///
/// Requires the `reports.read` permission.
pub async fn reports_overview_handler(
    State(state): State<AppState>,
) -> Result<Json<ReportsOverviewResponse>, AppError> {
    let now = Utc::now();
    let windows = state.report_service.overview(now).await?;

    Ok(Json(ReportsOverviewResponse {
        generated_at: now,
        windows: windows.into_iter().map(Into::into).collect(),
    }))
}
