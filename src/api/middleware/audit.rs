//! Request audit capture.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tokio::sync::mpsc::error::TrySendError;

use crate::api::middleware::client_ip;
use crate::domain::audit_event::AuditEvent;
use crate::domain::entities::Principal;
use crate::state::AppState;

/// Prefix of the routes that are audited.
const AUDITED_PREFIX: &str = "/api";

/// Records every `/api` request as an [`AuditEvent`].
///
/// The event is handed to the audit worker with `try_send`, so the response
/// never waits for the database. When the queue is full the event is dropped
/// and `audit_events_dropped_total` is incremented.
///
/// The authenticated identity is read from the response extensions, where the
/// auth middleware leaves it.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if !is_audited(&path) {
        return next.run(req).await;
    }

    let started = Instant::now();
    let occurred_at = Utc::now();
    let method = req.method().to_string();
    let query_string = req.uri().query().map(str::to_string);
    let ip = client_ip::resolve(req.headers(), req.extensions(), st.behind_proxy)
        .map(|ip| ip.to_string());
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = next.run(req).await;

    let principal = response.extensions().get::<Principal>();
    let event = AuditEvent {
        occurred_at,
        user_id: principal.map(|p| p.user_id.clone()),
        user_name: principal.map(|p| p.user_name.clone()),
        method,
        path,
        query_string,
        status_code: response.status().as_u16(),
        duration_ms: started.elapsed().as_millis() as u64,
        ip,
        user_agent,
    };

    match st.audit_sender.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("audit_events_dropped_total").increment(1);
            tracing::warn!(path = %event.path, "Audit queue full, event dropped");
        }
        Err(TrySendError::Closed(_)) => {
            tracing::error!("Audit queue closed");
        }
    }

    response
}

fn is_audited(path: &str) -> bool {
    path == AUDITED_PREFIX || path.starts_with("/api/")
}
