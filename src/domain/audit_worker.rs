//! Background worker persisting audit events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::audit_event::AuditEvent;
use crate::domain::repositories::AuditRepository;

const MAX_ATTEMPTS: usize = 3;

/// Persists one event, retrying transient failures with jittered exponential backoff.
async fn persist<R>(repository: &R, event: AuditEvent)
where
    R: AuditRepository + ?Sized,
{
    let new_log = event.into_new_log();
    let strategy = ExponentialBackoff::from_millis(50)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = Retry::spawn(strategy, || repository.record(new_log.clone())).await;

    match result {
        Ok(log) => {
            metrics::counter!("audit_events_persisted_total").increment(1);
            tracing::debug!(id = log.id, path = %log.path, "Audit event stored");
        }
        Err(e) => {
            metrics::counter!("audit_events_failed_total").increment(1);
            tracing::error!(
                error = %e,
                path = %new_log.path,
                "Failed to store audit event after {MAX_ATTEMPTS} attempts"
            );
        }
    }
}

/// Consumes audit events until every sender is dropped.
///
/// At most `concurrency` events are written at once. On shutdown the worker waits
/// for in-flight writes before returning.
pub async fn run_audit_worker<R>(
    mut rx: mpsc::Receiver<AuditEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: AuditRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            persist(repository.as_ref(), event).await;
            drop(permit);
        });
    }

    let permits = u32::try_from(concurrency).unwrap_or(u32::MAX);
    let _ = semaphore.acquire_many(permits).await;
    tracing::info!("Audit worker stopped");
}

/// Waits for the worker to drain its queue after every sender has been dropped.
///
/// Returns `false` when the worker is still busy after `grace`; pending events are then lost.
pub async fn drain_audit_worker(handle: JoinHandle<()>, grace: Duration) -> bool {
    match tokio::time::timeout(grace, handle).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Audit worker panicked");
            false
        }
        Err(_) => {
            tracing::warn!("Audit worker did not drain within {:?}", grace);
            false
        }
    }
}
