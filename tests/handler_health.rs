mod common;

use axum::http::StatusCode;
use common::{FakeStorefrontRepository, Fixtures, test_server};
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (server, _rx) = test_server(Fixtures::default());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["audit_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (server, _rx) = test_server(Fixtures::default());

    let response = server.get("/health").await;

    let json = response.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("database").is_some());
    assert!(json["checks"].get("audit_queue").is_some());
    assert!(json["checks"].get("cache").is_some());
}

#[tokio::test]
async fn test_health_degraded_on_database_error() {
    let storefront = Arc::new(FakeStorefrontRepository {
        fail: true,
        ..Default::default()
    });
    let (server, _rx) = test_server(Fixtures {
        storefront,
        ..Default::default()
    });

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert_eq!(json["checks"]["audit_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_audit_queue_closed() {
    let (server, rx) = test_server(Fixtures::default());
    drop(rx);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>()["checks"]["audit_queue"]["status"],
        "error"
    );
}
