//! Domain layer containing business entities and rules.
//!
//! The domain layer has no dependency on the HTTP or persistence layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`shipping`] - Zone matching and shipping rate pricing
//! - [`ranking`] - Discounted product ranking
//! - [`audit_event`] - Captured request model for the audit trail
//! - [`audit_worker`] - Asynchronous audit persistence worker
//!
//! # Audit Flow
//!
//! 1. The audit middleware captures each finished `/api` request
//! 2. An [`audit_event::AuditEvent`] is sent to a bounded channel (dropped when full)
//! 3. [`audit_worker::run_audit_worker`] persists events with retry logic
//! 4. Records are stored via [`repositories::AuditRepository`]

pub mod audit_event;
pub mod audit_worker;
pub mod entities;
pub mod ranking;
pub mod repositories;
pub mod shipping;
