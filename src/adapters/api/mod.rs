//! API Adapter — HTTP Surface for the Engine
//!
//! Exposes the desk operations over axum: bet entry, cancellation,
//! exposure snapshots, recent bettors, partition switching, plus the
//! liveness/readiness probes.

pub mod routes;

pub use routes::{router, ApiState, Desk};
