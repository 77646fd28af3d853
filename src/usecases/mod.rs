//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! engine's workflows. Each use case is a self-contained operation.
//!
//! Use cases:
//! - `RaceTransactionCache`: memoized per-race ledger reads with
//!   append-on-write and wholesale invalidation
//! - `WagerDesk`: the facade the UI layer calls (entry, snapshots,
//!   cancellation, recent bettors, partition switch)

pub mod cache;
pub mod desk;

pub use cache::RaceTransactionCache;
pub use desk::{DeskError, WagerDesk};
