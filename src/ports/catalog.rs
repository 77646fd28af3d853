//! Catalog Port - Race/Horse Catalog Interface
//!
//! The event catalog owns race cards and their horses, including each
//! horse's scratch cutoff. The engine only ever reads it.

use async_trait::async_trait;

use crate::domain::wager::{Horse, RaceId};

/// Trait for race-card providers.
#[async_trait]
pub trait RaceCatalog: Send + Sync + 'static {
  /// The horse list for a race, or `None` when the catalog has no card
  /// for it. Aggregation must abort in the `None` case rather than
  /// produce an empty snapshot.
  async fn horses(&self, race_id: RaceId) -> anyhow::Result<Option<Vec<Horse>>>;

  /// Check if the catalog source is reachable.
  async fn is_healthy(&self) -> bool;
}
