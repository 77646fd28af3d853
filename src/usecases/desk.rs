//! Wager Desk - The Engine's Facade for the UI Layer
//!
//! Orchestrates the domain components over the ledger and catalog ports:
//! bet entry (validate → build → optimistic cache append → ledger
//! insert), exposure snapshots, cancellation, recent-bettor recall and
//! partition switching.
//!
//! Entry flow for a bet:
//! 1. Validate and build the immutable transaction
//! 2. Append it to the race cache (visible to the next snapshot at once)
//! 3. Await the ledger insert; on failure, remove the appended record
//!    again so the cache never shows a bet the ledger rejected

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::bettors::{recent_bettors, RECENT_LOOKBACK};
use crate::domain::exposure::aggregate;
use crate::domain::slip::{build, BetSlip, ValidationError};
use crate::domain::wager::{
  BetTransaction, LedgerPartition, RaceExposureSnapshot, RaceId, RecentBettorEntry,
  TransactionId,
};
use crate::ports::catalog::RaceCatalog;
use crate::ports::ledger::Ledger;
use crate::usecases::cache::RaceTransactionCache;

/// Failures surfaced to the UI layer.
///
/// Nothing here is fatal to the process; everything is recoverable by
/// user retry. Validation errors are never retried automatically.
#[derive(Debug, Error)]
pub enum DeskError {
  /// User-correctable entry mistake.
  #[error(transparent)]
  Validation(#[from] ValidationError),
  /// The race's horse list could not be obtained; no partial snapshot
  /// is ever returned in its place.
  #[error("no horse catalog available for race {race_id}")]
  CatalogUnavailable { race_id: RaceId },
  /// Ledger or catalog I/O failure, surfaced as-is.
  #[error(transparent)]
  Io(#[from] anyhow::Error),
}

/// Facade over the exposure engine, owning the race cache.
pub struct WagerDesk<L: Ledger, C: RaceCatalog> {
  ledger: Arc<L>,
  catalog: Arc<C>,
  cache: RaceTransactionCache<L>,
}

impl<L: Ledger, C: RaceCatalog> WagerDesk<L, C> {
  /// Create a desk bound to a ledger partition.
  pub fn new(ledger: Arc<L>, catalog: Arc<C>, partition: LedgerPartition) -> Self {
    let cache = RaceTransactionCache::new(Arc::clone(&ledger), partition);
    Self {
      ledger,
      catalog,
      cache,
    }
  }

  /// The currently active ledger partition.
  pub fn partition(&self) -> LedgerPartition {
    self.cache.partition()
  }

  /// Validate, build and record a bet transaction.
  ///
  /// The cache append happens before the ledger ack (optimistic read);
  /// a failed insert removes the appended record again and surfaces the
  /// error for retry.
  pub async fn place_bet(&mut self, slip: BetSlip) -> Result<BetTransaction, DeskError> {
    let txn = build(slip, Utc::now())?;
    let race_id = txn.race_id;

    self.cache.append(race_id, txn.clone());

    match self.ledger.insert(&txn).await {
      Ok(stored) => {
        info!(
          id = %stored.id,
          race_id,
          horse_id = stored.horse_id,
          bettor = %stored.bettor_name,
          mode = %stored.mode,
          stake = stored.stake_amount,
          settlement = stored.settlement_amount,
          "Bet transaction recorded"
        );
        Ok(stored)
      }
      Err(e) => {
        warn!(id = %txn.id, race_id, error = %e, "Ledger insert failed, dropping optimistic append");
        self.cache.remove(race_id, txn.id);
        Err(DeskError::Io(e))
      }
    }
  }

  /// Fresh exposure snapshot for a race.
  ///
  /// Fails with `CatalogUnavailable` when the catalog has no horse list
  /// for the race; transaction reads come from the cache (ledger on
  /// first miss).
  pub async fn race_snapshot(&mut self, race_id: RaceId) -> Result<RaceExposureSnapshot, DeskError> {
    let horses = self
      .catalog
      .horses(race_id)
      .await?
      .ok_or(DeskError::CatalogUnavailable { race_id })?;

    let transactions = self.cache.get(race_id).await?;
    Ok(aggregate(race_id, transactions, &horses))
  }

  /// Toggle cancellation on a stored transaction and patch the cached
  /// copy so the next snapshot reflects it immediately.
  pub async fn cancel_bet(
    &mut self,
    race_id: RaceId,
    id: TransactionId,
    cancelled: bool,
  ) -> Result<(), DeskError> {
    self.ledger.set_cancelled(id, cancelled).await?;
    self.cache.set_cancelled(race_id, id, cancelled);
    info!(%id, race_id, cancelled, "Bet transaction cancellation updated");
    Ok(())
  }

  /// Recency-ordered deduplicated bettors with their last-used settings.
  ///
  /// Reads the ledger tail directly (independent of race selection).
  pub async fn recent_bettors(&self, limit: usize) -> Result<Vec<RecentBettorEntry>, DeskError> {
    let tail = self
      .ledger
      .recent(self.cache.partition(), RECENT_LOOKBACK)
      .await?;
    Ok(recent_bettors(&tail, limit))
  }

  /// Switch the active ledger partition, dropping every memoized race.
  pub fn switch_partition(&mut self, partition: LedgerPartition) {
    self.cache.switch_partition(partition);
  }

  /// Engine health: both collaborators reachable.
  pub async fn is_healthy(&self) -> bool {
    self.ledger.is_healthy().await && self.catalog.is_healthy().await
  }
}
