//! Race Transaction Cache - Memoized Per-Race Ledger Reads
//!
//! Memoizes the per-race transaction list fetched from the ledger so the
//! exposure aggregator never re-runs against a stale fetch on every UI
//! interaction. Supports append-on-write (so a just-entered bet is
//! visible to the very next aggregation, before the ledger ack) and
//! wholesale invalidation on partition switch.
//!
//! No TTL or size bound: correctness relies on `invalidate_all` being
//! called on every partition switch, and on process restart discarding
//! the cache entirely (it is never persisted).

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::wager::{BetTransaction, LedgerPartition, RaceId, TransactionId};
use crate::ports::ledger::Ledger;

/// Explicit per-race transaction cache over a ledger port.
///
/// Mutated only by its single-threaded owner; the concurrency model has
/// no multi-writer scenario, so there is no locking here.
pub struct RaceTransactionCache<L: Ledger> {
  ledger: Arc<L>,
  partition: LedgerPartition,
  races: HashMap<RaceId, Vec<BetTransaction>>,
}

impl<L: Ledger> RaceTransactionCache<L> {
  /// Create an empty cache bound to a ledger partition.
  pub fn new(ledger: Arc<L>, partition: LedgerPartition) -> Self {
    Self {
      ledger,
      partition,
      races: HashMap::new(),
    }
  }

  /// The partition all cached reads are scoped to.
  pub fn partition(&self) -> LedgerPartition {
    self.partition
  }

  /// The race's transaction list, fetched from the ledger on first miss
  /// and memoized afterwards.
  ///
  /// A failed fetch propagates the error and leaves the cache untouched,
  /// so previously memoized races keep serving.
  pub async fn get(&mut self, race_id: RaceId) -> anyhow::Result<&[BetTransaction]> {
    if !self.races.contains_key(&race_id) {
      let fetched = self.ledger.query_by_race(self.partition, race_id).await?;
      info!(race_id, count = fetched.len(), "Cached race transactions from ledger");
      self.races.insert(race_id, fetched);
    } else {
      debug!(race_id, "Race transaction cache hit");
    }
    Ok(self.races.get(&race_id).map(Vec::as_slice).unwrap_or(&[]))
  }

  /// Append a locally-built transaction without a ledger round trip.
  pub fn append(&mut self, race_id: RaceId, txn: BetTransaction) {
    self.races.entry(race_id).or_default().push(txn);
  }

  /// Remove one appended transaction again (failed ledger insert).
  ///
  /// Touches nothing but the matching record.
  pub fn remove(&mut self, race_id: RaceId, id: TransactionId) {
    if let Some(txns) = self.races.get_mut(&race_id) {
      txns.retain(|t| t.id != id);
    }
  }

  /// Patch the cached copy's `cancelled` flag, if the race is memoized.
  pub fn set_cancelled(&mut self, race_id: RaceId, id: TransactionId, cancelled: bool) {
    if let Some(txn) = self
      .races
      .get_mut(&race_id)
      .and_then(|txns| txns.iter_mut().find(|t| t.id == id))
    {
      txn.cancelled = cancelled;
    }
  }

  /// Drop every memoized race. Invoked on every partition switch, since
  /// different partitions are disjoint ledgers.
  pub fn invalidate_all(&mut self) {
    let dropped = self.races.len();
    self.races.clear();
    info!(dropped_races = dropped, "Race transaction cache invalidated");
  }

  /// Switch partitions, invalidating everything memoized.
  pub fn switch_partition(&mut self, partition: LedgerPartition) {
    if partition != self.partition {
      info!(from = %self.partition, to = %partition, "Ledger partition switch");
      self.partition = partition;
    }
    self.invalidate_all();
  }
}
