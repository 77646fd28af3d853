//! Ledger Port - Bet Transaction Persistence Interface
//!
//! Defines the trait the engine requires from the transaction store.
//! The ledger is append-mostly: records are inserted once and the only
//! later mutation is toggling the `cancelled` flag. Every query is scoped
//! to a partition, since the two partitions are disjoint ledgers.

use async_trait::async_trait;

use crate::domain::wager::{BetTransaction, LedgerPartition, RaceId, TransactionId};

/// Trait for bet-transaction persistence providers.
///
/// Read results are always sorted by `created_at` descending, matching
/// the source system's query contract; the cache and the recent-bettor
/// scan both rely on that ordering.
#[async_trait]
pub trait Ledger: Send + Sync + 'static {
  /// Persist a transaction, echoing the stored record.
  async fn insert(&self, txn: &BetTransaction) -> anyhow::Result<BetTransaction>;

  /// All transactions for one race in one partition, newest first.
  async fn query_by_race(
    &self,
    partition: LedgerPartition,
    race_id: RaceId,
  ) -> anyhow::Result<Vec<BetTransaction>>;

  /// The newest `limit` transactions in one partition, newest first.
  async fn recent(
    &self,
    partition: LedgerPartition,
    limit: usize,
  ) -> anyhow::Result<Vec<BetTransaction>>;

  /// Toggle the `cancelled` flag on a stored transaction.
  async fn set_cancelled(&self, id: TransactionId, cancelled: bool) -> anyhow::Result<()>;

  /// Check if the ledger is healthy (disk space, permissions).
  async fn is_healthy(&self) -> bool;
}
