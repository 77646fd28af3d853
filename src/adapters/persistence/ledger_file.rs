//! JSONL Ledger - Append-mostly Transaction Store
//!
//! Persists bet transactions to one JSONL file per partition under
//! `<data_dir>/ledger/`. Each line is a self-contained JSON record:
//! either a full transaction or a cancellation patch. The file is never
//! rewritten; cancellation appends a patch line that is replayed on load.
//! An in-memory index per partition serves queries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::domain::wager::{BetTransaction, LedgerPartition, RaceId, TransactionId};
use crate::ports::ledger::Ledger;

/// One line of the ledger file.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LedgerLine {
    Bet(BetTransaction),
    Cancel {
        id: TransactionId,
        cancelled: bool,
    },
}

/// File-backed ledger with a lazily-loaded in-memory index.
///
/// The index holds each partition's transactions in append order; query
/// methods sort newest-first on the way out, matching the port contract.
pub struct JsonlLedger {
    ledger_dir: PathBuf,
    index: Mutex<HashMap<LedgerPartition, Vec<BetTransaction>>>,
}

impl JsonlLedger {
    /// Create a ledger rooted in the given data directory.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let ledger_dir = Path::new(data_dir).join("ledger");
        fs::create_dir_all(&ledger_dir)
            .await
            .context("Failed to create ledger directory")?;
        Ok(Self {
            ledger_dir,
            index: Mutex::new(HashMap::new()),
        })
    }

    fn partition_path(&self, partition: LedgerPartition) -> PathBuf {
        self.ledger_dir.join(format!("{partition}.jsonl"))
    }

    /// Replay a partition's file into the index on first access.
    async fn ensure_loaded(
        &self,
        index: &mut HashMap<LedgerPartition, Vec<BetTransaction>>,
        partition: LedgerPartition,
    ) -> Result<()> {
        if index.contains_key(&partition) {
            return Ok(());
        }

        let path = self.partition_path(partition);
        let mut txns: Vec<BetTransaction> = Vec::new();

        if path.exists() {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read ledger file {}", path.display()))?;
            for line in content.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<LedgerLine>(line) {
                    Ok(LedgerLine::Bet(txn)) => txns.push(txn),
                    Ok(LedgerLine::Cancel { id, cancelled }) => {
                        if let Some(txn) = txns.iter_mut().find(|t| t.id == id) {
                            txn.cancelled = cancelled;
                        }
                    }
                    Err(e) => {
                        warn!(
                            file = %path.display(),
                            error = %e,
                            "Skipping malformed ledger line"
                        );
                    }
                }
            }
            info!(%partition, count = txns.len(), "Loaded ledger partition");
        }

        index.insert(partition, txns);
        Ok(())
    }

    /// Append one line to a partition's file.
    async fn append_line(&self, partition: LedgerPartition, line: &LedgerLine) -> Result<()> {
        let path = self.partition_path(partition);
        let mut json = serde_json::to_string(line).context("Failed to serialize ledger line")?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .context("Failed to open ledger file")?;
        file.write_all(json.as_bytes())
            .await
            .context("Failed to write ledger line")?;
        file.flush().await.context("Failed to flush ledger file")?;
        Ok(())
    }
}

#[async_trait]
impl Ledger for JsonlLedger {
    #[instrument(skip(self, txn), fields(id = %txn.id, race_id = txn.race_id))]
    async fn insert(&self, txn: &BetTransaction) -> Result<BetTransaction> {
        let mut index = self.index.lock().await;
        self.ensure_loaded(&mut index, txn.partition).await?;

        self.append_line(txn.partition, &LedgerLine::Bet(txn.clone()))
            .await?;

        if let Some(txns) = index.get_mut(&txn.partition) {
            txns.push(txn.clone());
        }
        Ok(txn.clone())
    }

    async fn query_by_race(
        &self,
        partition: LedgerPartition,
        race_id: RaceId,
    ) -> Result<Vec<BetTransaction>> {
        let mut index = self.index.lock().await;
        self.ensure_loaded(&mut index, partition).await?;

        let mut txns: Vec<BetTransaction> = index
            .get(&partition)
            .map(|txns| {
                txns.iter()
                    .filter(|t| t.race_id == race_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        txns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(txns)
    }

    async fn recent(
        &self,
        partition: LedgerPartition,
        limit: usize,
    ) -> Result<Vec<BetTransaction>> {
        let mut index = self.index.lock().await;
        self.ensure_loaded(&mut index, partition).await?;

        let mut txns: Vec<BetTransaction> =
            index.get(&partition).cloned().unwrap_or_default();
        txns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        txns.truncate(limit);
        Ok(txns)
    }

    #[instrument(skip(self), fields(%id))]
    async fn set_cancelled(&self, id: TransactionId, cancelled: bool) -> Result<()> {
        let mut index = self.index.lock().await;

        // The patch has to land in the owning partition's file, so load
        // both before searching.
        for partition in [LedgerPartition::Local, LedgerPartition::International] {
            self.ensure_loaded(&mut index, partition).await?;
        }

        let owner = index.iter().find_map(|(partition, txns)| {
            txns.iter().any(|t| t.id == id).then_some(*partition)
        });
        let Some(partition) = owner else {
            bail!("Unknown transaction id {id}");
        };

        self.append_line(partition, &LedgerLine::Cancel { id, cancelled })
            .await?;

        if let Some(txn) = index
            .get_mut(&partition)
            .and_then(|txns| txns.iter_mut().find(|t| t.id == id))
        {
            txn.cancelled = cancelled;
        }
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        let test_path = self.ledger_dir.join(".health_check");
        let result = fs::write(&test_path, b"ok").await;
        let _ = fs::remove_file(&test_path).await;
        result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slip::{build, BetSlip};
    use crate::domain::wager::{BetDirection, SettleMode};
    use chrono::{Duration, Utc};

    fn slip(name: &str) -> BetSlip {
        BetSlip {
            partition: LedgerPartition::Local,
            race_id: Some(1),
            horse_id: Some(2),
            horse_name: "HORSE".to_string(),
            bettor_name: name.to_string(),
            direction: BetDirection::Sale,
            mode: SettleMode::FixedPayout,
            raw_amount: 10.0,
            quoted_price: 50.0,
            tax_rate: 5.0,
            remarks: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_query_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonlLedger::new(dir.path().to_str().unwrap()).await.unwrap();

        let txn = build(slip("SMITH"), Utc::now()).unwrap();
        ledger.insert(&txn).await.unwrap();

        let txns = ledger
            .query_by_race(LedgerPartition::Local, 1)
            .await
            .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id, txn.id);

        // Other partition stays empty.
        let other = ledger
            .query_by_race(LedgerPartition::International, 1)
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_patch_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let txn = build(slip("SMITH"), Utc::now()).unwrap();

        {
            let ledger = JsonlLedger::new(dir.path().to_str().unwrap()).await.unwrap();
            ledger.insert(&txn).await.unwrap();
            ledger.set_cancelled(txn.id, true).await.unwrap();
        }

        // Fresh instance replays the file, including the patch line.
        let ledger = JsonlLedger::new(dir.path().to_str().unwrap()).await.unwrap();
        let txns = ledger
            .query_by_race(LedgerPartition::Local, 1)
            .await
            .unwrap();
        assert_eq!(txns.len(), 1);
        assert!(txns[0].cancelled);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonlLedger::new(dir.path().to_str().unwrap()).await.unwrap();

        let base = Utc::now();
        for i in 0..5 {
            let mut txn = build(slip(&format!("B{i}")), base).unwrap();
            txn.created_at = base + Duration::seconds(i);
            ledger.insert(&txn).await.unwrap();
        }

        let tail = ledger.recent(LedgerPartition::Local, 3).await.unwrap();
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].bettor_name, "B4");
        assert_eq!(tail[2].bettor_name, "B2");
    }

    #[tokio::test]
    async fn test_unknown_id_cancel_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonlLedger::new(dir.path().to_str().unwrap()).await.unwrap();
        let err = ledger.set_cancelled(uuid::Uuid::new_v4(), true).await;
        assert!(err.is_err());
    }
}
