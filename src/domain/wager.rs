//! Core wagering domain types.
//!
//! Defines all business entities: transactions, catalog horses, exposure
//! snapshots, and recent-bettor entries. These types are the foundation of
//! the hexagonal architecture's inner ring.
//!
//! Two conventions carried throughout:
//! - `direction` gives the sign of every derived monetary figure
//!   (Sale positive, Purchase negative)
//! - exactly one settlement mode governs each transaction, statically
//!   distinguished by `SettleMode`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────
// Type aliases consumed by ports and usecases
// ────────────────────────────────────────────

/// Race identifier into the external event catalog.
pub type RaceId = u32;

/// Horse identifier within a race's catalog.
pub type HorseId = u32;

/// Ledger-assigned transaction identifier.
pub type TransactionId = Uuid;

/// Per-unit payout for fixed-payout bets.
pub const FIXED_UNIT_PAYOUT: f64 = 500.0;

// ────────────────────────────────────────────
// Enums shared across domain and ports
// ────────────────────────────────────────────

/// Ledger partition key. The two partitions are fully disjoint ledgers;
/// nothing in this core interprets the distinction beyond scoping queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerPartition {
    Local,
    International,
}

impl std::fmt::Display for LedgerPartition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::International => write!(f, "international"),
        }
    }
}

/// Transaction direction — the sign convention for settlement.
///
/// A `Sale` books positive amounts, a `Purchase` negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetDirection {
    Sale,
    Purchase,
}

impl std::fmt::Display for BetDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => write!(f, "SALE"),
            Self::Purchase => write!(f, "PURCHASE"),
        }
    }
}

/// Settlement mode — which of the two incompatible payout conventions
/// governs a transaction.
///
/// `FixedPayout` settles at a fixed 500 per unit regardless of price;
/// `VariablePrice` settles proportionally to the quoted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettleMode {
    FixedPayout,
    VariablePrice,
}

impl SettleMode {
    /// Legal inclusive range for a quoted price under this mode.
    pub fn price_range(self) -> std::ops::RangeInclusive<i64> {
        match self {
            Self::FixedPayout => 1..=460,
            Self::VariablePrice => 110..=9000,
        }
    }
}

impl std::fmt::Display for SettleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixedPayout => write!(f, "fixed"),
            Self::VariablePrice => write!(f, "variable"),
        }
    }
}

// ────────────────────────────────────────────
// Ledger-owned entities
// ────────────────────────────────────────────

/// A single bet transaction as stored in the ledger.
///
/// Immutable once created; the only field that ever changes afterwards is
/// `cancelled`, toggled through the ledger's update path. All derived
/// monetary figures are computed exactly once at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetTransaction {
    /// Transaction ID, assigned at build time and echoed by the ledger.
    pub id: TransactionId,
    /// Partition this transaction belongs to.
    pub partition: LedgerPartition,
    /// Race this bet was placed on.
    pub race_id: RaceId,
    /// Horse this bet was placed on.
    pub horse_id: HorseId,
    /// Horse name, denormalized from the catalog at entry time.
    pub horse_name: String,
    /// Bettor name: non-empty, trimmed, uppercased.
    pub bettor_name: String,
    /// Sale or Purchase.
    pub direction: BetDirection,
    /// Settlement convention for this transaction.
    pub mode: SettleMode,
    /// Integer quoted price; semantics depend on `mode`.
    pub quoted_price: i64,
    /// Signed book units — populated only in `FixedPayout` mode, `None`
    /// in `VariablePrice` mode (the mode-specific pair rule).
    pub fixed_books: Option<f64>,
    /// Derived stake, see the payout formula.
    pub stake_amount: f64,
    /// Derived settlement, see the payout formula.
    pub settlement_amount: f64,
    /// Tax rate in percent at entry time.
    pub tax_rate: f64,
    /// Whether this transaction is cancelled (excluded from exposure).
    pub cancelled: bool,
    /// Administrative void marker (deduction handling is external).
    pub void_flag: bool,
    /// Administrative special marker.
    pub special_flag: bool,
    /// Free-text remarks.
    pub remarks: String,
    /// Entry timestamp; compared against per-horse scratch cutoffs.
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────
// Catalog-owned entities (referenced, never mutated here)
// ────────────────────────────────────────────

/// A horse in a race's catalog.
///
/// Owned by the external event catalog. The exposure engine only reads
/// these; in particular `scratch_cutoff` drives the per-horse transaction
/// filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub id: HorseId,
    pub name: String,
    /// Current market price for this horse.
    pub quoted_price: i64,
    /// Bets created before this instant are void for exposure purposes.
    pub scratch_cutoff: Option<DateTime<Utc>>,
    /// Administrative void-after time (rule-4 style), not interpreted here.
    pub void_cutoff: Option<DateTime<Utc>>,
    /// Deduction applied on void, not interpreted here.
    pub void_deduction: Option<f64>,
}

// ────────────────────────────────────────────
// Ephemeral snapshot values (recomputed, never persisted)
// ────────────────────────────────────────────

/// Per-horse exposure figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorseExposure {
    pub horse_id: HorseId,
    /// Rounded settlement expressed in 500-unit books.
    pub books: i64,
    /// Race total stake minus this horse's settlement.
    pub profit_loss: f64,
    /// Rounded implied average price, 0 when undefined.
    pub average_price: i64,
}

/// Race-level exposure snapshot.
///
/// Created fresh on every aggregation call, never mutated in place,
/// superseded by the next call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceExposureSnapshot {
    pub race_id: RaceId,
    /// Sum of stakes over surviving transactions.
    pub total_stake: f64,
    /// Sum of settlements over surviving transactions.
    pub total_settlement: f64,
    /// One entry per catalog horse, in catalog order.
    pub horses: Vec<HorseExposure>,
    /// Raw sum of per-horse averages (source behavior, not a statistic).
    pub total_average_price: i64,
}

/// A recent bettor with the settings of their latest transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentBettorEntry {
    pub bettor_name: String,
    pub last_mode: SettleMode,
    /// Quoted price of the bettor's most recent transaction.
    pub last_price: i64,
    pub last_tax_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_fixed() {
        let range = SettleMode::FixedPayout.price_range();
        assert!(range.contains(&1));
        assert!(range.contains(&460));
        assert!(!range.contains(&0));
        assert!(!range.contains(&461));
    }

    #[test]
    fn test_price_range_variable() {
        let range = SettleMode::VariablePrice.price_range();
        assert!(range.contains(&110));
        assert!(range.contains(&9000));
        assert!(!range.contains(&109));
        assert!(!range.contains(&9001));
    }

    #[test]
    fn test_partition_display() {
        assert_eq!(format!("{}", LedgerPartition::Local), "local");
        assert_eq!(format!("{}", LedgerPartition::International), "international");
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(format!("{}", BetDirection::Sale), "SALE");
        assert_eq!(format!("{}", BetDirection::Purchase), "PURCHASE");
    }
}
