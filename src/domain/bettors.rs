//! Recent-bettor deduplication.
//!
//! Derives a recency-ordered, deduplicated list of bettor names from the
//! most recent ledger entries, carrying each bettor's last-used settlement
//! mode, price and tax rate so the entry form can be prefilled.

use std::collections::HashSet;

use crate::domain::wager::{BetTransaction, RecentBettorEntry};

/// Fixed lookback window over the ledger tail, bounding scan cost.
pub const RECENT_LOOKBACK: usize = 100;

/// Scan a most-recent-first ledger tail and collect up to `limit`
/// distinct bettors.
///
/// Transactions with an empty bettor name are skipped; the first
/// occurrence of each name (the most recent) wins. At most
/// `RECENT_LOOKBACK` records are examined regardless of `limit`.
pub fn recent_bettors(
    ledger_tail_descending: &[BetTransaction],
    limit: usize,
) -> Vec<RecentBettorEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();

    for txn in ledger_tail_descending.iter().take(RECENT_LOOKBACK) {
        if entries.len() >= limit {
            break;
        }
        if txn.bettor_name.is_empty() {
            continue;
        }
        if !seen.insert(txn.bettor_name.as_str()) {
            continue;
        }
        entries.push(RecentBettorEntry {
            bettor_name: txn.bettor_name.clone(),
            last_mode: txn.mode,
            last_price: txn.quoted_price,
            last_tax_rate: txn.tax_rate,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wager::{BetDirection, LedgerPartition, SettleMode};
    use chrono::Utc;
    use uuid::Uuid;

    fn txn(name: &str, mode: SettleMode, price: i64, tax: f64) -> BetTransaction {
        BetTransaction {
            id: Uuid::new_v4(),
            partition: LedgerPartition::Local,
            race_id: 1,
            horse_id: 1,
            horse_name: "HORSE".to_string(),
            bettor_name: name.to_string(),
            direction: BetDirection::Sale,
            mode,
            quoted_price: price,
            fixed_books: None,
            stake_amount: 0.0,
            settlement_amount: 0.0,
            tax_rate: tax,
            cancelled: false,
            void_flag: false,
            special_flag: false,
            remarks: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tail = vec![
            txn("SMITH", SettleMode::VariablePrice, 150, 0.0),
            txn("JONES", SettleMode::FixedPayout, 50, 5.0),
            txn("SMITH", SettleMode::FixedPayout, 40, 5.0), // older SMITH
        ];
        let out = recent_bettors(&tail, 10);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].bettor_name, "SMITH");
        assert_eq!(out[0].last_mode, SettleMode::VariablePrice);
        assert_eq!(out[0].last_price, 150);
        assert_eq!(out[0].last_tax_rate, 0.0);
        assert_eq!(out[1].bettor_name, "JONES");
    }

    #[test]
    fn test_limit_respected() {
        let tail: Vec<_> = (0..20)
            .map(|i| txn(&format!("B{i}"), SettleMode::FixedPayout, 50, 5.0))
            .collect();
        let out = recent_bettors(&tail, 7);
        assert_eq!(out.len(), 7);
        assert_eq!(out[0].bettor_name, "B0");
        assert_eq!(out[6].bettor_name, "B6");
    }

    #[test]
    fn test_empty_names_skipped() {
        let tail = vec![
            txn("", SettleMode::FixedPayout, 50, 5.0),
            txn("SMITH", SettleMode::FixedPayout, 50, 5.0),
        ];
        let out = recent_bettors(&tail, 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bettor_name, "SMITH");
    }

    #[test]
    fn test_lookback_window_bounds_scan() {
        // A distinct name hiding past the lookback window is never found.
        let mut tail: Vec<_> = (0..RECENT_LOOKBACK)
            .map(|_| txn("SAME", SettleMode::FixedPayout, 50, 5.0))
            .collect();
        tail.push(txn("HIDDEN", SettleMode::FixedPayout, 50, 5.0));
        let out = recent_bettors(&tail, 10);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].bettor_name, "SAME");
    }

    #[test]
    fn test_never_repeats_a_name() {
        let tail: Vec<_> = (0..50)
            .map(|i| txn(&format!("B{}", i % 5), SettleMode::FixedPayout, 50, 5.0))
            .collect();
        let out = recent_bettors(&tail, 10);
        assert_eq!(out.len(), 5);
        let names: HashSet<_> = out.iter().map(|e| e.bettor_name.as_str()).collect();
        assert_eq!(names.len(), 5);
    }
}
