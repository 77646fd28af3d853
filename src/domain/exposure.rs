//! Exposure aggregator.
//!
//! Turns a race's full transaction set plus its horse catalog into a
//! fresh `RaceExposureSnapshot`: per-horse books, profit/loss and implied
//! average, and the race-level totals. Pure function — it never mutates
//! the transactions or the catalog, and every call produces a new value.
//!
//! Rounding is round-half-away-from-zero on the final division result
//! only (`f64::round`); intermediate sums stay exact.

use crate::domain::wager::{
    BetTransaction, Horse, HorseExposure, RaceExposureSnapshot, RaceId, FIXED_UNIT_PAYOUT,
};

/// Whether a transaction survives into the exposure calculation.
///
/// Cancelled transactions never survive. A horse with a scratch cutoff
/// voids every bet created before that instant; the boundary itself is
/// inclusive. The cutoff is per-horse: transactions on horses without a
/// cutoff (or on ids missing from the catalog) always survive.
fn survives(txn: &BetTransaction, horses: &[Horse]) -> bool {
    if txn.cancelled {
        return false;
    }
    match horses.iter().find(|h| h.id == txn.horse_id) {
        Some(Horse {
            scratch_cutoff: Some(cutoff),
            ..
        }) => txn.created_at >= *cutoff,
        _ => true,
    }
}

/// Aggregate a race's transactions into a per-horse exposure snapshot.
///
/// Per catalog horse:
/// - `books` = settlement / 500, rounded
/// - `profit_loss` = race total stake − horse settlement
/// - `average_price` = 500 / (settlement / stake), rounded, or 0 when
///   either sum is zero
///
/// `total_average_price` is the raw sum of the per-horse averages. That is
/// the source system's behavior, preserved deliberately — it is a display
/// figure, not a weighted statistic.
pub fn aggregate(
    race_id: RaceId,
    transactions: &[BetTransaction],
    horses: &[Horse],
) -> RaceExposureSnapshot {
    let surviving: Vec<&BetTransaction> = transactions
        .iter()
        .filter(|t| survives(t, horses))
        .collect();

    let total_stake: f64 = surviving.iter().map(|t| t.stake_amount).sum();
    let total_settlement: f64 = surviving.iter().map(|t| t.settlement_amount).sum();

    let mut total_average_price = 0i64;
    let mut rows = Vec::with_capacity(horses.len());

    for horse in horses {
        let mut horse_settlement = 0.0;
        let mut horse_stake = 0.0;
        for txn in surviving.iter().filter(|t| t.horse_id == horse.id) {
            horse_settlement += txn.settlement_amount;
            horse_stake += txn.stake_amount;
        }

        let books = (horse_settlement / FIXED_UNIT_PAYOUT).round() as i64;
        let profit_loss = total_stake - horse_settlement;
        let average_price = if horse_stake != 0.0 && horse_settlement != 0.0 {
            (FIXED_UNIT_PAYOUT / (horse_settlement / horse_stake)).round() as i64
        } else {
            0
        };

        total_average_price += average_price;
        rows.push(HorseExposure {
            horse_id: horse.id,
            books,
            profit_loss,
            average_price,
        });
    }

    RaceExposureSnapshot {
        race_id,
        total_stake,
        total_settlement,
        horses: rows,
        total_average_price,
    }
}
