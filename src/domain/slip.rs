//! Transaction validator/builder.
//!
//! Turns a user's bet entry into a fully-populated immutable
//! `BetTransaction`, enforcing the legal price range for each settlement
//! mode. Validation rules are checked in a fixed order and the first
//! violation wins, so the UI always shows the most actionable message.
//!
//! No side effects: persistence is the caller's responsibility.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::payout::{effective_amount, settle};
use crate::domain::wager::{
    BetDirection, BetTransaction, HorseId, LedgerPartition, RaceId, SettleMode,
};

/// A user's bet entry, as captured by the form layer.
///
/// `race_id`/`horse_id` are optional because the form allows submitting
/// before a selection is made; the builder rejects that case first.
#[derive(Debug, Clone)]
pub struct BetSlip {
    pub partition: LedgerPartition,
    pub race_id: Option<RaceId>,
    pub horse_id: Option<HorseId>,
    /// Horse name as shown in the catalog, denormalized onto the record.
    pub horse_name: String,
    pub bettor_name: String,
    pub direction: BetDirection,
    pub mode: SettleMode,
    /// Unsigned amount as entered; the direction supplies the sign.
    pub raw_amount: f64,
    /// Quoted price as entered; floored to an integer before validation.
    pub quoted_price: f64,
    pub tax_rate: f64,
    pub remarks: String,
}

/// User-correctable validation failures, in check order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("select a race and horse first")]
    SelectionRequired,
    #[error("bettor name is required")]
    NameRequired,
    #[error("bet amount must be positive")]
    InvalidAmount,
    #[error("{mode} price {price} outside legal range {lo}..={hi}")]
    QuotedPriceOutOfRange {
        mode: SettleMode,
        price: i64,
        lo: i64,
        hi: i64,
    },
}

/// Validate a slip and build the immutable transaction record.
///
/// The quoted price is floored (fractional quotes are never stored) and
/// range-checked against the slip's mode. Derived monetary figures come
/// from the payout formula; `fixed_books` is populated only in
/// `FixedPayout` mode.
pub fn build(slip: BetSlip, now: DateTime<Utc>) -> Result<BetTransaction, ValidationError> {
    let (race_id, horse_id) = match (slip.race_id, slip.horse_id) {
        (Some(r), Some(h)) => (r, h),
        _ => return Err(ValidationError::SelectionRequired),
    };

    let bettor_name = slip.bettor_name.trim().to_uppercase();
    if bettor_name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if slip.raw_amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }

    let quoted_price = slip.quoted_price.floor() as i64;
    let range = slip.mode.price_range();
    if !range.contains(&quoted_price) {
        return Err(ValidationError::QuotedPriceOutOfRange {
            mode: slip.mode,
            price: quoted_price,
            lo: *range.start(),
            hi: *range.end(),
        });
    }

    let derived = settle(slip.direction, slip.mode, slip.raw_amount, quoted_price);
    let fixed_books = match slip.mode {
        SettleMode::FixedPayout => Some(effective_amount(slip.direction, slip.raw_amount)),
        SettleMode::VariablePrice => None,
    };

    Ok(BetTransaction {
        id: Uuid::new_v4(),
        partition: slip.partition,
        race_id,
        horse_id,
        horse_name: slip.horse_name,
        bettor_name,
        direction: slip.direction,
        mode: slip.mode,
        quoted_price,
        fixed_books,
        stake_amount: derived.stake_amount,
        settlement_amount: derived.settlement_amount,
        tax_rate: slip.tax_rate,
        cancelled: false,
        void_flag: false,
        special_flag: false,
        remarks: slip.remarks,
        created_at: now,
    })
}
