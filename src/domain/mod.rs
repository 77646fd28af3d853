//! Domain layer - Core wagering logic and models.
//!
//! This module contains the pure exposure-engine logic: no I/O, no
//! external service dependencies (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod bettors;
pub mod exposure;
pub mod payout;
pub mod slip;
pub mod wager;

// Re-export core types for convenience
pub use bettors::{recent_bettors, RECENT_LOOKBACK};
pub use exposure::aggregate;
pub use payout::{settle, Settlement};
pub use slip::{build, BetSlip, ValidationError};
pub use wager::{
    BetDirection, BetTransaction, Horse, HorseExposure, HorseId, LedgerPartition,
    RaceExposureSnapshot, RaceId, RecentBettorEntry, SettleMode, TransactionId,
};
