//! Settlement payout formula.
//!
//! Computes the stake and settlement amounts implied by a transaction at
//! creation time. Two incompatible settlement conventions exist in the
//! domain: a fixed per-unit payout and a price-proportional payout. The
//! formula is branch-exact; operator order (multiply before divide) is
//! load-bearing for rounding and must not be rearranged.

use crate::domain::wager::{BetDirection, SettleMode, FIXED_UNIT_PAYOUT};

/// Derived monetary figures for one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    /// Amount at risk.
    pub stake_amount: f64,
    /// Amount due at settlement.
    pub settlement_amount: f64,
}

/// Signed amount under the direction convention: Sale positive,
/// Purchase negative.
pub fn effective_amount(direction: BetDirection, raw_amount: f64) -> f64 {
    match direction {
        BetDirection::Sale => raw_amount,
        BetDirection::Purchase => -raw_amount,
    }
}

/// Compute stake and settlement for a transaction.
///
/// - `FixedPayout`: stake = effective × quoted price,
///   settlement = effective × 500. The transaction's book figure is the
///   effective amount itself.
/// - `VariablePrice`: stake = effective,
///   settlement = (effective × quoted price) / 100.
pub fn settle(
    direction: BetDirection,
    mode: SettleMode,
    raw_amount: f64,
    quoted_price: i64,
) -> Settlement {
    let effective = effective_amount(direction, raw_amount);
    let price = quoted_price as f64;

    match mode {
        SettleMode::FixedPayout => Settlement {
            stake_amount: effective * price,
            settlement_amount: effective * FIXED_UNIT_PAYOUT,
        },
        SettleMode::VariablePrice => Settlement {
            stake_amount: effective,
            settlement_amount: (effective * price) / 100.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_payout_sale() {
        let s = settle(BetDirection::Sale, SettleMode::FixedPayout, 10.0, 50);
        assert_eq!(s.stake_amount, 500.0);
        assert_eq!(s.settlement_amount, 5000.0);
    }

    #[test]
    fn test_fixed_payout_purchase_negates() {
        let s = settle(BetDirection::Purchase, SettleMode::FixedPayout, 10.0, 50);
        assert_eq!(s.stake_amount, -500.0);
        assert_eq!(s.settlement_amount, -5000.0);
    }

    #[test]
    fn test_variable_price_purchase() {
        // Spec scenario: amount 20, price 150, Purchase → settlement -30.
        let s = settle(BetDirection::Purchase, SettleMode::VariablePrice, 20.0, 150);
        assert_eq!(s.stake_amount, -20.0);
        assert_eq!(s.settlement_amount, -30.0);
    }

    #[test]
    fn test_variable_price_sale() {
        let s = settle(BetDirection::Sale, SettleMode::VariablePrice, 20.0, 150);
        assert_eq!(s.stake_amount, 20.0);
        assert_eq!(s.settlement_amount, 30.0);
    }

    #[test]
    fn test_settle_deterministic() {
        let a = settle(BetDirection::Sale, SettleMode::VariablePrice, 7.0, 333);
        let b = settle(BetDirection::Sale, SettleMode::VariablePrice, 7.0, 333);
        assert_eq!(a, b);
    }

    #[test]
    fn test_multiply_before_divide() {
        // (3 * 110) / 100 = 3.3 exactly under f64; 3 * (110 / 100) drifts.
        let s = settle(BetDirection::Sale, SettleMode::VariablePrice, 3.0, 110);
        assert_eq!(s.settlement_amount, 330.0 / 100.0);
    }
}
