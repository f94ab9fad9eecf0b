use serde::{Deserialize, Serialize};

use crate::chance_table::ChanceTier;
use crate::outcome_resolver::SpinOutcome;

/// Turns a resolved spin into a balance change. The house edge, in basis
/// points, is taken off the gross payout of a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayoutCalculator {
    pub house_edge_bps: u32,
}

/// What a spin did to the balance.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub net_payout: u64,
    pub delta: i64,
    pub balance: u64,
}

impl PayoutCalculator {
    pub fn new(house_edge_bps: u32) -> Self {
        Self { house_edge_bps: house_edge_bps.min(10_000) }
    }

    /// Gross payout minus commission. Zero on a loss.
    pub fn net_payout(&self, outcome: &SpinOutcome) -> u64 {
        if !outcome.won {
            return 0;
        }
        let commission = outcome.payout.saturating_mul(self.house_edge_bps as u64) / 10_000;
        outcome.payout - commission
    }

    pub fn delta(&self, outcome: &SpinOutcome, bet_amount: u64) -> i64 {
        let stake = bet_amount.min(i64::MAX as u64) as i64;
        if outcome.won {
            let net = self.net_payout(outcome).min(i64::MAX as u64) as i64;
            net - stake
        } else {
            -stake
        }
    }

    /// `max(0, balance + delta)`. Clamping means a displayed balance cannot be
    /// used to reconstruct lifetime winnings.
    pub fn apply(&self, outcome: &SpinOutcome, bet_amount: u64, balance: u64) -> u64 {
        self.settle(outcome, bet_amount, balance).balance
    }

    pub fn settle(&self, outcome: &SpinOutcome, bet_amount: u64, balance: u64) -> Settlement {
        let delta = self.delta(outcome, bet_amount);
        let balance = if delta >= 0 {
            balance.saturating_add(delta.unsigned_abs())
        } else {
            balance.saturating_sub(delta.unsigned_abs())
        };
        Settlement { net_payout: self.net_payout(outcome), delta, balance }
    }

    /// Mean net result of betting `bet_amount` on `tier`, after the house
    /// edge. Zero is a fair bet.
    pub fn expected_value(&self, tier: &ChanceTier, bet_amount: u64) -> f64 {
        let win_probability = tier.win_probability_percent as f64 / 100.0;
        let edge = self.house_edge_bps as f64 / 10_000.0;
        let bet = bet_amount as f64;
        let gross = bet * tier.payout_multiplier.as_f64() * (1.0 - edge);
        win_probability * (gross - bet) - (1.0 - win_probability) * bet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance_table::{ChanceTable, Multiplier, TierId, WheelColor};

    fn outcome(won: bool, multiplier: u32, bet: u64) -> SpinOutcome {
        let multiplier = if won { Multiplier::from_hundredths(multiplier) } else { Multiplier::ZERO };
        SpinOutcome {
            won,
            drawn_number: 1,
            multiplier_applied: multiplier,
            payout: multiplier.gross(bet),
            bonus_item: None,
            winning_color: None,
        }
    }

    #[test]
    fn test_loss_floors_at_zero() {
        let calculator = PayoutCalculator::default();
        assert_eq!(calculator.apply(&outcome(false, 200, 25), 25, 10), 0);
    }

    #[test]
    fn test_even_money_win_and_loss() {
        let calculator = PayoutCalculator::default();
        let settled = calculator.settle(&outcome(true, 200, 100), 100, 500);
        assert_eq!(settled, Settlement { net_payout: 200, delta: 100, balance: 600 });
        assert_eq!(calculator.apply(&outcome(false, 200, 100), 100, 500), 400);
    }

    #[test]
    fn test_house_edge_shaves_gross_payout() {
        let calculator = PayoutCalculator::new(100);
        // 100 on red pays 500 gross, 1% commission leaves 495.
        let settled = calculator.settle(&outcome(true, 500, 100), 100, 0);
        assert_eq!(settled.net_payout, 495);
        assert_eq!(settled.delta, 395);
    }

    #[test]
    fn test_fractional_payout_is_floored() {
        let calculator = PayoutCalculator::default();
        // 3 spins at 1.54x is 4.62, paid as 4.
        assert_eq!(calculator.apply(&outcome(true, 154, 3), 3, 10), 11);
    }

    #[test]
    fn test_expected_value() {
        let table = ChanceTable::lucky2();
        let blue = table.lookup(TierId::Color(WheelColor::Blue)).unwrap();
        let fair = PayoutCalculator::default().expected_value(blue, 100);
        // 0.6 * (200 - 100) - 0.4 * 100
        assert!((fair - 20.0).abs() < 1e-9);
        let edged = PayoutCalculator::new(100).expected_value(blue, 100);
        assert!((edged - 18.8).abs() < 1e-9);

        let mono = ChanceTable::mono();
        let even = mono.lookup(TierId::Chance(50)).unwrap();
        assert!(PayoutCalculator::default().expected_value(even, 10).abs() < 1e-9);
    }
}
