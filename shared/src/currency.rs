use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEMO_SPINS, DEMO_STARS, SPIN_PACKS, STARS_PER_SPIN};
use crate::error::WagerError;

/// The two balances a player holds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Minor currency, used by Lucky2 and for pricing.
    Stars,
    /// Bundled currency, used by Mono.
    Spins,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Spins => "spins",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Stars => "⭐",
            Self::Spins => "🎰",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed conversion between spins and stars.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    pub stars_per_spin: u64,
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl ExchangeRate {
    pub const STANDARD: Self = Self { stars_per_spin: STARS_PER_SPIN };

    /// Converts `amount` between units. Stars to spins rounds up, so a
    /// converted minimum is never cheaper than the original.
    pub fn convert(&self, amount: u64, from: Currency, to: Currency) -> u64 {
        match (from, to) {
            (Currency::Stars, Currency::Spins) => amount.div_ceil(self.stars_per_spin.max(1)),
            (Currency::Spins, Currency::Stars) => amount.saturating_mul(self.stars_per_spin),
            _ => amount,
        }
    }
}

/// Stars and spins owned by one account. Neither counter goes below zero.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountBalance {
    pub stars: u64,
    pub spins: u64,
}

impl AccountBalance {
    pub fn new(stars: u64, spins: u64) -> Self {
        Self { stars, spins }
    }

    /// Opening balance handed to the `demo` user and to accounts the
    /// backend has never seen.
    pub fn demo() -> Self {
        Self::new(DEMO_STARS, DEMO_SPINS)
    }

    pub fn available(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Stars => self.stars,
            Currency::Spins => self.spins,
        }
    }

    pub fn with_amount(mut self, currency: Currency, amount: u64) -> Self {
        match currency {
            Currency::Stars => self.stars = amount,
            Currency::Spins => self.spins = amount,
        }
        self
    }

    /// Applies a signed delta to one counter, clamping at zero.
    pub fn adjusted(self, currency: Currency, delta: i64) -> Self {
        let current = self.available(currency);
        let next = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        self.with_amount(currency, next)
    }

    pub fn total_in_stars(&self, rate: ExchangeRate) -> u64 {
        self.stars
            .saturating_add(rate.convert(self.spins, Currency::Spins, Currency::Stars))
    }

    /// Trades stars for a pack of spins. Nothing moves when the stars fall
    /// short.
    pub fn buy_spins(self, pack: SpinPack) -> Result<Self, WagerError> {
        if self.stars < pack.price_stars {
            return Err(WagerError::InsufficientBalance {
                currency: Currency::Stars,
                required: pack.price_stars,
                available: self.stars,
            });
        }
        Ok(Self::new(self.stars - pack.price_stars, self.spins.saturating_add(pack.spins)))
    }
}

/// Spins sold in bulk for stars. Bigger packs are cheaper per spin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpinPack {
    pub spins: u64,
    pub price_stars: u64,
}

impl SpinPack {
    pub fn all() -> Vec<Self> {
        SPIN_PACKS
            .iter()
            .map(|&(spins, price_stars)| Self { spins, price_stars })
            .collect()
    }

    pub fn find(spins: u64) -> Result<Self, WagerError> {
        Self::all()
            .into_iter()
            .find(|pack| pack.spins == spins)
            .ok_or(WagerError::UnknownSpinPack(spins))
    }

    /// Saving against buying the same spins one at a time.
    pub fn discount_percent(&self) -> u64 {
        let list_price = ExchangeRate::STANDARD.convert(self.spins, Currency::Spins, Currency::Stars);
        if list_price == 0 {
            return 0;
        }
        list_price.saturating_sub(self.price_stars) * 100 / list_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_converts_up_to_whole_spins() {
        let rate = ExchangeRate::STANDARD;
        assert_eq!(rate.convert(50, Currency::Stars, Currency::Spins), 1);
        assert_eq!(rate.convert(75, Currency::Stars, Currency::Spins), 2);
        assert_eq!(rate.convert(3, Currency::Spins, Currency::Stars), 150);
        assert_eq!(rate.convert(42, Currency::Stars, Currency::Stars), 42);
    }

    #[test]
    fn test_adjusted_floors_at_zero() {
        let balance = AccountBalance::new(10, 3);
        assert_eq!(balance.adjusted(Currency::Stars, -25).stars, 0);
        assert_eq!(balance.adjusted(Currency::Spins, 4).spins, 7);
        assert_eq!(balance.adjusted(Currency::Spins, 4).stars, 10);
    }

    #[test]
    fn test_spin_packs() {
        let discounts: Vec<u64> = SpinPack::all().iter().map(SpinPack::discount_percent).collect();
        assert_eq!(discounts, vec![0, 10, 20, 28]);
        assert_eq!(SpinPack::find(3), Err(WagerError::UnknownSpinPack(3)));
    }

    #[test]
    fn test_buy_spins() {
        let pack = SpinPack::find(5).unwrap();
        let balance = AccountBalance::new(1000, 10).buy_spins(pack).unwrap();
        assert_eq!(balance, AccountBalance::new(775, 15));

        let big = SpinPack::find(25).unwrap();
        assert_eq!(
            balance.buy_spins(big),
            Err(WagerError::InsufficientBalance { currency: Currency::Stars, required: 900, available: 775 })
        );
    }
}
