use crate::chance_table::ChanceTier;
use crate::currency::{AccountBalance, Currency, ExchangeRate};
use crate::error::WagerError;
use crate::game::GameKind;

/// Bounds checks for a bet before anything is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetValidator {
    pub currency: Currency,
    pub maximum_bet: u64,
    pub exchange: ExchangeRate,
}

impl BetValidator {
    pub fn new(currency: Currency, maximum_bet: u64, exchange: ExchangeRate) -> Self {
        Self { currency, maximum_bet, exchange }
    }

    pub fn for_game(game: GameKind) -> Self {
        Self::new(game.currency(), game.maximum_bet(), ExchangeRate::STANDARD)
    }

    /// Tier minimum expressed in the bet's currency, never below one unit.
    pub fn minimum_bet(&self, tier: &ChanceTier) -> u64 {
        self.exchange
            .convert(tier.minimum_bet_stars, Currency::Stars, self.currency)
            .max(1)
    }

    /// Checks balance, then the tier minimum, then the game ceiling.
    pub fn validate(
        &self,
        tier: &ChanceTier,
        bet_amount: u64,
        balance: &AccountBalance,
    ) -> Result<(), WagerError> {
        let available = balance.available(self.currency);
        if bet_amount > available {
            return Err(WagerError::InsufficientBalance {
                currency: self.currency,
                required: bet_amount,
                available,
            });
        }

        let minimum = self.minimum_bet(tier);
        if bet_amount < minimum {
            return Err(WagerError::BelowMinimumBet { currency: self.currency, minimum });
        }

        if bet_amount > self.maximum_bet {
            return Err(WagerError::AboveMaximumBet {
                currency: self.currency,
                maximum: self.maximum_bet,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance_table::{ChanceTable, TierId, WheelColor};

    fn mono_tier(chance: u8) -> ChanceTier {
        ChanceTable::mono().lookup(TierId::Chance(chance)).unwrap().clone()
    }

    #[test]
    fn test_minimum_is_converted_to_spins() {
        let validator = BetValidator::for_game(GameKind::Mono);
        assert_eq!(mono_tier(1).minimum_bet_stars, 4);
        assert_eq!(mono_tier(65).minimum_bet_stars, 260);
        assert_eq!(validator.minimum_bet(&mono_tier(1)), 1);
        assert_eq!(validator.minimum_bet(&mono_tier(15)), 2);
        assert_eq!(validator.minimum_bet(&mono_tier(50)), 4);
        // 260 stars is 5.2 spins, so 6.
        assert_eq!(validator.minimum_bet(&mono_tier(65)), 6);
    }

    #[test]
    fn test_five_spins_do_not_clear_top_tier() {
        let validator = BetValidator::for_game(GameKind::Mono);
        let balance = AccountBalance::new(0, 100);
        assert_eq!(
            validator.validate(&mono_tier(65), 5, &balance),
            Err(WagerError::BelowMinimumBet { currency: Currency::Spins, minimum: 6 })
        );
        assert!(validator.validate(&mono_tier(65), 6, &balance).is_ok());
    }

    #[test]
    fn test_insufficient_balance_checked_first() {
        let validator = BetValidator::for_game(GameKind::Mono);
        let balance = AccountBalance::new(0, 3);
        // Also below the 6 spin minimum, but balance wins.
        assert_eq!(
            validator.validate(&mono_tier(65), 5, &balance),
            Err(WagerError::InsufficientBalance { currency: Currency::Spins, required: 5, available: 3 })
        );
    }

    #[test]
    fn test_below_minimum_and_zero_bet() {
        let validator = BetValidator::for_game(GameKind::Mono);
        let balance = AccountBalance::new(0, 50);
        let expected = Err(WagerError::BelowMinimumBet { currency: Currency::Spins, minimum: 6 });
        assert_eq!(validator.validate(&mono_tier(65), 5, &balance), expected);
        assert_eq!(validator.validate(&mono_tier(65), 0, &balance), expected);
    }

    #[test]
    fn test_above_maximum() {
        let validator = BetValidator::for_game(GameKind::Lucky2);
        let table = ChanceTable::lucky2();
        let red = table.lookup(TierId::Color(WheelColor::Red)).unwrap();
        let balance = AccountBalance::new(5000, 0);
        assert!(validator.validate(red, 1000, &balance).is_ok());
        assert_eq!(
            validator.validate(red, 1001, &balance),
            Err(WagerError::AboveMaximumBet { currency: Currency::Stars, maximum: 1000 })
        );
        assert!(matches!(
            validator.validate(red, 24, &balance),
            Err(WagerError::BelowMinimumBet { minimum: 25, .. })
        ));
    }

    #[test]
    fn test_validate_is_repeatable() {
        let validator = BetValidator::for_game(GameKind::Lucky2);
        let table = ChanceTable::lucky2();
        let blue = table.lookup(TierId::Color(WheelColor::Blue)).unwrap();
        let balance = AccountBalance::new(100, 0);
        let first = validator.validate(blue, 250, &balance);
        for _ in 0..10 {
            assert_eq!(validator.validate(blue, 250, &balance), first);
        }
        assert_eq!(balance, AccountBalance::new(100, 0));
    }
}
