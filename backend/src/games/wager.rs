use shared::api::ServerSpinResponse;
use shared::inventory::catalog_item;
use shared::outcome_resolver::{OutcomeResolver, RandomSource, SpinOutcome};
use shared::{BetSelection, BetValidator, GameKind, PayoutCalculator, Settlement, WagerError};

use crate::store::Account;

/// Draws and settles one spin on the server. The caller holds the account's
/// write lock for the whole call.
pub fn settle_spin(
    account: &mut Account,
    game: GameKind,
    selection: BetSelection,
    payout: PayoutCalculator,
    rng: &mut dyn RandomSource,
) -> Result<ServerSpinResponse, WagerError> {
    let resolver = OutcomeResolver::new(game.table());
    let tier = resolver.table().lookup(selection.tier)?;
    BetValidator::for_game(game).validate(tier, selection.bet_amount, &account.balance())?;

    let outcome = resolver.resolve(tier, selection.bet_amount, rng);
    let settlement = apply_outcome(account, game, selection.bet_amount, &outcome, payout);

    Ok(ServerSpinResponse {
        success: true,
        outcome,
        settlement,
        balance: account.balance(),
    })
}

/// Books a resolved spin: balance, bonus item and stats.
pub fn apply_outcome(
    account: &mut Account,
    game: GameKind,
    bet_amount: u64,
    outcome: &SpinOutcome,
    payout: PayoutCalculator,
) -> Settlement {
    let currency = game.currency();
    let balance = account.balance();
    let settlement = payout.settle(outcome, bet_amount, balance.available(currency));
    account.inventory.currency = balance.with_amount(currency, settlement.balance);

    if let Some(item) = outcome.bonus_item.as_ref().and_then(|bonus| catalog_item(bonus.id)) {
        account.inventory.add_nft(item);
    }

    account
        .stats_mut(game)
        .record(bet_amount, outcome.won, settlement.net_payout, outcome.bonus_item.is_some());

    settlement
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::outcome_resolver::{RngSource, ScriptedSource};
    use shared::{AccountBalance, TierId, WheelColor};

    #[test]
    fn test_spin_never_goes_negative() {
        let mut account = Account::new();
        let mut rng = RngSource::seeded(7);
        let payout = PayoutCalculator::new(100);
        let selection = BetSelection::new(TierId::Color(WheelColor::Red), 25);
        loop {
            let before = account.balance().stars;
            match settle_spin(&mut account, GameKind::Lucky2, selection, payout, &mut rng) {
                Ok(response) => {
                    let expected = before as i64 + response.settlement.delta;
                    assert!(expected >= 0);
                    assert_eq!(response.balance.stars as i64, expected);
                }
                Err(err) => {
                    assert!(matches!(
                        err,
                        WagerError::InsufficientBalance { .. } | WagerError::BelowMinimumBet { .. }
                    ));
                    assert_eq!(account.balance().stars, before);
                    break;
                }
            }
            if account.lucky2.total_games > 10_000 {
                break;
            }
        }
        assert_eq!(account.balance().spins, 10);
    }

    #[test]
    fn test_bonus_item_lands_in_inventory() {
        let mut account = Account::new();
        let outcome = OutcomeResolver::new(GameKind::Mono.table())
            .with_bonus_rate(1.0)
            .resolve(
                GameKind::Mono.table().lookup(TierId::Chance(65)).unwrap(),
                2,
                &mut ScriptedSource::new(vec![0.1, 0.0, 0.0, 0.0]),
            );
        apply_outcome(&mut account, GameKind::Mono, 2, &outcome, PayoutCalculator::default());
        assert_eq!(account.inventory.nfts.len(), 1);
        assert_eq!(account.mono.bonus_items, 1);
        // 2 spins at 1.54x pays 3.
        assert_eq!(account.balance(), AccountBalance::new(1000, 11));
    }
}
