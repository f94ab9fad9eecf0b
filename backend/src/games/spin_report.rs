use axum::{
    routing::post,
    Router,
    Json,
    extract::State,
    debug_handler,
};
use shared::api::{SpinAck, SpinAction, SpinReport};
use shared::constants::SPIN_REPORT_ENDPOINT;
use shared::inventory::catalog_item;
use shared::outcome_resolver::{BonusItem, SpinOutcome};
use shared::{BetValidator, GameKind, Multiplier, PayoutCalculator, WagerError};
use validator::Validate;

use crate::error::ApiError;
use crate::games::wager::apply_outcome;
use crate::store::Account;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route(SPIN_REPORT_ENDPOINT, post(report_spin))
}

fn game_for(action: SpinAction) -> GameKind {
    match action {
        SpinAction::MonoSpin => GameKind::Mono,
        SpinAction::Lucky2Bet => GameKind::Lucky2,
    }
}

/// Books a spin the client resolved itself. The bet is still checked
/// against the server balance, so a report cannot spend money the player
/// does not have.
fn book_report(account: &mut Account, report: &SpinReport, payout: PayoutCalculator) -> Result<(), WagerError> {
    let game = game_for(report.action);
    let table = game.table();
    let tier = table.lookup(report.tier_selector)?;
    BetValidator::for_game(game).validate(tier, report.bet_amount, &account.balance())?;

    let multiplier = if report.won { tier.payout_multiplier } else { Multiplier::ZERO };
    let bonus_item = if report.won {
        report.bonus_item_id.and_then(catalog_item).map(|item| BonusItem::from(&item))
    } else {
        None
    };
    let outcome = SpinOutcome {
        won: report.won,
        drawn_number: report.drawn_number.unwrap_or_default(),
        multiplier_applied: multiplier,
        payout: multiplier.gross(report.bet_amount),
        bonus_item,
        winning_color: report.winning_color,
    };

    apply_outcome(account, game, report.bet_amount, &outcome, payout);
    Ok(())
}

#[debug_handler]
async fn report_spin(
    State(state): State<AppState>,
    Json(report): Json<SpinReport>,
) -> Result<Json<SpinAck>, ApiError> {
    report.validate()?;

    let payout = PayoutCalculator::new(state.config.house_edge_bps);
    let balance = state
        .store
        .update(&report.user_id, |account| {
            book_report(account, &report, payout).map(|_| account.balance())
        })
        .await?;

    tracing::info!(
        "📝 SPIN REPORT: User {} {:?} on {} for {} ({}), balance now {} ⭐ / {} 🎰",
        report.user_id,
        report.action,
        report.tier_selector,
        report.bet_amount,
        if report.won { "won" } else { "lost" },
        balance.stars,
        balance.spins
    );

    Ok(Json(SpinAck { success: true, balance: Some(balance), error: None }))
}
