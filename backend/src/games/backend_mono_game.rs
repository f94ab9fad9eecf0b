use axum::{
    routing::post,
    Router,
    Json,
    extract::State,
    debug_handler,
};
use shared::api::{MonoSpinRequest, ServerSpinResponse};
use shared::constants::MONO_SPIN_ENDPOINT;
use shared::outcome_resolver::RngSource;
use shared::{BetSelection, GameKind, PayoutCalculator};
use validator::Validate;

use crate::error::ApiError;
use crate::games::wager::settle_spin;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route(MONO_SPIN_ENDPOINT, post(spin_mono))
}

/// Server-drawn Mono spin. Bets are in spins; a chance between two tiers
/// plays the nearest one.
#[debug_handler]
async fn spin_mono(
    State(state): State<AppState>,
    Json(request): Json<MonoSpinRequest>,
) -> Result<Json<ServerSpinResponse>, ApiError> {
    request.validate()?;

    let table = GameKind::Mono.table();
    let tier = table.nearest(request.chance)?;
    let chance = tier.win_probability_percent;
    let selection = BetSelection::new(tier.id, request.bet_amount);
    let payout = PayoutCalculator::new(state.config.house_edge_bps);
    let response = state
        .store
        .update(&request.user_id, |account| {
            settle_spin(account, GameKind::Mono, selection, payout, &mut RngSource::os())
        })
        .await?;

    if response.outcome.won {
        tracing::info!(
            "🎯 MONO SPIN: User {} hit {} at {}% and won {} spins! 💰",
            request.user_id,
            response.outcome.drawn_number,
            chance,
            response.settlement.net_payout
        );
    } else {
        tracing::info!(
            "🎯 MONO SPIN: User {} drew {} at {}% and lost {} spins",
            request.user_id,
            response.outcome.drawn_number,
            chance,
            request.bet_amount
        );
    }
    if let Some(bonus) = &response.outcome.bonus_item {
        tracing::info!("🎁 BONUS: User {} received {} ({})", request.user_id, bonus.name, bonus.rarity);
    }

    Ok(Json(response))
}
