use axum::{
    routing::post,
    Router,
    Json,
    extract::State,
    debug_handler,
};
use shared::api::{Lucky2BetRequest, ServerSpinResponse};
use shared::constants::LUCKY2_BET_ENDPOINT;
use shared::outcome_resolver::RngSource;
use shared::{BetSelection, GameKind, PayoutCalculator, TierId, WheelColor};
use validator::Validate;

use crate::error::ApiError;
use crate::games::wager::settle_spin;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route(LUCKY2_BET_ENDPOINT, post(bet_lucky2))
}

/// Server-drawn Lucky2 bet in stars. Wins pay out less the configured
/// commission.
#[debug_handler]
async fn bet_lucky2(
    State(state): State<AppState>,
    Json(request): Json<Lucky2BetRequest>,
) -> Result<Json<ServerSpinResponse>, ApiError> {
    request.validate()?;
    let color: WheelColor = request.color.parse()?;

    let selection = BetSelection::new(TierId::Color(color), request.amount);
    let payout = PayoutCalculator::new(state.config.lucky2_house_edge_bps);
    let response = state
        .store
        .update(&request.user_id, |account| {
            settle_spin(account, GameKind::Lucky2, selection, payout, &mut RngSource::os())
        })
        .await?;

    let landed = response
        .outcome
        .winning_color
        .map(|c| format!("{} {}", c.emoji(), c))
        .unwrap_or_default();
    if response.outcome.won {
        tracing::info!(
            "🎡 LUCKY2: User {} bet {} on {} and won {} stars! 💰",
            request.user_id,
            request.amount,
            landed,
            response.settlement.net_payout
        );
    } else {
        tracing::info!(
            "🎡 LUCKY2: User {} bet {} on {}, wheel landed on {}",
            request.user_id,
            request.amount,
            color,
            landed
        );
    }

    Ok(Json(response))
}
