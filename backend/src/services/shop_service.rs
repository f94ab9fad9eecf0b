use axum::{extract::State, routing::post, Json, Router};
use shared::api::{BuySpinsRequest, BuySpinsResponse};
use shared::constants::SPINS_BUY_ENDPOINT;
use shared::SpinPack;
use tracing::info;
use validator::Validate;

use crate::error::ApiError;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new().route(SPINS_BUY_ENDPOINT, post(buy_spins))
}

/// Sells a pack of spins for stars. The balance is checked and debited
/// under the account lock.
pub async fn buy_spins(
    State(state): State<AppState>,
    Json(request): Json<BuySpinsRequest>,
) -> Result<Json<BuySpinsResponse>, ApiError> {
    request.validate()?;
    let pack = SpinPack::find(request.spins)?;

    let balance = state
        .store
        .update(&request.user_id, |account| {
            let balance = account.balance().buy_spins(pack)?;
            account.inventory.currency = balance;
            Ok::<_, ApiError>(balance)
        })
        .await?;

    info!(
        "🛒 PURCHASE: User {} bought {} spins for {} stars ({}% off)",
        request.user_id,
        pack.spins,
        pack.price_stars,
        pack.discount_percent()
    );
    Ok(Json(BuySpinsResponse { success: true, pack, balance }))
}
