use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use shared::api::{
    InventoryResponse, SellItemRequest, SellItemResponse, UseBoosterRequest, UseBoosterResponse,
};
use shared::constants::{BOOSTER_USE_ENDPOINT, INVENTORY_ENDPOINT, INVENTORY_SELL_ENDPOINT};
use tracing::info;
use validator::Validate;

use crate::error::ApiError;
use crate::services::UserQuery;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(INVENTORY_ENDPOINT, get(get_inventory))
        .route(INVENTORY_SELL_ENDPOINT, post(sell_item))
        .route(BOOSTER_USE_ENDPOINT, post(use_booster))
}

pub async fn get_inventory(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<InventoryResponse>, ApiError> {
    query.validate()?;
    let account = state.store.snapshot(&query.user_id).await;
    Ok(Json(InventoryResponse::from_inventory(account.inventory)))
}

/// Sells one NFT for 70% of its value. Legendary and worthless items are
/// refused.
pub async fn sell_item(
    State(state): State<AppState>,
    Json(request): Json<SellItemRequest>,
) -> Result<Json<SellItemResponse>, ApiError> {
    request.validate()?;
    if request.item_type != "nft" {
        return Err(ApiError::Validation(format!("cannot sell {} items", request.item_type)));
    }

    let (credited, balance) = state
        .store
        .update(&request.user_id, |account| {
            account
                .inventory
                .sell_nft(request.item_id)
                .map(|credited| (credited, account.balance()))
        })
        .await?;

    info!("💸 SALE: User {} sold item #{} for {} stars", request.user_id, request.item_id, credited);
    Ok(Json(SellItemResponse { success: true, credited, balance }))
}

pub async fn use_booster(
    State(state): State<AppState>,
    Json(request): Json<UseBoosterRequest>,
) -> Result<Json<UseBoosterResponse>, ApiError> {
    request.validate()?;
    let effect = state
        .store
        .update(&request.user_id, |account| account.inventory.activate_booster(request.booster_id))
        .await?;

    info!("⚡ BOOSTER: User {} activated #{}: {}", request.user_id, request.booster_id, effect.description);
    Ok(Json(UseBoosterResponse { success: true, effect }))
}
