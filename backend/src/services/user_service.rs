use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use shared::api::{BalanceResponse, StatsResponse};
use shared::constants::{BALANCE_ENDPOINT, STATS_ENDPOINT};
use tracing::debug;
use validator::Validate;

use crate::error::ApiError;
use crate::services::UserQuery;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(BALANCE_ENDPOINT, get(get_balance))
        .route(STATS_ENDPOINT, get(get_stats))
}

pub async fn get_balance(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<BalanceResponse>, ApiError> {
    query.validate()?;
    let balance = state.store.snapshot(&query.user_id).await.balance();
    debug!("Balance for {}: {} stars, {} spins", query.user_id, balance.stars, balance.spins);
    Ok(Json(BalanceResponse { success: true, balance }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    query.validate()?;
    let account = state.store.snapshot(&query.user_id).await;
    Ok(Json(StatsResponse {
        success: true,
        mono: account.mono,
        lucky2: account.lucky2,
    }))
}
