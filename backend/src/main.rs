use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use shared::constants::HEALTH_ENDPOINT;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::config::Config;
use crate::store::AccountStore;

mod config;
mod error;
mod games;
mod logging;
mod services;
mod store;

#[derive(Clone)]
pub struct AppState {
    pub store: AccountStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: AccountStore::new(),
            config: Arc::new(config),
        }
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// All `/api` routes plus the built frontend as the fallback.
pub fn build_router(state: AppState) -> Router {
    // The Telegram WebApp is served from its own origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-requested-with"),
        ]);

    let api_routes = Router::new()
        .route(HEALTH_ENDPOINT, get(health_check))
        .merge(services::user_service::create_router())
        .merge(services::inventory_service::create_router())
        .merge(services::shop_service::create_router())
        .merge(games::create_router());

    let static_dir = &state.config.static_dir;
    let frontend = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(frontend)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = Config::from_env();
    info!(
        "House edge: {} bps (reports, Mono), {} bps (Lucky2); static files from {}",
        config.house_edge_bps,
        config.lucky2_house_edge_bps,
        config.static_dir.display()
    );

    let addr = config.bind_addr;
    let app = build_router(AppState::new(config));

    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use shared::inventory::{catalog_item, Booster, BoosterKind};
    use shared::AccountBalance;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(Config::default())
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
        send(state, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(state, request).await
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_user_gets_demo_balance() {
        let state = test_state();
        let (status, body) = get_json(&state, "/api/user/balance?user_id=777").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["balance"], json!({"stars": 1000, "spins": 10}));
    }

    #[tokio::test]
    async fn test_invalid_user_id_is_rejected() {
        let state = test_state();
        let (status, body) = get_json(&state, "/api/user/balance?user_id=a%20b").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_report_applies_client_outcome() {
        let state = test_state();
        let report = json!({
            "action": "mono_spin",
            "user_id": "42",
            "tier_selector": 10,
            "bet_amount": 2,
            "won": true,
            "timestamp": 1,
            "drawn_number": 7
        });
        let (status, body) = post_json(&state, "/api/spin/report", report).await;
        assert_eq!(status, StatusCode::OK);
        // 10 - 2 + 2 * 10x
        assert_eq!(body["balance"]["spins"], 28);

        let (_, stats) = get_json(&state, "/api/user/stats?user_id=42").await;
        assert_eq!(stats["mono"]["wins"], 1);
        assert_eq!(stats["mono"]["total_won"], 20);
    }

    #[tokio::test]
    async fn test_report_over_balance_is_rejected() {
        let state = test_state();
        let report = json!({
            "action": "lucky2_bet",
            "user_id": "42",
            "tier_selector": "red",
            "bet_amount": 1000,
            "won": false,
            "timestamp": 1
        });
        let (status, _) = post_json(&state, "/api/spin/report", report.clone()).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = post_json(&state, "/api/spin/report", report).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Not enough stars"));
    }

    #[tokio::test]
    async fn test_mono_spin_snaps_to_nearest_chance() {
        let state = test_state();
        let (status, body) = post_json(
            &state,
            "/api/mono/spin",
            json!({"user_id": "42", "chance": 12, "bet_amount": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let account = state.store.snapshot("42").await;
        assert_eq!(account.mono.total_games, 1);
        assert_eq!(account.mono.total_wagered, 2);
    }

    #[tokio::test]
    async fn test_server_spin_limits() {
        let state = test_state();
        let (status, body) = post_json(
            &state,
            "/api/mono/spin",
            json!({"user_id": "42", "chance": 65, "bet_amount": 5}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Minimum bet is 6 spins");

        let (status, body) = post_json(
            &state,
            "/api/lucky2/bet",
            json!({"user_id": "42", "color": "blue", "amount": 10}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Minimum bet is 25 stars");
    }

    #[tokio::test]
    async fn test_server_spins_never_go_negative() {
        let state = test_state();
        for _ in 0..200 {
            let (status, body) = post_json(
                &state,
                "/api/lucky2/bet",
                json!({"user_id": "42", "color": "red", "amount": 250}),
            )
            .await;
            if status != StatusCode::OK {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                break;
            }
            assert!(body["balance"]["stars"].as_i64().unwrap() >= 0);
        }
        let account = state.store.snapshot("42").await;
        assert!(account.lucky2.total_games > 0);
        assert_eq!(account.balance().spins, 10);
    }

    #[tokio::test]
    async fn test_sell_item() {
        let state = test_state();
        state
            .store
            .update("42", |account| {
                account.inventory.add_nft(catalog_item(5).unwrap());
                account.inventory.add_nft(catalog_item(10).unwrap());
            })
            .await;

        let (status, body) =
            post_json(&state, "/api/inventory/sell", json!({"user_id": "42", "item_id": 10})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) =
            post_json(&state, "/api/inventory/sell", json!({"user_id": "42", "item_id": 5})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["credited"], 105);
        assert_eq!(body["balance"]["stars"], 1105);

        let (status, _) =
            post_json(&state, "/api/inventory/sell", json!({"user_id": "42", "item_id": 5})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, inventory) = get_json(&state, "/api/inventory?user_id=42").await;
        assert_eq!(inventory["total_items"], 1);
        assert_eq!(inventory["total_value"], 5000 + 1105);
    }

    #[tokio::test]
    async fn test_buy_spins() {
        let state = test_state();
        let (status, body) = post_json(&state, "/api/spins/buy", json!({"user_id": "42", "spins": 5})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pack"]["price_stars"], 225);
        assert_eq!(body["balance"], json!({"stars": 775, "spins": 15}));

        let (status, body) = post_json(&state, "/api/spins/buy", json!({"user_id": "42", "spins": 25})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Not enough stars: need 900, have 775");
        assert_eq!(state.store.snapshot("42").await.balance(), AccountBalance::new(775, 15));

        let (status, _) = post_json(&state, "/api/spins/buy", json!({"user_id": "42", "spins": 3})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_booster_activation() {
        let state = test_state();
        state
            .store
            .update("42", |account| {
                account.inventory.boosters.push(Booster::new(3, BoosterKind::WinBoost, 15, None));
            })
            .await;

        let request = json!({"user_id": "42", "booster_id": 3});
        let (status, body) = post_json(&state, "/api/booster/use", request.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effect"]["description"], "Win +15%");
        assert_eq!(body["effect"]["duration_secs"], 1800);

        let (status, _) = post_json(&state, "/api/booster/use", request).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) =
            post_json(&state, "/api/booster/use", json!({"user_id": "42", "booster_id": 99})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
