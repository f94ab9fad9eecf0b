use axum::Router;

use crate::AppState;

pub mod backend_lucky2_game;
pub mod backend_mono_game;
pub mod spin_report;
mod wager;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(backend_mono_game::create_router())
        .merge(backend_lucky2_game::create_router())
        .merge(spin_report::create_router())
}
