pub mod activities;
pub mod health;
pub mod trips;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(trips::router())
        .merge(activities::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
