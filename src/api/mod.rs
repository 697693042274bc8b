//! HTTP API module
//!
//! Panel controls, timer edits, snapshots and the live event stream.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/activate/:control", post(activate_handler))
        .route("/timers/:id", delete(delete_timer_handler))
        .route("/timers/:id/player-number", put(player_number_handler))
        .route("/timers/:id/input", post(player_input_handler))
        .route("/panel", get(panel_handler))
        .route("/events", get(events_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
