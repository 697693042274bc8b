//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error, info};

use crate::state::{AppState, Control, PanelSnapshot, TimerId};
use super::responses::{
    ApiResponse, HealthResponse, PlayerInputRequest, PlayerNumberRequest, StatusResponse,
};

/// Handle POST /activate/:control - Apply a panel control
pub async fn activate_handler(
    State(state): State<Arc<AppState>>,
    Path(control): Path<Control>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.activate(control) {
        Ok(panel) => Ok(Json(ApiResponse::ok(
            format!("{} applied", control.name()),
            panel,
        ))),
        Err(e) => {
            error!("Failed to apply {}: {}", control.name(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle DELETE /timers/:id - Remove a penalty timer
pub async fn delete_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.delete_timer(id) {
        Ok((true, panel)) => {
            info!("Timer {} deleted", id);
            Ok(Json(ApiResponse::ok(format!("Timer {} deleted", id), panel)))
        }
        Ok((false, panel)) => {
            debug!("Delete of unknown timer {} ignored", id);
            Ok(Json(ApiResponse::unchanged(format!("Timer {} not found", id), panel)))
        }
        Err(e) => {
            error!("Failed to delete timer {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /timers/:id/player-number - Commit a player number
pub async fn player_number_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
    Json(request): Json<PlayerNumberRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_player_number(id, &request.player_number) {
        Ok((true, panel)) => Ok(Json(ApiResponse::ok(
            format!("Player number for timer {} set", id),
            panel,
        ))),
        Ok((false, panel)) => Ok(Json(ApiResponse::unchanged(
            format!("Timer {} not found", id),
            panel,
        ))),
        Err(e) => {
            error!("Failed to set player number for timer {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timers/:id/input - Record text typed into a player number field
pub async fn player_input_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
    Json(request): Json<PlayerInputRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.edit_player_number(id, &request.text) {
        Ok((true, panel)) => Ok(Json(ApiResponse::ok(
            format!("Input for timer {} recorded", id),
            panel,
        ))),
        Ok((false, panel)) => Ok(Json(ApiResponse::unchanged(
            format!("Timer {} not shown", id),
            panel,
        ))),
        Err(e) => {
            error!("Failed to record input for timer {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /panel - Return the current panel snapshot
pub async fn panel_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PanelSnapshot>, StatusCode> {
    state.get_snapshot().map(Json).map_err(|e| {
        error!("Failed to get panel snapshot: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /events - Stream every panel snapshot as a server-sent event
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();

    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot = rx.borrow_and_update().clone();
        let event = match Event::default().event("panel").json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => {
                error!("Failed to encode panel event: {}", e);
                Event::default().event("error").data("snapshot encoding failed")
            }
        };
        Some((Ok::<_, Infallible>(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return panel state with server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let panel = match state.get_snapshot() {
        Ok(panel) => panel,
        Err(e) => {
            error!("Failed to get panel snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        panel,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
