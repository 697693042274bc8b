//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::PanelSnapshot;

/// API response structure for every panel-changing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub panel: PanelSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, panel: PanelSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            panel,
        }
    }

    /// The request changed the panel
    pub fn ok(message: String, panel: PanelSnapshot) -> Self {
        Self::new("ok", message, panel)
    }

    /// The request referred to a timer that is gone, nothing changed
    pub fn unchanged(message: String, panel: PanelSnapshot) -> Self {
        Self::new("unchanged", message, panel)
    }
}

/// Body of PUT /timers/:id/player-number
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerNumberRequest {
    pub player_number: String,
}

/// Body of POST /timers/:id/input
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInputRequest {
    pub text: String,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub panel: PanelSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
