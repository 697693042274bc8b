//! Match Panel - A match control panel server
//!
//! This library tracks a match clock, a real time clock, two team scores and
//! any number of penalty card countdowns that run only while the match clock
//! runs, and serves the panel over HTTP.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::PanelError;
pub use state::{AppState, MatchPanel, PanelSettings};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
