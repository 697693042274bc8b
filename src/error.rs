//! Error types for the panel server

use std::sync::PoisonError;

use thiserror::Error;

/// Result type alias for shared state operations
pub type Result<T, E = PanelError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PanelError {
    /// A thread panicked while holding one of the state locks
    #[error("Failed to lock {what} state: {reason}")]
    Poisoned { what: &'static str, reason: String },
}

impl PanelError {
    pub fn poisoned<T>(what: &'static str, err: PoisonError<T>) -> Self {
        Self::Poisoned {
            what,
            reason: err.to_string(),
        }
    }
}
