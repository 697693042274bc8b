//! Utility functions module
//!
//! Clock formatting and process signal handling shared across the server.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_hh_mm_ss, format_mm_ss};
pub use signals::shutdown_signal;
