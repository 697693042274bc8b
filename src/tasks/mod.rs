//! Background tasks module
//!
//! Tick sources, the dispatch loop that applies their ticks, and the
//! notification banner.

pub mod banner;
pub mod tick_dispatch;
pub mod ticker;

// Re-export main items
pub use banner::banner_task;
pub use tick_dispatch::tick_dispatch_task;
pub use ticker::{TaskScheduler, TaskTicker};
