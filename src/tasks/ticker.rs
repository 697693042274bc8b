//! Tokio-backed tick sources

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::state::{Tick, TickHandle, TickScheduler, TickTarget};

/// Spawns one tokio task per tick source. Ticks are sent to the dispatch task
/// rather than applied in place, so every mutation happens under one lock.
#[derive(Debug)]
pub struct TaskScheduler {
    tx: mpsc::UnboundedSender<Tick>,
    period: Duration,
    next_ticket: u64,
}

impl TaskScheduler {
    pub fn new(tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            tx,
            period,
            next_ticket: 0,
        }
    }
}

impl TickScheduler for TaskScheduler {
    type Handle = TaskTicker;

    fn schedule(&mut self, target: TickTarget) -> TaskTicker {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let task = tokio::spawn(tick_source(target, ticket, self.period, self.tx.clone()));
        debug!("Scheduled {:?} with ticket {}", target, ticket);
        TaskTicker { ticket, task }
    }
}

/// A running tick task. Dropping it aborts the task.
#[derive(Debug)]
pub struct TaskTicker {
    ticket: u64,
    task: JoinHandle<()>,
}

impl TickHandle for TaskTicker {
    fn ticket(&self) -> u64 {
        self.ticket
    }
}

impl Drop for TaskTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn tick_source(
    target: TickTarget,
    ticket: u64,
    period: Duration,
    tx: mpsc::UnboundedSender<Tick>,
) {
    // First tick one full period after scheduling
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if tx.send(Tick::new(target, ticket)).is_err() {
            debug!("Tick receiver closed, stopping {:?} source", target);
            break;
        }
    }
}
