//! Match clock and wall clock

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::scheduler::{Tick, TickHandle, TickScheduler, TickTarget};
use crate::utils::format_hh_mm_ss;

/// Lifecycle of the match clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// Not started yet
    #[default]
    Stopped,
    Running,
    Paused,
}

/// In-game elapsed time in whole seconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchClock {
    elapsed: u64,
    phase: ClockPhase,
}

impl MatchClock {
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    /// Add a signed number of seconds, floored at zero
    pub fn adjust(&mut self, delta_secs: i64) -> u64 {
        self.elapsed = if delta_secs >= 0 {
            self.elapsed.saturating_add(delta_secs.unsigned_abs())
        } else {
            self.elapsed.saturating_sub(delta_secs.unsigned_abs())
        };
        self.elapsed
    }

    pub fn display(&self) -> String {
        format_hh_mm_ss(self.elapsed)
    }
}

/// Real elapsed session time. Starts once and never pauses or resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallClock {
    started_at: Option<DateTime<Utc>>,
}

impl WallClock {
    /// Record the start instant. Returns false if already started.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Option<u64> {
        self.started_at
            .map(|start| u64::try_from((now - start).num_seconds()).unwrap_or(0))
    }

    pub fn display(&self, now: DateTime<Utc>) -> Option<String> {
        self.elapsed_secs(now).map(format_hh_mm_ss)
    }
}

/// Owns both clocks and the tick sources that advance them
#[derive(Debug)]
pub struct ClockEngine<H> {
    match_clock: MatchClock,
    wall_clock: WallClock,
    match_ticker: Option<H>,
    wall_ticker: Option<H>,
}

impl<H> Default for ClockEngine<H> {
    fn default() -> Self {
        Self {
            match_clock: MatchClock::default(),
            wall_clock: WallClock::default(),
            match_ticker: None,
            wall_ticker: None,
        }
    }
}

impl<H: TickHandle> ClockEngine<H> {
    pub fn match_clock(&self) -> &MatchClock {
        &self.match_clock
    }

    pub fn wall_clock(&self) -> &WallClock {
        &self.wall_clock
    }

    pub fn is_running(&self) -> bool {
        self.match_clock.is_running()
    }

    /// Start the wall clock and the match clock together.
    ///
    /// Only the first call has any effect; returns whether this call started
    /// the clocks.
    pub fn start<S>(&mut self, now: DateTime<Utc>, scheduler: &mut S) -> bool
    where
        S: TickScheduler<Handle = H>,
    {
        if !self.wall_clock.start(now) {
            debug!("Clock already started, ignoring start");
            return false;
        }

        self.wall_ticker = Some(scheduler.schedule(TickTarget::WallClock));
        if self.match_clock.phase == ClockPhase::Stopped {
            self.match_clock.phase = ClockPhase::Running;
            self.match_ticker = Some(scheduler.schedule(TickTarget::MatchClock));
        }

        info!("Match clock and real time started at {}", now);
        true
    }

    pub fn adjust(&mut self, delta_secs: i64) -> u64 {
        let elapsed = self.match_clock.adjust(delta_secs);
        debug!("Match clock adjusted by {}s to {}s", delta_secs, elapsed);
        elapsed
    }

    /// Stop the match tick. The wall clock keeps running.
    ///
    /// Returns false if the match clock was not running.
    pub fn pause(&mut self) -> bool {
        if !self.match_clock.is_running() {
            return false;
        }

        self.match_clock.phase = ClockPhase::Paused;
        if let Some(ticker) = self.match_ticker.take() {
            ticker.cancel();
        }
        info!("Match clock paused at {}", self.match_clock.display());
        true
    }

    /// Restart the match tick. No-op unless currently paused.
    pub fn resume<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: TickScheduler<Handle = H>,
    {
        if self.match_clock.phase != ClockPhase::Paused {
            return false;
        }

        self.match_clock.phase = ClockPhase::Running;
        self.match_ticker = Some(scheduler.schedule(TickTarget::MatchClock));
        info!("Match clock resumed at {}", self.match_clock.display());
        true
    }

    /// Apply a clock tick. Returns true if the tick came from a live source.
    pub fn apply_tick(&mut self, tick: Tick) -> bool {
        match tick.target {
            TickTarget::MatchClock => {
                if !is_live(&self.match_ticker, tick.ticket) || !self.match_clock.is_running() {
                    return false;
                }
                self.match_clock.elapsed += 1;
                true
            }
            TickTarget::WallClock => is_live(&self.wall_ticker, tick.ticket),
            TickTarget::Violation(_) => false,
        }
    }

    /// Ticks every live clock source would deliver this second
    pub fn live_ticks(&self) -> Vec<Tick> {
        let mut ticks = Vec::with_capacity(2);
        if let Some(ticker) = &self.match_ticker {
            ticks.push(Tick::new(TickTarget::MatchClock, ticker.ticket()));
        }
        if let Some(ticker) = &self.wall_ticker {
            ticks.push(Tick::new(TickTarget::WallClock, ticker.ticket()));
        }
        ticks
    }
}

fn is_live<H: TickHandle>(handle: &Option<H>, ticket: u64) -> bool {
    handle.as_ref().is_some_and(|h| h.ticket() == ticket)
}
