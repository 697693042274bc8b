//! Violation timer registry
//!
//! Owns every penalty timer together with the map from timer id to its live
//! countdown source. A timer has at most one live source; cancelling always
//! happens before the map entry goes away, and ticks from a source that is no
//! longer in the map are ignored.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use super::scheduler::{Tick, TickHandle, TickScheduler, TickTarget};
use super::violation::{CardCategory, TimerId, ViolationTimer};

/// Result of applying one countdown tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownTick {
    /// The tick came from a cancelled source or a removed timer
    Stale,
    /// The timer counted down and is still running
    Counted { id: TimerId, remaining: u32 },
    /// The timer ran out and has been removed
    Expired(ViolationTimer),
}

#[derive(Debug)]
pub struct ViolationRegistry<H> {
    timers: BTreeMap<TimerId, ViolationTimer>,
    countdowns: HashMap<TimerId, H>,
    next_id: u64,
}

impl<H> Default for ViolationRegistry<H> {
    fn default() -> Self {
        Self {
            timers: BTreeMap::new(),
            countdowns: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<H: TickHandle> ViolationRegistry<H> {
    /// Create a new inactive timer and return its id
    pub fn add_timer(&mut self, category: CardCategory, duration: u32, label: &str) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers
            .insert(id, ViolationTimer::new(id, category, duration, label));
        info!("Added {} timer {} ({}s)", category, id, duration);
        id
    }

    /// Begin counting down a timer. Does nothing if it is already active or
    /// has no time left.
    pub fn start_countdown<S>(&mut self, id: TimerId, scheduler: &mut S) -> bool
    where
        S: TickScheduler<Handle = H>,
    {
        let Some(timer) = self.timers.get_mut(&id) else {
            return false;
        };
        if timer.active || timer.is_expired() {
            return false;
        }

        timer.active = true;
        let handle = scheduler.schedule(TickTarget::Violation(id));
        if let Some(previous) = self.countdowns.insert(id, handle) {
            previous.cancel();
        }
        debug!("Countdown started for timer {}", id);
        true
    }

    /// Suspend every live countdown, keeping the timers
    pub fn pause_all(&mut self) -> usize {
        let paused = self.countdowns.len();
        for (id, handle) in self.countdowns.drain() {
            handle.cancel();
            if let Some(timer) = self.timers.get_mut(&id) {
                timer.active = false;
            }
        }
        debug!("Paused {} countdowns", paused);
        paused
    }

    /// Restart every inactive timer that still has time left
    pub fn resume_all<S>(&mut self, scheduler: &mut S) -> usize
    where
        S: TickScheduler<Handle = H>,
    {
        let pending: Vec<TimerId> = self
            .timers
            .values()
            .filter(|timer| !timer.active && !timer.is_expired())
            .map(|timer| timer.id)
            .collect();

        pending
            .into_iter()
            .filter(|id| self.start_countdown(*id, scheduler))
            .count()
    }

    /// Remove a timer on user request. No finished notification is due.
    pub fn delete_timer(&mut self, id: TimerId) -> Option<ViolationTimer> {
        if let Some(handle) = self.countdowns.remove(&id) {
            handle.cancel();
        }
        let removed = self.timers.remove(&id);
        if removed.is_some() {
            info!("Deleted timer {}", id);
        }
        removed
    }

    /// Store the player number for a timer. Unknown ids are ignored.
    pub fn set_player_number(&mut self, id: TimerId, text: &str) -> bool {
        match self.timers.get_mut(&id) {
            Some(timer) => {
                if timer.player_number != text {
                    timer.player_number = text.to_string();
                }
                true
            }
            None => false,
        }
    }

    /// Apply one countdown tick for a timer
    pub fn apply_tick(&mut self, id: TimerId, ticket: u64) -> CountdownTick {
        let live = self
            .countdowns
            .get(&id)
            .is_some_and(|handle| handle.ticket() == ticket);
        if !live {
            debug!("Dropping stale tick for timer {} (ticket {})", id, ticket);
            return CountdownTick::Stale;
        }
        let Some(timer) = self.timers.get_mut(&id) else {
            return CountdownTick::Stale;
        };

        if !timer.count_down() {
            return CountdownTick::Counted {
                id,
                remaining: timer.remaining,
            };
        }

        if let Some(handle) = self.countdowns.remove(&id) {
            handle.cancel();
        }
        match self.timers.remove(&id) {
            Some(mut expired) => {
                expired.active = false;
                info!("Timer {} ({}) expired", id, expired.label);
                CountdownTick::Expired(expired)
            }
            None => CountdownTick::Stale,
        }
    }

    pub fn get(&self, id: TimerId) -> Option<&ViolationTimer> {
        self.timers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Timers in display order: least remaining time first, then oldest first
    pub fn ordered(&self) -> Vec<&ViolationTimer> {
        let mut timers: Vec<&ViolationTimer> = self.timers.values().collect();
        timers.sort_by_key(|timer| (timer.remaining, timer.id));
        timers
    }

    /// Ticks every live countdown source would deliver this second
    pub fn live_ticks(&self) -> Vec<Tick> {
        let mut ticks: Vec<Tick> = self
            .countdowns
            .iter()
            .map(|(id, handle)| Tick::new(TickTarget::Violation(*id), handle.ticket()))
            .collect();
        ticks.sort_by_key(|tick| tick.ticket);
        ticks
    }

    pub fn has_countdown(&self, id: TimerId) -> bool {
        self.countdowns.contains_key(&id)
    }
}
