//! Periodic tick sources driving the match clock and penalty countdowns

use super::violation::TimerId;

/// What a periodic tick source drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickTarget {
    MatchClock,
    WallClock,
    Violation(TimerId),
}

/// One tick delivered by a scheduled source.
///
/// `ticket` identifies the source that produced the tick. Ticks carrying a
/// ticket that no longer matches the live source for their target are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub target: TickTarget,
    pub ticket: u64,
}

impl Tick {
    pub fn new(target: TickTarget, ticket: u64) -> Self {
        Self { target, ticket }
    }
}

/// Handle to a running tick source. Dropping the handle stops the source.
pub trait TickHandle {
    /// Ticket stamped on every tick this source produces
    fn ticket(&self) -> u64;

    /// Stop the source; no tick is produced by it afterwards
    fn cancel(self)
    where
        Self: Sized,
    {
        drop(self)
    }
}

/// Starts periodic tick sources, one tick per period.
pub trait TickScheduler {
    type Handle: TickHandle;

    fn schedule(&mut self, target: TickTarget) -> Self::Handle;
}

#[cfg(test)]
pub(crate) mod manual {
    //! Deterministic scheduler for tests: sources only exist as tickets and
    //! tests deliver ticks by hand.

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    pub struct ManualHandle {
        pub target: TickTarget,
        pub ticket: u64,
    }

    impl TickHandle for ManualHandle {
        fn ticket(&self) -> u64 {
            self.ticket
        }
    }

    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        next_ticket: u64,
        pub scheduled: Vec<TickTarget>,
    }

    impl TickScheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&mut self, target: TickTarget) -> ManualHandle {
            self.next_ticket += 1;
            self.scheduled.push(target);
            ManualHandle {
                target,
                ticket: self.next_ticket,
            }
        }
    }
}
