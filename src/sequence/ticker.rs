use std::time::{Duration, Instant};

/// The state of a [Ticker] at a given point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TickState {
    /// The ticker isn't running.
    Stopped,
    /// Running, but the next tick isn't due yet.
    Pending,
    /// A tick was delivered.
    Due,
}

/// A restartable periodic tick source.
///
/// The ticker never calls anything by itself: the host polls it and handles one tick per `Due`
/// result, which keeps ticks strictly serial.
#[derive(Debug)]
pub(crate) struct Ticker {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(period: Duration) -> Self {
        Self { period, next_tick: None }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Start ticking, the first tick being due one period after `now`.
    ///
    /// Returns `false` and leaves the schedule untouched if already running.
    pub(crate) fn start(&mut self, now: Instant) -> bool {
        if self.next_tick.is_some() {
            return false;
        }
        self.next_tick = Some(now + self.period);
        true
    }

    /// Stop ticking. Returns `false` if already stopped.
    pub(crate) fn stop(&mut self) -> bool {
        self.next_tick.take().is_some()
    }

    /// The point in time at which the next tick is due, if running.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Deliver at most one tick.
    ///
    /// If several periods went by since the last poll, each of them is delivered by a separate
    /// call.
    pub(crate) fn poll(&mut self, now: Instant) -> TickState {
        match self.next_tick {
            None => TickState::Stopped,
            Some(deadline) if deadline > now => TickState::Pending,
            Some(deadline) => {
                self.next_tick = Some(deadline + self.period);
                TickState::Due
            }
        }
    }
}
