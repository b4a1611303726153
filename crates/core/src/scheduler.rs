//! Timers and clocks
//!
//! The session never reads wall time itself. Callers pass `now_ms` into every transition and
//! the session keeps its pending countdown/reveal timers in a [`Scheduler`]. A restart drops
//! every pending timer, so nothing scheduled for a superseded round can fire into the next.

use std::cell::Cell;
use std::time::Instant;

use arrayvec::ArrayVec;

/// Upper bound of simultaneously pending timers
pub const MAX_PENDING: usize = 8;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    CountdownTick,
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    kind: TimerKind,
    due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: ArrayVec<Scheduled, MAX_PENDING>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once `now_ms >= due_ms`
    ///
    /// When the queue is full the timer due last is dropped to make room.
    pub fn schedule(&mut self, kind: TimerKind, due_ms: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.pending.is_full() {
            if let Some(latest) = self
                .pending
                .iter()
                .enumerate()
                .max_by_key(|(_, s)| (s.due_ms, s.seq))
                .map(|(i, _)| i)
            {
                let dropped = self.pending.remove(latest);
                tracing::warn!(kind = ?dropped.kind, "timer queue full; dropping latest timer");
            }
        }

        self.pending.push(Scheduled { seq, kind, due_ms });
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time among pending timers
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|s| s.due_ms).min()
    }

    /// Remove and return the earliest timer that is due at `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimerKind> {
        let i = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= now_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(i).kind)
    }
}

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) -> u64 {
        let now = self.now.get() + ms;
        self.now.set(now);
        now
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Milliseconds since construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
