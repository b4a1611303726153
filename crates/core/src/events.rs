//! Render effects and the player-facing event log
//!
//! Every transition of the session pushes [`RoomEvent`]s; front ends drain them to drive
//! transient effects (flashes, sounds). The [`EventLog`] keeps the human-readable side,
//! newest line first.

use std::collections::VecDeque;

use crate::types::{Lock, Outcome, ShapeKind};

/// Why the lock moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    Correct,
    Penalty,
    Safe,
}

impl LockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockReason::Correct => "correct",
            LockReason::Penalty => "penalty",
            LockReason::Safe => "safe",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    RoundStarted { round: u32 },
    CountdownChanged(u8),
    TargetRevealed(ShapeKind),
    TargetChanged(ShapeKind),
    Hit {
        index: usize,
        kind: ShapeKind,
        split_ms: u64,
    },
    /// Clicked a shape that is not the target
    Miss {
        index: usize,
        kind: ShapeKind,
        lives: u8,
    },
    /// Clicked a shape on the locked line
    LockPenalty {
        index: usize,
        kind: ShapeKind,
        lives: u8,
    },
    LockMoved {
        current: Lock,
        next: Lock,
        reason: LockReason,
    },
    HintRevealed { next: Lock, respawned: ShapeKind },
    /// Clicked an empty cell
    Advisory { index: usize, on_next_lock: bool },
    SafeUsed { index: usize, kind: ShapeKind },
    BoardRefilled { cells: usize },
    RoundEnded(Outcome),
}

/// Bounded log, most recent line first
#[derive(Debug, Clone)]
pub struct EventLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.lines.push_front(line.into());
        self.lines.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }
}
