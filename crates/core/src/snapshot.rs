//! Plain-data view of a session for renderers.

use crate::stats::{RoundSummary, SplitStats};
use crate::types::{Lock, Phase, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileSnapshot {
    pub kind: Option<ShapeKind>,
    pub found: bool,
    /// On the current lock line
    pub locked: bool,
    /// On the planned lock line while the hint is shown
    pub hinted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub rows: u8,
    pub cols: u8,
    /// Row-major tiles
    pub tiles: Vec<TileSnapshot>,
    pub phase: Phase,
    pub round: u32,
    pub seed: u32,
    pub countdown: Option<u8>,
    pub target: Option<ShapeKind>,
    pub lives: u8,
    pub max_lives: u8,
    pub hits: u32,
    pub completion_hits: u32,
    pub mistakes: u32,
    pub stats: SplitStats,
    pub current_lock: Option<Lock>,
    /// Only set while the hint is visible
    pub next_lock: Option<Lock>,
    /// Set while the results panel is open
    pub results: Option<RoundSummary>,
    /// Newest first
    pub log: Vec<String>,
}

impl RoomSnapshot {
    pub fn tile(&self, row: u8, col: u8) -> Option<&TileSnapshot> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles.get(row as usize * self.cols as usize + col as usize)
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Revealed
    }
}

impl Default for RoomSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            tiles: Vec::new(),
            phase: Phase::Idle,
            round: 0,
            seed: 0,
            countdown: None,
            target: None,
            lives: 0,
            max_lives: 0,
            hits: 0,
            completion_hits: 0,
            mistakes: 0,
            stats: SplitStats::default(),
            current_lock: None,
            next_lock: None,
            results: None,
            log: Vec::new(),
        }
    }
}
