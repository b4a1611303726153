//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic attached, so they can be shared by the core
//! state machine, the input layer, and the terminal renderer.
//!
//! # Grid
//!
//! The playfield is a `rows × cols` grid addressed by a flat, row-major index:
//!
//! - `row = index / cols`
//! - `col = index % cols`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNT_DELAY_MS` | 500 | Interval between countdown steps (3-2-1) |
//! | `REVEAL_DELAY_MS` | 400 | Pause between the last countdown step and the target reveal |
//! | `MISS_FLASH_MS` | 200 | How long the tiles of a wrongly clicked shape flash |
//!
//! # Round Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `START_LIVES` | 3 | Lives at the start of each round |
//! | `COMPLETION_HITS` | 12 | Correct hits needed to clear a round |
//! | `LOCK_PLAN_ATTEMPTS` | 100 | Candidate lines tried before falling back |
//!
//! # Examples
//!
//! ```
//! use reaction_room_types::{Axis, Lock, RoomAction, ShapeKind};
//!
//! let kind = ShapeKind::from_str("heart").unwrap();
//! assert!(kind.is_suit());
//! assert_eq!(ShapeKind::Circle.pair(), Some(ShapeKind::Ring));
//!
//! let lock = Lock::new(Axis::Col, 2);
//! assert!(lock.covers(4, 2));
//! assert!(!lock.covers(4, 3));
//!
//! assert_eq!(RoomAction::from_str("playAgain"), Some(RoomAction::PlayAgain));
//! ```

use serde::{Deserialize, Serialize};

/// Default grid rows
pub const GRID_ROWS: u8 = 6;

/// Default grid columns
pub const GRID_COLS: u8 = 5;

/// Lower bound of the filled fraction of the grid
pub const OCCUPANCY_MIN: f64 = 0.55;

/// Upper bound of the filled fraction of the grid
pub const OCCUPANCY_MAX: f64 = 0.70;

/// Interval between countdown steps
pub const COUNT_DELAY_MS: u32 = 500;

/// Pause between the final countdown step and the reveal
pub const REVEAL_DELAY_MS: u32 = 400;

/// Flash duration for the tiles of a wrongly clicked shape
pub const MISS_FLASH_MS: u32 = 200;

/// First countdown value shown after a start
pub const COUNTDOWN_FROM: u8 = 3;

/// Lives at round start
pub const START_LIVES: u8 = 3;

/// Correct hits needed to finish a round
pub const COMPLETION_HITS: u32 = 12;

/// Bounded retry budget for lock planning
pub const LOCK_PLAN_ATTEMPTS: u32 = 100;

/// Number of lines retained by the event log
pub const EVENT_LOG_CAPACITY: usize = 64;


/// Broad grouping of shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeFamily {
    Basic,
    Suit,
    Special,
}

/// The closed set of shapes a tile can hold
///
/// - **Basic**: circle, ring, square, cross, triangle, star
/// - **Suit**: spade, heart, club, diamond
/// - **Special**: shield and bolt (safe kinds), eye (hint kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Ring,
    Square,
    Cross,
    Triangle,
    Star,
    Spade,
    Heart,
    Club,
    Diamond,
    Shield,
    Bolt,
    Eye,
}

impl ShapeKind {
    /// Every kind, in declaration order
    pub const ALL: [ShapeKind; 13] = [
        ShapeKind::Circle,
        ShapeKind::Ring,
        ShapeKind::Square,
        ShapeKind::Cross,
        ShapeKind::Triangle,
        ShapeKind::Star,
        ShapeKind::Spade,
        ShapeKind::Heart,
        ShapeKind::Club,
        ShapeKind::Diamond,
        ShapeKind::Shield,
        ShapeKind::Bolt,
        ShapeKind::Eye,
    ];

    /// Number of kinds
    pub const COUNT: usize = 13;

    /// Dense index into per-kind tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use reaction_room_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("Circle"), Some(ShapeKind::Circle));
    /// assert_eq!(ShapeKind::from_str("EYE"), Some(ShapeKind::Eye));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(ShapeKind::Circle),
            "ring" => Some(ShapeKind::Ring),
            "square" => Some(ShapeKind::Square),
            "cross" => Some(ShapeKind::Cross),
            "triangle" => Some(ShapeKind::Triangle),
            "star" => Some(ShapeKind::Star),
            "spade" => Some(ShapeKind::Spade),
            "heart" => Some(ShapeKind::Heart),
            "club" => Some(ShapeKind::Club),
            "diamond" => Some(ShapeKind::Diamond),
            "shield" => Some(ShapeKind::Shield),
            "bolt" => Some(ShapeKind::Bolt),
            "eye" => Some(ShapeKind::Eye),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Ring => "ring",
            ShapeKind::Square => "square",
            ShapeKind::Cross => "cross",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
            ShapeKind::Spade => "spade",
            ShapeKind::Heart => "heart",
            ShapeKind::Club => "club",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Shield => "shield",
            ShapeKind::Bolt => "bolt",
            ShapeKind::Eye => "eye",
        }
    }

    pub fn family(&self) -> ShapeFamily {
        match self {
            ShapeKind::Circle
            | ShapeKind::Ring
            | ShapeKind::Square
            | ShapeKind::Cross
            | ShapeKind::Triangle
            | ShapeKind::Star => ShapeFamily::Basic,
            ShapeKind::Spade | ShapeKind::Heart | ShapeKind::Club | ShapeKind::Diamond => {
                ShapeFamily::Suit
            }
            ShapeKind::Shield | ShapeKind::Bolt | ShapeKind::Eye => ShapeFamily::Special,
        }
    }

    pub fn is_suit(&self) -> bool {
        self.family() == ShapeFamily::Suit
    }

    /// Look-alike partner; a hit on one bans the other as the next target
    ///
    /// ```
    /// use reaction_room_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::Cross.pair(), Some(ShapeKind::Square));
    /// assert_eq!(ShapeKind::Star.pair(), None);
    /// ```
    pub fn pair(&self) -> Option<ShapeKind> {
        match self {
            ShapeKind::Circle => Some(ShapeKind::Ring),
            ShapeKind::Ring => Some(ShapeKind::Circle),
            ShapeKind::Square => Some(ShapeKind::Cross),
            ShapeKind::Cross => Some(ShapeKind::Square),
            _ => None,
        }
    }
}

/// Orientation of a lock line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Col => "col",
        }
    }
}

/// A full row or column marked as penalizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lock {
    pub axis: Axis,
    pub index: u8,
}

impl Lock {
    pub const fn new(axis: Axis, index: u8) -> Self {
        Self { axis, index }
    }

    /// Whether the cell at (row, col) lies on this line
    pub fn covers(&self, row: u8, col: u8) -> bool {
        match self.axis {
            Axis::Row => row == self.index,
            Axis::Col => col == self.index,
        }
    }
}

impl std::fmt::Display for Lock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.axis.as_str(), self.index + 1)
    }
}

/// Player-facing actions that drive the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAction {
    /// Start (or restart) a round
    Start,
    /// Clear history and start over
    Reset,
    /// Click the cell at a flat index
    Click(u16),
    /// Dismiss the results panel
    CloseResults,
    /// Start the next round from the results panel
    PlayAgain,
}

impl RoomAction {
    /// Parse a non-click action from string
    ///
    /// ```
    /// use reaction_room_types::RoomAction;
    ///
    /// assert_eq!(RoomAction::from_str("start"), Some(RoomAction::Start));
    /// assert_eq!(RoomAction::from_str("closeResults"), Some(RoomAction::CloseResults));
    /// assert_eq!(RoomAction::from_str("click"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(RoomAction::Start),
            "reset" => Some(RoomAction::Reset),
            "closeresults" => Some(RoomAction::CloseResults),
            "playagain" => Some(RoomAction::PlayAgain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomAction::Start => "start",
            RoomAction::Reset => "reset",
            RoomAction::Click(_) => "click",
            RoomAction::CloseResults => "closeResults",
            RoomAction::PlayAgain => "playAgain",
        }
    }
}

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Countdown,
    Revealed,
    Ended(Outcome),
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Completion hit count reached
    Success,
    /// Lives ran out
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}
