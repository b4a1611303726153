//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the round rules, state management, and selection policies of the
//! reaction room. It has **no dependencies** on UI, terminal, or I/O, which makes it:
//!
//! - **Deterministic**: the same seed and the same timed inputs replay the same rounds
//! - **Testable**: time is passed in explicitly, so timers run under a fake clock
//! - **Portable**: any front end (terminal, browser, headless) can drive it
//!
//! # Module Structure
//!
//! - [`board`]: tile grid with weighted population, respawn and refill
//! - [`lock`]: the moving lock line and its bounded planner
//! - [`target`]: target selection with used/forbid exclusions
//! - [`session`]: the round state machine (`Idle → Countdown → Revealed → Ended`)
//! - [`stats`]: split timing aggregates and round summaries
//! - [`scheduler`]: countdown/reveal timers and clocks
//! - [`config`]: tunables, JSON loading and validation
//! - [`events`]: render effects and the player-facing log
//! - [`rng`]: seedable random source
//!
//! # Round Rules
//!
//! - A countdown (3-2-1, 500ms apart) precedes the reveal of the target shape
//! - Clicking the target scores a hit and records the split since the previous hit
//! - Clicking another shape, or any shape on the locked line, costs a life
//! - The lock moves to the pre-planned line after every hit or penalty
//! - Twelve hits clear the round; losing all three lives ends it
//!
//! # Example
//!
//! ```
//! use reaction_room_core::{ClickOutcome, GameSession};
//! use reaction_room_core::types::Phase;
//!
//! let mut session = GameSession::new(12345);
//! session.start(0);
//!
//! // Drive the countdown with explicit timestamps.
//! let mut now = 0;
//! while session.phase() == Phase::Countdown {
//!     now = session.next_timer_due().unwrap();
//!     session.advance(now);
//! }
//! assert!(session.target().is_some());
//!
//! // Click the first target tile that is not on the locked line.
//! let target = session.target().unwrap();
//! if let Some(&i) = session
//!     .board()
//!     .cells_of(target)
//!     .iter()
//!     .find(|&&i| !session.locks().is_locked(i))
//! {
//!     assert_eq!(session.click(i, now + 350), ClickOutcome::Hit);
//!     assert_eq!(session.splits()[0].split_ms, 350);
//! }
//! ```

pub mod board;
pub mod config;
pub mod events;
pub mod lock;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod target;

pub use reaction_room_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use config::{ConfigError, OccupancyRange, RoomConfig, SafeRule};
pub use events::{EventLog, LockReason, RoomEvent};
pub use lock::LockPlanner;
pub use rng::SimpleRng;
pub use scheduler::{Clock, ManualClock, MonotonicClock, Scheduler, TimerKind};
pub use session::{ClickOutcome, GameSession};
pub use snapshot::{RoomSnapshot, TileSnapshot};
pub use stats::{RoundSummary, SplitRecord, SplitStats};
pub use target::KindSet;
