//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::RoomAction`]s. The grid has no pointer in
//! a terminal, so a [`GridCursor`] stands in for the mouse: movement keys steer it and the
//! press keys click the tile under it.

pub mod cursor;
pub mod map;

pub use reaction_room_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit};
