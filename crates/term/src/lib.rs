//! Terminal front end for the reaction room.
//!
//! Renders into a plain framebuffer instead of using a widget toolkit, so the view stays
//! pure and testable and the renderer only has to diff cells.

pub mod fb;
pub mod flash;
pub mod renderer;
pub mod room_view;

pub use reaction_room_core as core;
pub use reaction_room_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use flash::MissFlash;
pub use renderer::{encode_frame, TerminalRenderer};
pub use room_view::{glyph, RoomView, Viewport};
