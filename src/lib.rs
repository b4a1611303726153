//! Reaction Room (workspace facade crate).
//!
//! Re-exports the member crates under `reaction_room::{core,input,term,types}` so the binary,
//! integration tests and benches share one import path.

pub use reaction_room_core as core;
pub use reaction_room_input as input;
pub use reaction_room_term as term;
pub use reaction_room_types as types;
