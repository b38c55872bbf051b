//! Terminal input module.
//!
//! This module is independent of any UI framework beyond `crossterm` events.
//! It maps key presses into the per-screen action enums of
//! [`crate::types`] and provides line editors for typed names and scores.

pub mod editor;
pub mod map;

pub use madani_types as types;

pub use editor::{EditorKind, LineEditor};
pub use map::{map_board_key, map_prompt_key, map_setup_key, should_quit};
