//! Terminal rendering for the scorekeeper.
//!
//! Views render the session into a plain framebuffer, which
//! [`TerminalRenderer`] flushes to the terminal. Views never touch I/O, so
//! screens can be asserted on as text in tests.

pub mod board_view;
pub mod fb;
pub mod renderer;
pub mod setup_view;

pub use madani_core as core;
pub use madani_types as types;

pub use board_view::{BoardModel, BoardView, PromptModel, PromptRow};
pub use fb::{palette, Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_changed_rows_into, encode_full_into, TerminalRenderer};
pub use setup_view::{SetupFocus, SetupModel, SetupView};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}
