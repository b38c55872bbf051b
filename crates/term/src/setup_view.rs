//! SetupView: the roster and target screen shown before a session starts.
//!
//! Pure rendering, no I/O.

use crate::fb::{palette, CellStyle, FrameBuffer};
use crate::Viewport;

/// Which setup field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    Name(usize),
    Target,
}

/// Everything the setup screen shows.
#[derive(Debug, Clone)]
pub struct SetupModel<'a> {
    pub names: &'a [String],
    pub focus: SetupFocus,
    pub target_score: i32,
    pub status: Option<&'a str>,
}

const LEFT: u16 = 2;
const LABEL_W: u16 = 12;

#[derive(Debug, Default)]
pub struct SetupView;

impl SetupView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, model: &SetupModel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(model, viewport, &mut fb);
        fb
    }

    pub fn render_into(&self, model: &SetupModel<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let title = CellStyle::fg(palette::ACCENT).bold();
        let text = CellStyle::fg(palette::TEXT);
        let muted = CellStyle::fg(palette::MUTED);
        let focused = CellStyle::fg(palette::ACCENT).bold().on(palette::PANEL);

        fb.put_str(LEFT, 1, "MADANI ESTIMATION", title);
        fb.put_str(LEFT, 2, "New game", muted);

        let mut y = 4;
        for (i, name) in model.names.iter().enumerate() {
            let is_focused = model.focus == SetupFocus::Name(i);
            let marker = if is_focused { ">" } else { " " };
            fb.put_str(LEFT, y, marker, title);
            fb.put_str(LEFT + 2, y, &format!("Player {}", i + 1), text);

            let style = if is_focused { focused } else { text };
            let end = fb.put_str(LEFT + 2 + LABEL_W, y, name, style);
            if is_focused {
                fb.put_char(end, y, '_', focused);
            }
            y += 1;
        }

        y += 1;
        let is_focused = model.focus == SetupFocus::Target;
        fb.put_str(LEFT, y, if is_focused { ">" } else { " " }, title);
        fb.put_str(LEFT + 2, y, "Target", text);
        let style = if is_focused { focused } else { text };
        fb.put_str(LEFT + 2 + LABEL_W, y, &format!("< {} >", model.target_score), style);

        y += 2;
        if let Some(status) = model.status {
            fb.put_str(LEFT, y, status, CellStyle::fg(palette::MISSED));
        }

        let hints = "Tab/Up/Down move  Left/Right cycle names and target  Enter start  Esc quit";
        fb.put_str(LEFT, viewport.height.saturating_sub(1), hints, muted);
    }
}
