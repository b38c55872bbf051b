//! BoardView: maps a `GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Celebration, GameSession};
use crate::fb::{palette, CellStyle, FrameBuffer, Rgb};
use crate::types::Outcome;
use crate::Viewport;

/// One editable line of a modal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRow {
    pub label: String,
    pub value: String,
    pub focused: bool,
}

/// A modal box drawn over the board (over actual, score edit, confirmations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptModel {
    pub title: String,
    pub rows: Vec<PromptRow>,
    pub hint: String,
}

/// Everything the board shows besides the session itself.
#[derive(Debug, Clone)]
pub struct BoardModel<'a> {
    pub session: &'a GameSession,
    /// Seat index of the highlighted player.
    pub selected: usize,
    pub prompt: Option<&'a PromptModel>,
    pub status: Option<&'a str>,
    pub celebration: Option<&'a Celebration>,
}

const LEFT: u16 = 2;
const COL_NAME: u16 = 7;
const COL_TOTAL: u16 = 29;
const COL_BID: u16 = 38;
const COL_RESULT: u16 = 44;
const HISTORY_ROWS: usize = 5;

const HINTS: &str =
    "Up/Down select  Left/Right bid  e exact  m missed  o over  Enter complete  u undo  s scores  r restart  q quit";

fn outcome_color(outcome: Outcome) -> Rgb {
    match outcome {
        Outcome::Exact => palette::EXACT,
        Outcome::Missed => palette::MISSED,
        Outcome::Over => palette::OVER,
    }
}

/// Text for a captured or recorded result, e.g. `over 8 +62`.
fn result_label(outcome: Outcome, actual: u8, points: i32) -> String {
    match outcome {
        Outcome::Over => format!("over {actual} {points:+}"),
        _ => format!("{outcome} {points:+}"),
    }
}

#[derive(Debug, Default)]
pub struct BoardView;

impl BoardView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, model: &BoardModel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(model, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, model: &BoardModel<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let session = model.session;
        let mut y = self.draw_header(session, fb);
        y = self.draw_players(model, fb, y + 1);
        y = self.draw_standings(session, fb, y + 1);
        self.draw_history(session, fb, y + 1);

        let muted = CellStyle::fg(palette::MUTED);
        if let Some(status) = model.status {
            fb.put_str(LEFT, viewport.height.saturating_sub(2), status, CellStyle::fg(palette::TEXT));
        }
        fb.put_str(LEFT, viewport.height.saturating_sub(1), HINTS, muted);

        if let Some(prompt) = model.prompt {
            draw_prompt(prompt, viewport, fb);
        } else if let Some(c) = model.celebration {
            draw_celebration(c, viewport, fb);
        }
    }

    fn draw_header(&self, session: &GameSession, fb: &mut FrameBuffer) -> u16 {
        let title = CellStyle::fg(palette::ACCENT).bold();
        let text = CellStyle::fg(palette::TEXT);

        let end = fb.put_str(LEFT, 1, "MADANI ESTIMATION", title);
        let info = format!(
            "Target {}   Round {}",
            session.target_score(),
            session.current_round_number()
        );
        fb.put_str(end + 4, 1, &info, text);

        if let Some(winner) = session.winner() {
            let banner = format!("* {} wins with {} *", winner.name, winner.total_score);
            fb.put_str(LEFT, 2, &banner, CellStyle::fg(palette::ACCENT).bold());
        }
        3
    }

    fn draw_players(&self, model: &BoardModel<'_>, fb: &mut FrameBuffer, mut y: u16) -> u16 {
        let session = model.session;
        let muted = CellStyle::fg(palette::MUTED);
        let text = CellStyle::fg(palette::TEXT);
        let target = session.target_score();

        fb.put_str(LEFT + 2, y, "#", muted);
        fb.put_str(COL_NAME, y, "Player", muted);
        fb.put_str(COL_TOTAL, y, "Total", muted);
        fb.put_str(COL_BID, y, "Bid", muted);
        fb.put_str(COL_RESULT, y, "Result", muted);
        y += 1;

        for (seat, player) in session.players().iter().enumerate() {
            let selected = seat == model.selected;
            let row_style = if selected { text.on(palette::PANEL) } else { text };
            if selected {
                fb.fill_rect(LEFT, y, fb.width().saturating_sub(LEFT * 2), 1, ' ', row_style);
                fb.put_char(LEFT, y, '>', CellStyle::fg(palette::ACCENT).bold().on(palette::PANEL));
            }

            fb.put_str(LEFT + 2, y, &(seat + 1).to_string(), row_style);
            fb.put_str(COL_NAME, y, &player.name, row_style);

            let total_style = if player.total_score >= target {
                CellStyle::fg(palette::ACCENT).bold()
            } else {
                row_style
            };
            let total = format!("{:>6}", player.total_score);
            fb.put_str(COL_TOTAL, y, &total, total_style);

            let entry = session.capture().entry(&player.id);
            let bid = entry
                .and_then(|e| e.prediction)
                .map_or_else(|| "-".to_string(), |p| p.to_string());
            fb.put_str(COL_BID, y, &format!("{bid:>3}"), row_style);

            match entry.and_then(|e| e.result) {
                Some(r) => {
                    let label = result_label(r.score.outcome, r.actual, r.score.points);
                    fb.put_str(COL_RESULT, y, &label, CellStyle::fg(outcome_color(r.score.outcome)));
                }
                None => {
                    fb.put_str(COL_RESULT, y, "...", muted);
                }
            }
            y += 1;
        }
        y
    }

    fn draw_standings(&self, session: &GameSession, fb: &mut FrameBuffer, mut y: u16) -> u16 {
        let text = CellStyle::fg(palette::TEXT);
        fb.put_str(LEFT, y, "Standings", CellStyle::fg(palette::MUTED));
        y += 1;

        let players = session.players();
        for row in session.standings() {
            let Some(player) = players.get(row.seat) else {
                continue;
            };
            let line = format!("{:>2}. {:<20} {:>6}", row.rank, player.name, row.total);
            let style = if session.winner_seat() == Some(row.seat) {
                CellStyle::fg(palette::ACCENT).bold()
            } else {
                text
            };
            fb.put_str(LEFT + 2, y, &line, style);
            y += 1;
        }
        y
    }

    fn draw_history(&self, session: &GameSession, fb: &mut FrameBuffer, mut y: u16) -> u16 {
        let rounds = session.rounds();
        if rounds.is_empty() {
            return y;
        }
        fb.put_str(LEFT, y, "Recent rounds", CellStyle::fg(palette::MUTED));
        y += 1;

        let first = rounds.len().saturating_sub(HISTORY_ROWS);
        for (i, round) in rounds.iter().enumerate().skip(first).rev() {
            let mut x = fb.put_str(LEFT + 2, y, &format!("R{:<3}", i + 1), CellStyle::fg(palette::MUTED));
            for player in session.players() {
                if let Some(r) = round.result_for(&player.id) {
                    let cell = format!(" {:>5}", format!("{:+}", r.score));
                    x = fb.put_str(x, y, &cell, CellStyle::fg(outcome_color(r.outcome)));
                }
            }
            y += 1;
        }
        y
    }
}

/// Center a box of `w`x`h` in the viewport.
fn centered(viewport: Viewport, w: u16, h: u16) -> (u16, u16, u16, u16) {
    let w = w.min(viewport.width);
    let h = h.min(viewport.height);
    (
        viewport.width.saturating_sub(w) / 2,
        viewport.height.saturating_sub(h) / 2,
        w,
        h,
    )
}

fn draw_prompt(prompt: &PromptModel, viewport: Viewport, fb: &mut FrameBuffer) {
    let inner_w = prompt
        .rows
        .iter()
        .map(|r| r.label.chars().count() + r.value.chars().count() + 6)
        .chain([prompt.title.chars().count(), prompt.hint.chars().count()])
        .max()
        .unwrap_or(0) as u16;
    let h = prompt.rows.len() as u16 + 5;
    let (x, y, w, h) = centered(viewport, inner_w + 4, h);

    let panel = CellStyle::fg(palette::TEXT).on(palette::PANEL);
    fb.fill_rect(x, y, w, h, ' ', panel);
    fb.draw_box(x, y, w, h, CellStyle::fg(palette::ACCENT).on(palette::PANEL));
    fb.put_str(x + 2, y + 1, &prompt.title, CellStyle::fg(palette::ACCENT).bold().on(palette::PANEL));

    for (i, row) in prompt.rows.iter().enumerate() {
        let ry = y + 2 + i as u16;
        let style = if row.focused {
            CellStyle::fg(palette::ACCENT).bold().on(palette::PANEL)
        } else {
            panel
        };
        let marker = if row.focused { "> " } else { "  " };
        let end = fb.put_str(x + 2, ry, marker, style);
        let end = fb.put_str(end, ry, &row.label, style);
        fb.put_str(end + 2, ry, &row.value, style);
    }

    fb.put_str(x + 2, y + h.saturating_sub(2), &prompt.hint, CellStyle::fg(palette::MUTED).on(palette::PANEL));
}

fn draw_celebration(c: &Celebration, viewport: Viewport, fb: &mut FrameBuffer) {
    let line = format!("{} reached {} points!", c.name, c.total);
    let hint = "press any key";
    let inner_w = line.chars().count().max(hint.len()) as u16;
    let (x, y, w, h) = centered(viewport, inner_w + 6, 5);

    let panel = CellStyle::fg(palette::ACCENT).bold().on(palette::PANEL);
    fb.fill_rect(x, y, w, h, ' ', panel);
    fb.draw_box(x, y, w, h, panel);
    fb.put_str(x + 3, y + 1, &line, panel);
    fb.put_str(x + 3, y + 3, hint, CellStyle::fg(palette::MUTED).on(palette::PANEL));
}
