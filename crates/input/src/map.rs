//! Key mapping from terminal events to scorekeeper actions.
//!
//! Each screen has its own map because the same key means different things:
//! letters are typed into names on the setup screen but are commands on the
//! board.

use crate::types::{BoardAction, PromptAction, SetupAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Map keyboard input on the setup screen.
pub fn map_setup_key(key: KeyEvent) -> Option<SetupAction> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(SetupAction::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(SetupAction::FocusPrev),
        KeyCode::Right => Some(SetupAction::CycleNext),
        KeyCode::Left => Some(SetupAction::CyclePrev),
        KeyCode::Backspace => Some(SetupAction::Backspace),
        KeyCode::Enter => Some(SetupAction::Start),
        KeyCode::Esc => Some(SetupAction::Quit),
        KeyCode::Char(c) if is_plain(&key) => Some(SetupAction::TypeChar(c)),
        _ => None,
    }
}

/// Map keyboard input on the score board.
pub fn map_board_key(key: KeyEvent) -> Option<BoardAction> {
    if !is_plain(&key) {
        return None;
    }
    match key.code {
        // Selection
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => Some(BoardAction::SelectNext),
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => Some(BoardAction::SelectPrev),
        KeyCode::Char(c @ '1'..='9') => Some(BoardAction::SelectSeat(c as u8 - b'1')),

        // Prediction
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') => {
            Some(BoardAction::PredictionUp)
        }
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => Some(BoardAction::PredictionDown),
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => {
            Some(BoardAction::ClearPrediction)
        }

        // Results
        KeyCode::Char('e') | KeyCode::Char('E') => Some(BoardAction::MarkExact),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(BoardAction::MarkMissed),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(BoardAction::MarkOver),

        // Round
        KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => Some(BoardAction::CompleteRound),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(BoardAction::UndoLastRound),

        // Session
        KeyCode::Char('s') | KeyCode::Char('S') => Some(BoardAction::EditScores),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BoardAction::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(BoardAction::Quit),

        _ => None,
    }
}

/// Map keyboard input inside a modal prompt.
pub fn map_prompt_key(key: KeyEvent) -> Option<PromptAction> {
    match key.code {
        KeyCode::Right => Some(PromptAction::Increment),
        KeyCode::Left => Some(PromptAction::Decrement),
        KeyCode::Tab | KeyCode::Down => Some(PromptAction::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(PromptAction::FocusPrev),
        KeyCode::Backspace => Some(PromptAction::Backspace),
        KeyCode::Enter => Some(PromptAction::Confirm),
        KeyCode::Esc => Some(PromptAction::Cancel),
        KeyCode::Char(c) if is_plain(&key) => Some(PromptAction::TypeChar(c)),
        _ => None,
    }
}

/// Check if key should quit regardless of screen.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
