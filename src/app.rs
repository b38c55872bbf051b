//! Application controller: routes key presses to the session and builds the
//! view models for the current screen.
//!
//! The controller owns the only mutable [`GameSession`]. Every committed
//! transition (start, complete, undo, edit, restart) is followed by a save
//! through the optional [`SessionStore`]; rejected operations only update the
//! status line.

use crossterm::event::KeyEvent;

use crate::core::{Celebration, GameSession, SessionError};
use crate::input::{map_board_key, map_prompt_key, map_setup_key, should_quit, LineEditor};
use crate::store::SessionStore;
use crate::term::{
    BoardModel, BoardView, FrameBuffer, PromptModel, PromptRow, SetupFocus, SetupModel, SetupView,
    Viewport,
};
use crate::types::{
    BoardAction, PlayerId, PromptAction, ResultShortcut, SetupAction, DEFAULT_PLAYER_COUNT,
    DEFAULT_TARGET_SCORE, MAX_HANDS, MAX_NAME_LEN, MIN_PREDICTION, PRESET_PLAYER_NAMES,
    TARGET_SCORE_OPTIONS,
};

/// Step used by Left/Right in the score editor.
const SCORE_STEP: i32 = 10;

/// Whether the main loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Open modal prompt on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Prompt {
    Over { player: PlayerId, actual: u8 },
    EditScores { editors: Vec<LineEditor>, focus: usize },
    ConfirmRestart,
}

pub struct App {
    session: GameSession,
    store: Option<SessionStore>,
    names: Vec<LineEditor>,
    target_index: usize,
    focus: SetupFocus,
    selected: usize,
    prompt: Option<Prompt>,
    status: Option<String>,
    celebration: Option<Celebration>,
}

fn blank_names() -> Vec<LineEditor> {
    (0..DEFAULT_PLAYER_COUNT)
        .map(|_| LineEditor::text(MAX_NAME_LEN))
        .collect()
}

fn target_index_of(target: i32) -> usize {
    TARGET_SCORE_OPTIONS
        .iter()
        .position(|&t| t == target)
        .unwrap_or(0)
}

/// Preset after (or before) `current`; the first/last preset when `current`
/// is not one of them.
fn cycle_preset(current: &str, forward: bool) -> &'static str {
    let len = PRESET_PLAYER_NAMES.len();
    let next = match PRESET_PLAYER_NAMES.iter().position(|&p| p == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    PRESET_PLAYER_NAMES[next]
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

impl App {
    pub fn new(session: GameSession, store: Option<SessionStore>) -> Self {
        let target_index = target_index_of(session.target_score());
        Self {
            session,
            store,
            names: blank_names(),
            target_index,
            focus: SetupFocus::Name(0),
            selected: 0,
            prompt: None,
            status: None,
            celebration: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    /// The winner banner currently on screen, if any.
    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Names currently typed into the setup slots.
    pub fn setup_names(&self) -> Vec<String> {
        self.names.iter().map(|e| e.as_str().to_string()).collect()
    }

    pub fn setup_target(&self) -> i32 {
        TARGET_SCORE_OPTIONS
            .get(self.target_index)
            .copied()
            .unwrap_or(DEFAULT_TARGET_SCORE)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if should_quit(key) {
            return Flow::Quit;
        }
        // The banner swallows the key that dismisses it.
        if self.celebration.take().is_some() {
            return Flow::Continue;
        }

        let flow = if !self.session.started() {
            match map_setup_key(key) {
                Some(action) => self.on_setup(action),
                None => Flow::Continue,
            }
        } else if self.prompt.is_some() {
            if let Some(action) = map_prompt_key(key) {
                self.on_prompt(action);
            }
            Flow::Continue
        } else {
            match map_board_key(key) {
                Some(action) => self.on_board(action),
                None => Flow::Continue,
            }
        };

        if let Some(c) = self.session.take_celebration() {
            self.celebration = Some(c);
        }
        flow
    }

    fn reject(&mut self, err: SessionError) {
        log::warn!("rejected: {}", err);
        self.status = Some(err.to_string());
    }

    fn persist(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.session) {
            log::warn!("failed to save session to {:?}: {}", store.path(), e);
            self.status = Some(format!("Could not save: {e}"));
        }
    }

    // ---------------------------------------------------------------- setup

    fn on_setup(&mut self, action: SetupAction) -> Flow {
        let slots = self.names.len();
        match action {
            SetupAction::FocusNext | SetupAction::FocusPrev => {
                let forward = action == SetupAction::FocusNext;
                // Rows are the name slots followed by the target selector.
                let row = match self.focus {
                    SetupFocus::Name(i) => i,
                    SetupFocus::Target => slots,
                };
                let row = cycle(row, slots + 1, forward);
                self.focus = if row == slots {
                    SetupFocus::Target
                } else {
                    SetupFocus::Name(row)
                };
            }
            SetupAction::CycleNext | SetupAction::CyclePrev => {
                let forward = action == SetupAction::CycleNext;
                match self.focus {
                    SetupFocus::Name(i) => {
                        if let Some(editor) = self.names.get_mut(i) {
                            let next = cycle_preset(editor.as_str(), forward);
                            editor.set(next);
                        }
                    }
                    SetupFocus::Target => {
                        self.target_index =
                            cycle(self.target_index, TARGET_SCORE_OPTIONS.len(), forward);
                    }
                }
            }
            SetupAction::TypeChar(ch) => {
                if let SetupFocus::Name(i) = self.focus {
                    if let Some(editor) = self.names.get_mut(i) {
                        editor.insert(ch);
                    }
                }
            }
            SetupAction::Backspace => {
                if let SetupFocus::Name(i) = self.focus {
                    if let Some(editor) = self.names.get_mut(i) {
                        editor.backspace();
                    }
                }
            }
            SetupAction::Start => self.start(),
            SetupAction::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn start(&mut self) {
        let names = self.setup_names();
        match self.session.start(&names, self.setup_target()) {
            Ok(()) => {
                self.selected = 0;
                self.status = None;
                self.persist();
            }
            Err(e) => self.reject(e),
        }
    }

    // ---------------------------------------------------------------- board

    fn selected_id(&self) -> Option<PlayerId> {
        self.session
            .players()
            .get(self.selected)
            .map(|p| p.id.clone())
    }

    fn selected_prediction(&self) -> Option<u8> {
        let id = self.selected_id()?;
        self.session.capture().entry(&id)?.prediction
    }

    fn on_board(&mut self, action: BoardAction) -> Flow {
        let count = self.session.players().len();
        match action {
            BoardAction::SelectNext => self.selected = cycle(self.selected, count, true),
            BoardAction::SelectPrev => self.selected = cycle(self.selected, count, false),
            BoardAction::SelectSeat(seat) => {
                if (seat as usize) < count {
                    self.selected = seat as usize;
                }
            }
            BoardAction::PredictionUp => {
                let next = match self.selected_prediction() {
                    None => MIN_PREDICTION,
                    Some(p) => p.saturating_add(1).min(MAX_HANDS),
                };
                self.set_prediction(next);
            }
            BoardAction::PredictionDown => {
                let next = match self.selected_prediction() {
                    None => MIN_PREDICTION,
                    Some(p) => p.saturating_sub(1).max(MIN_PREDICTION),
                };
                self.set_prediction(next);
            }
            BoardAction::ClearPrediction => {
                if let Some(id) = self.selected_id() {
                    if let Err(e) = self.session.clear_prediction(&id) {
                        self.reject(e);
                    }
                }
            }
            BoardAction::MarkExact => self.mark(ResultShortcut::Exact),
            BoardAction::MarkMissed => self.mark(ResultShortcut::Missed),
            BoardAction::MarkOver => self.open_over_prompt(),
            BoardAction::CompleteRound => match self.session.complete_round() {
                Ok(_) => {
                    self.status = Some(format!("Round {} recorded", self.session.rounds().len()));
                    self.persist();
                }
                Err(e) => self.reject(e),
            },
            BoardAction::UndoLastRound => match self.session.undo_last_round() {
                Ok(_) => {
                    self.status = Some("Last round removed".to_string());
                    self.persist();
                }
                Err(e) => self.reject(e),
            },
            BoardAction::EditScores => {
                let editors = self
                    .session
                    .totals()
                    .iter()
                    .map(|t| LineEditor::signed_number().with_value(&t.to_string()))
                    .collect();
                self.prompt = Some(Prompt::EditScores { editors, focus: 0 });
            }
            BoardAction::Restart => self.prompt = Some(Prompt::ConfirmRestart),
            BoardAction::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn set_prediction(&mut self, value: u8) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.session.record_prediction(&id, value) {
            self.reject(e);
        }
    }

    fn mark(&mut self, shortcut: ResultShortcut) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.session.record_shortcut_result(&id, shortcut) {
            self.reject(e);
        }
    }

    fn open_over_prompt(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(prediction) = self.selected_prediction() else {
            self.reject(SessionError::MissingPrediction(id));
            return;
        };
        if prediction >= MAX_HANDS {
            self.reject(SessionError::OverActualOutOfRange {
                prediction,
                actual: prediction.saturating_add(1),
            });
            return;
        }
        self.prompt = Some(Prompt::Over {
            player: id,
            actual: prediction + 1,
        });
    }

    // --------------------------------------------------------------- prompts

    fn on_prompt(&mut self, action: PromptAction) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        if action == PromptAction::Cancel {
            return;
        }
        self.prompt = match prompt {
            Prompt::Over { player, actual } => self.on_over_prompt(player, actual, action),
            Prompt::EditScores { editors, focus } => self.on_edit_prompt(editors, focus, action),
            Prompt::ConfirmRestart => self.on_restart_prompt(action),
        };
    }

    /// Returns the prompt to keep open, `None` once it is resolved.
    fn on_over_prompt(&mut self, player: PlayerId, actual: u8, action: PromptAction) -> Option<Prompt> {
        let floor = self
            .session
            .capture()
            .entry(&player)
            .and_then(|e| e.prediction)
            .map_or(MIN_PREDICTION + 1, |p| p.saturating_add(1));

        let actual = match action {
            PromptAction::Increment | PromptAction::FocusPrev => actual.saturating_add(1).min(MAX_HANDS),
            PromptAction::Decrement | PromptAction::FocusNext => actual.saturating_sub(1).max(floor),
            PromptAction::Confirm => {
                return match self.session.record_over_result(&player, actual) {
                    Ok(_) => None,
                    Err(e) => {
                        self.reject(e);
                        Some(Prompt::Over { player, actual })
                    }
                };
            }
            _ => actual,
        };
        Some(Prompt::Over { player, actual })
    }

    fn on_edit_prompt(
        &mut self,
        mut editors: Vec<LineEditor>,
        mut focus: usize,
        action: PromptAction,
    ) -> Option<Prompt> {
        match action {
            PromptAction::FocusNext => focus = cycle(focus, editors.len(), true),
            PromptAction::FocusPrev => focus = cycle(focus, editors.len(), false),
            PromptAction::TypeChar(ch) => {
                if let Some(editor) = editors.get_mut(focus) {
                    editor.insert(ch);
                }
            }
            PromptAction::Backspace => {
                if let Some(editor) = editors.get_mut(focus) {
                    editor.backspace();
                }
            }
            PromptAction::Increment | PromptAction::Decrement => {
                if let Some(editor) = editors.get_mut(focus) {
                    let step = if action == PromptAction::Increment {
                        SCORE_STEP
                    } else {
                        -SCORE_STEP
                    };
                    let value = editor.parse_i32().unwrap_or(0).saturating_add(step);
                    editor.set(&value.to_string());
                }
            }
            PromptAction::Confirm => {
                // A blank field keeps that player's current total.
                let mut requested = Vec::with_capacity(editors.len());
                for (player, editor) in self.session.players().iter().zip(&editors) {
                    if editor.is_empty() {
                        continue;
                    }
                    match editor.parse_i32() {
                        Some(total) => requested.push((player.id.clone(), total)),
                        None => {
                            self.status = Some(format!("Enter a score for {}", player.name));
                            return Some(Prompt::EditScores { editors, focus });
                        }
                    }
                }
                return match self.session.edit_scores(requested) {
                    Ok(()) => {
                        self.status = Some("Scores updated".to_string());
                        self.persist();
                        None
                    }
                    Err(e) => {
                        self.reject(e);
                        Some(Prompt::EditScores { editors, focus })
                    }
                };
            }
            PromptAction::Cancel => return None,
        }
        Some(Prompt::EditScores { editors, focus })
    }

    fn on_restart_prompt(&mut self, action: PromptAction) -> Option<Prompt> {
        match action {
            PromptAction::Confirm | PromptAction::TypeChar('y') | PromptAction::TypeChar('Y') => {
                let previous: Vec<String> =
                    self.session.players().iter().map(|p| p.name.clone()).collect();
                self.session.restart();
                self.persist();

                // Keep the last roster in the setup slots.
                self.names = blank_names();
                for (editor, name) in self.names.iter_mut().zip(&previous) {
                    editor.set(name);
                }
                self.focus = SetupFocus::Name(0);
                self.selected = 0;
                self.status = None;
                None
            }
            PromptAction::TypeChar('n') | PromptAction::TypeChar('N') => None,
            _ => Some(Prompt::ConfirmRestart),
        }
    }

    // ---------------------------------------------------------------- render

    fn prompt_model(&self) -> Option<PromptModel> {
        let prompt = self.prompt.as_ref()?;
        let model = match prompt {
            Prompt::Over { player, actual } => {
                let name = self
                    .session
                    .player(player)
                    .map_or(player.as_str(), |p| p.name.as_str());
                PromptModel {
                    title: format!("Over: {name}"),
                    rows: vec![PromptRow {
                        label: "Hands won".to_string(),
                        value: format!("< {actual} >"),
                        focused: true,
                    }],
                    hint: "Left/Right adjust  Enter confirm  Esc cancel".to_string(),
                }
            }
            Prompt::EditScores { editors, focus } => PromptModel {
                title: "Edit scores".to_string(),
                rows: self
                    .session
                    .players()
                    .iter()
                    .zip(editors)
                    .enumerate()
                    .map(|(i, (p, e))| PromptRow {
                        label: format!("{:<20}", p.name),
                        value: e.as_str().to_string(),
                        focused: i == *focus,
                    })
                    .collect(),
                hint: "Type a total (blank keeps it)  Left/Right -/+10  Enter save  Esc cancel".to_string(),
            },
            Prompt::ConfirmRestart => PromptModel {
                title: "Restart and discard this game?".to_string(),
                rows: Vec::new(),
                hint: "y/Enter restart  n/Esc keep playing".to_string(),
            },
        };
        Some(model)
    }

    pub fn render(&self, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(viewport, &mut fb);
        fb
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        if !self.session.started() {
            let names = self.setup_names();
            let model = SetupModel {
                names: &names,
                focus: self.focus,
                target_score: self.setup_target(),
                status: self.status.as_deref(),
            };
            SetupView::new().render_into(&model, viewport, fb);
            return;
        }

        let prompt = self.prompt_model();
        let model = BoardModel {
            session: &self.session,
            selected: self.selected,
            prompt: prompt.as_ref(),
            status: self.status.as_deref(),
            celebration: self.celebration.as_ref(),
        };
        BoardView::new().render_into(&model, viewport, fb);
    }
}
