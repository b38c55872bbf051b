//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the scorekeeper.
//! Everything here is plain data (only `serde` derives), usable from the core
//! rules, the storage layer and the terminal frontend alike.
//!
//! # Hands
//!
//! A round of Madani Estimation deals 13 tricks ("hands"). Each player predicts
//! how many they will win:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_PREDICTION` | 2 | Smallest legal prediction |
//! | `MAX_HANDS` | 13 | Largest prediction and largest actual |
//! | `MISSED_FLOOR_ACTUAL` | 1 | Actual recorded for a miss at prediction 2 |
//!
//! # Session setup
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TARGET_SCORE` | 250 | Target after a restart |
//! | `DEFAULT_PLAYER_COUNT` | 4 | Name slots on the setup screen |
//! | `MIN_PLAYERS` | 2 | Smallest roster the rules accept |
//! | `MAX_NAME_LEN` | 20 | Longest player name (after trimming) |
//!
//! # Examples
//!
//! ```
//! use madani_types::{Outcome, PlayerId};
//!
//! let id = PlayerId::from_seat(2);
//! assert_eq!(id.as_str(), "player-2");
//!
//! assert_eq!(Outcome::from_str("OVER"), Some(Outcome::Over));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest prediction a player may make.
pub const MIN_PREDICTION: u8 = 2;

/// Tricks dealt per round; upper bound for predictions and actuals.
pub const MAX_HANDS: u8 = 13;

/// Actual hands recorded when a prediction of [`MIN_PREDICTION`] is missed.
pub const MISSED_FLOOR_ACTUAL: u8 = 1;

/// Target score for a fresh session.
pub const DEFAULT_TARGET_SCORE: i32 = 250;

/// Targets offered by the setup screen, in cycling order.
pub const TARGET_SCORE_OPTIONS: [i32; 6] = [250, 300, 350, 500, 750, 1000];

/// Name slots on the setup screen.
pub const DEFAULT_PLAYER_COUNT: usize = 4;

/// Smallest roster accepted by the session.
pub const MIN_PLAYERS: usize = 2;

/// Longest accepted player name, counted in characters after trimming.
pub const MAX_NAME_LEN: usize = 20;

/// Quick-pick names for the setup screen.
pub const PRESET_PLAYER_NAMES: [&str; 16] = [
    "Mohammed", "Yousef", "Kahled", "Salwa", "DD", "Najlaa", "Um Ali", "Raneem", "Yasser",
    "Redwhan", "Ahemd", "Tariq", "Abdullah", "Ammar", "S7S", "Mazzo",
];

/// Whether `value` is a legal prediction (`2..=13`).
///
/// ```
/// use madani_types::is_valid_prediction;
///
/// assert!(is_valid_prediction(2));
/// assert!(is_valid_prediction(13));
/// assert!(!is_valid_prediction(1));
/// assert!(!is_valid_prediction(14));
/// ```
pub fn is_valid_prediction(value: u8) -> bool {
    (MIN_PREDICTION..=MAX_HANDS).contains(&value)
}

/// Whether `value` is a storable actual (`1..=13`).
///
/// `1` only ever comes from the missed shortcut at the minimum prediction.
pub fn is_valid_actual(value: u8) -> bool {
    (MISSED_FLOOR_ACTUAL..=MAX_HANDS).contains(&value)
}

/// Stable, opaque player identifier.
///
/// Ids are assigned by seat when a session starts and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the player sitting at `seat` (0-based).
    pub fn from_seat(seat: usize) -> Self {
        Self(format!("player-{}", seat))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a completed round.
///
/// Strictly increasing along the ledger. The session derives it from wall-clock
/// milliseconds, bumped past the previous id when the clock has not advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(u64);

impl RoundId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Smallest id that is both `>= now_ms` and strictly after `self`.
    pub fn next_after(self, now_ms: u64) -> Self {
        Self(now_ms.max(self.0.saturating_add(1)))
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a round result.
///
/// - **Exact**: actual equals prediction
/// - **Missed**: actual below prediction
/// - **Over**: actual above prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Exact,
    Missed,
    Over,
}

impl Outcome {
    /// Parse outcome from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Some(Outcome::Exact),
            "missed" => Some(Outcome::Missed),
            "over" => Some(Outcome::Over),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Exact => "exact",
            Outcome::Missed => "missed",
            Outcome::Over => "over",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result entry that implies the actual from the prediction.
///
/// "Over" is not a shortcut: it needs an explicit actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShortcut {
    /// Actual equals prediction.
    Exact,
    /// Actual is one below prediction, floored at [`MISSED_FLOOR_ACTUAL`].
    Missed,
}

impl ResultShortcut {
    pub fn outcome(&self) -> Outcome {
        match self {
            ResultShortcut::Exact => Outcome::Exact,
            ResultShortcut::Missed => Outcome::Missed,
        }
    }
}

/// Actions on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    /// Move focus to the next row (name slots, then target)
    FocusNext,
    FocusPrev,
    /// Cycle the focused row forward (preset name or target option)
    CycleNext,
    CyclePrev,
    /// Append a character to the focused name
    TypeChar(char),
    Backspace,
    /// Start the session with the entered roster
    Start,
    Quit,
}

/// Actions on the score board while a session is running.
///
/// These are the presentation-level verbs; each one maps onto at most one
/// session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    SelectNext,
    SelectPrev,
    /// Jump to the player at this 0-based seat
    SelectSeat(u8),
    /// Raise the selected player's prediction (starts at the minimum)
    PredictionUp,
    PredictionDown,
    ClearPrediction,
    MarkExact,
    MarkMissed,
    /// Open the actual-hands prompt for an over result
    MarkOver,
    CompleteRound,
    UndoLastRound,
    /// Open the edit-scores prompt
    EditScores,
    /// Ask for confirmation, then restart
    Restart,
    Quit,
}

/// Actions inside a modal prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Increment,
    Decrement,
    FocusNext,
    FocusPrev,
    TypeChar(char),
    Backspace,
    Confirm,
    Cancel,
}
