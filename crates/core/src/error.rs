//! Rejected-operation taxonomy.
//!
//! Every session transition validates first and mutates second, so an `Err`
//! always means the session is exactly as it was before the call.

use madani_types::{PlayerId, MAX_HANDS, MAX_NAME_LEN, MIN_PREDICTION};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Game has not started")]
    NotStarted,

    #[error("Game is already in progress")]
    AlreadyStarted,

    #[error("Need at least {min} players, got {count}")]
    RosterTooSmall { count: usize, min: usize },

    #[error("Player {} has no name", .seat + 1)]
    BlankPlayerName { seat: usize },

    #[error("Player {} name is longer than {} characters", .seat + 1, MAX_NAME_LEN)]
    PlayerNameTooLong { seat: usize },

    #[error("Target score must be positive, got {0}")]
    InvalidTargetScore(i32),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Prediction must be between {} and {}, got {}", MIN_PREDICTION, MAX_HANDS, .0)]
    PredictionOutOfRange(u8),

    #[error("{0} has no prediction yet")]
    MissingPrediction(PlayerId),

    #[error("Over result needs more than {} and at most {} hands, got {}", .prediction, MAX_HANDS, .actual)]
    OverActualOutOfRange { prediction: u8, actual: u8 },

    #[error("Round is incomplete: {pending} player(s) still need a result")]
    IncompleteRound { pending: usize },

    #[error("No rounds to undo")]
    EmptyLedger,

    #[error("Total for {0} would be out of range")]
    ScoreOutOfRange(PlayerId),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
