//! Scoring module - Madani Estimation round scoring
//!
//! - Exact: `10 * prediction`
//! - Missed: `-10 * prediction`, however far below the prediction the actual is
//! - Over: `10 * prediction + (actual - prediction)`, one point per extra hand
//!
//! Range checks are the caller's job (see [`crate::capture`]); these functions
//! are total over `u8` and never fail.

use crate::types::{Outcome, ResultShortcut, MISSED_FLOOR_ACTUAL, MIN_PREDICTION};

/// Points per predicted hand.
pub const POINTS_PER_HAND: i32 = 10;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreResult {
    pub points: i32,
    pub outcome: Outcome,
}

/// Classify `actual` against `prediction`.
pub fn classify(prediction: u8, actual: u8) -> Outcome {
    match actual.cmp(&prediction) {
        std::cmp::Ordering::Equal => Outcome::Exact,
        std::cmp::Ordering::Less => Outcome::Missed,
        std::cmp::Ordering::Greater => Outcome::Over,
    }
}

/// Points for hitting the prediction exactly.
pub fn exact_points(prediction: u8) -> i32 {
    POINTS_PER_HAND * prediction as i32
}

/// Penalty for a miss; depends only on the prediction.
pub fn missed_penalty(prediction: u8) -> i32 {
    -exact_points(prediction)
}

/// Bonus points for hands won beyond the prediction.
pub fn over_bonus(prediction: u8, actual: u8) -> i32 {
    actual.saturating_sub(prediction) as i32
}

/// Calculate the score for one player's round.
pub fn calculate_score(prediction: u8, actual: u8) -> ScoreResult {
    let outcome = classify(prediction, actual);
    let points = match outcome {
        Outcome::Exact => exact_points(prediction),
        Outcome::Missed => missed_penalty(prediction),
        Outcome::Over => exact_points(prediction) + over_bonus(prediction, actual),
    };
    ScoreResult { points, outcome }
}

/// Actual hands recorded for a "missed" entry.
///
/// One below the prediction, except at the minimum prediction where the floor
/// value keeps the miss representable.
pub fn missed_actual(prediction: u8) -> u8 {
    if prediction > MIN_PREDICTION {
        prediction - 1
    } else {
        MISSED_FLOOR_ACTUAL
    }
}

/// Actual hands implied by a shortcut entry.
pub fn shortcut_actual(prediction: u8, shortcut: ResultShortcut) -> u8 {
    match shortcut {
        ResultShortcut::Exact => prediction,
        ResultShortcut::Missed => missed_actual(prediction),
    }
}
