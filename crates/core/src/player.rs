//! Players and roster construction.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::{PlayerId, MAX_NAME_LEN, MIN_PLAYERS};

/// A seated player.
///
/// `total_score` is a projection of the ledger (see [`crate::totals`]) cached for
/// display; it is overwritten on every ledger change and never edited directly.
/// Manual corrections go through `base_score_offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub total_score: i32,
    #[serde(default)]
    pub base_score_offset: i32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_score: 0,
            base_score_offset: 0,
        }
    }
}

/// Check a single seat's name, returning the trimmed name.
pub fn validate_name(seat: usize, name: &str) -> Result<&str, SessionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SessionError::BlankPlayerName { seat });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(SessionError::PlayerNameTooLong { seat });
    }
    Ok(trimmed)
}

/// Build a roster from names in seat order.
///
/// Duplicate names are allowed; players are told apart by seat id.
pub fn build_roster<S: AsRef<str>>(names: &[S]) -> Result<Vec<Player>, SessionError> {
    if names.len() < MIN_PLAYERS {
        return Err(SessionError::RosterTooSmall {
            count: names.len(),
            min: MIN_PLAYERS,
        });
    }

    names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            validate_name(seat, name.as_ref()).map(|n| Player::new(PlayerId::from_seat(seat), n))
        })
        .collect()
}
