//! Persisted session record.
//!
//! Field names are camelCase. Totals and the winner are stored for readers of
//! the file only; restoring recomputes both from the rounds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::ledger::{is_chronological, Round};
use crate::player::{validate_name, Player};
use crate::totals::checked_total;
use crate::types::{
    is_valid_actual, is_valid_prediction, PlayerId, DEFAULT_TARGET_SCORE, MIN_PLAYERS,
};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub target_score: i32,
    pub game_started: bool,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            players: Vec::new(),
            rounds: Vec::new(),
            target_score: DEFAULT_TARGET_SCORE,
            game_started: false,
            winner: None,
        }
    }
}

fn invalid(msg: impl Into<String>) -> SessionError {
    SessionError::InvalidSnapshot(msg.into())
}

impl SessionSnapshot {
    /// Check everything a restored session relies on.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(invalid(format!(
                "version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }
        if self.target_score <= 0 {
            return Err(SessionError::InvalidTargetScore(self.target_score));
        }

        if !self.game_started {
            if !self.players.is_empty() || !self.rounds.is_empty() {
                return Err(invalid("players or rounds present before the game started"));
            }
            return Ok(());
        }

        if self.players.len() < MIN_PLAYERS {
            return Err(SessionError::RosterTooSmall {
                count: self.players.len(),
                min: MIN_PLAYERS,
            });
        }

        let mut ids = HashSet::new();
        for (seat, player) in self.players.iter().enumerate() {
            validate_name(seat, &player.name)?;
            if !ids.insert(&player.id) {
                return Err(invalid(format!("duplicate player id {}", player.id)));
            }
        }

        for (n, round) in self.rounds.iter().enumerate() {
            let number = n + 1;
            if round.results.len() != self.players.len() {
                return Err(invalid(format!(
                    "round {} has {} results for {} players",
                    number,
                    round.results.len(),
                    self.players.len()
                )));
            }

            let mut seen = HashSet::new();
            for result in &round.results {
                if !ids.contains(&result.player_id) {
                    return Err(invalid(format!(
                        "round {} references unknown player {}",
                        number, result.player_id
                    )));
                }
                if !seen.insert(&result.player_id) {
                    return Err(invalid(format!(
                        "round {} has two results for {}",
                        number, result.player_id
                    )));
                }
                if !is_valid_prediction(result.prediction) || !is_valid_actual(result.actual) {
                    return Err(invalid(format!(
                        "round {} has hands out of range for {}",
                        number, result.player_id
                    )));
                }
                if !result.is_consistent() {
                    return Err(invalid(format!(
                        "round {} score for {} does not match its hands",
                        number, result.player_id
                    )));
                }
            }
        }

        if !is_chronological(&self.rounds) {
            return Err(invalid("round ids are not strictly increasing"));
        }

        for player in &self.players {
            if checked_total(player, &self.rounds).is_none() {
                return Err(invalid(format!("total for {} is out of range", player.id)));
            }
        }

        Ok(())
    }
}
