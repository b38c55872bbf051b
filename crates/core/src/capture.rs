//! Round capture - per-player entry buffer for the round being played
//!
//! A prediction must exist before any result can be recorded. Results come in
//! through the exact/missed shortcuts or through an explicit over actual, and
//! all three end up in [`calculate_score`]. Only a fully captured buffer can be
//! finalized into a [`Round`].

use crate::error::SessionError;
use crate::ledger::{Round, RoundResult};
use crate::player::Player;
use crate::scoring::{calculate_score, shortcut_actual, ScoreResult};
use crate::types::{is_valid_prediction, PlayerId, ResultShortcut, RoundId, MAX_HANDS};

/// A captured result for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedResult {
    pub actual: u8,
    pub score: ScoreResult,
}

/// One player's slot in the capture buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEntry {
    pub player_id: PlayerId,
    pub prediction: Option<u8>,
    pub result: Option<CapturedResult>,
}

impl CaptureEntry {
    fn empty(player_id: PlayerId) -> Self {
        Self {
            player_id,
            prediction: None,
            result: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.prediction.is_some() && self.result.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundCapture {
    entries: Vec<CaptureEntry>,
}

impl RoundCapture {
    /// Empty buffer with one unset slot per player, in seat order.
    pub fn for_players(players: &[Player]) -> Self {
        Self {
            entries: players
                .iter()
                .map(|p| CaptureEntry::empty(p.id.clone()))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[CaptureEntry] {
        &self.entries
    }

    pub fn entry(&self, player_id: &PlayerId) -> Option<&CaptureEntry> {
        self.entries.iter().find(|e| &e.player_id == player_id)
    }

    fn entry_mut(&mut self, player_id: &PlayerId) -> Result<&mut CaptureEntry, SessionError> {
        self.entries
            .iter_mut()
            .find(|e| &e.player_id == player_id)
            .ok_or_else(|| SessionError::UnknownPlayer(player_id.clone()))
    }

    /// Set a player's prediction.
    ///
    /// A different prediction discards any result already captured for the
    /// player, since that result was derived from the old prediction.
    pub fn set_prediction(&mut self, player_id: &PlayerId, value: u8) -> Result<(), SessionError> {
        if !is_valid_prediction(value) {
            return Err(SessionError::PredictionOutOfRange(value));
        }
        let entry = self.entry_mut(player_id)?;
        if entry.prediction != Some(value) {
            entry.result = None;
        }
        entry.prediction = Some(value);
        Ok(())
    }

    /// Unset a player's prediction together with its result.
    pub fn clear_prediction(&mut self, player_id: &PlayerId) -> Result<(), SessionError> {
        let entry = self.entry_mut(player_id)?;
        entry.prediction = None;
        entry.result = None;
        Ok(())
    }

    /// Record an exact or missed result.
    pub fn record_shortcut(
        &mut self,
        player_id: &PlayerId,
        shortcut: ResultShortcut,
    ) -> Result<ScoreResult, SessionError> {
        let entry = self.entry_mut(player_id)?;
        let prediction = entry
            .prediction
            .ok_or_else(|| SessionError::MissingPrediction(player_id.clone()))?;

        let actual = shortcut_actual(prediction, shortcut);
        let score = calculate_score(prediction, actual);
        entry.result = Some(CapturedResult { actual, score });
        Ok(score)
    }

    /// Record an over result; `actual` must be in `(prediction, 13]`.
    pub fn record_over(&mut self, player_id: &PlayerId, actual: u8) -> Result<ScoreResult, SessionError> {
        let entry = self.entry_mut(player_id)?;
        let prediction = entry
            .prediction
            .ok_or_else(|| SessionError::MissingPrediction(player_id.clone()))?;

        if actual <= prediction || actual > MAX_HANDS {
            return Err(SessionError::OverActualOutOfRange { prediction, actual });
        }

        let score = calculate_score(prediction, actual);
        entry.result = Some(CapturedResult { actual, score });
        Ok(score)
    }

    /// Players still missing a prediction or a result.
    pub fn pending_players(&self) -> impl Iterator<Item = &PlayerId> + '_ {
        self.entries
            .iter()
            .filter(|e| !e.is_complete())
            .map(|e| &e.player_id)
    }

    pub fn is_complete(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(CaptureEntry::is_complete)
    }

    /// Build the finished round without touching the buffer.
    pub fn to_round(&self, id: RoundId) -> Result<Round, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::IncompleteRound {
                pending: self.pending_players().count().max(1),
            });
        }

        let results = self
            .entries
            .iter()
            .filter_map(|e| match (e.prediction, e.result) {
                (Some(prediction), Some(result)) => Some(RoundResult {
                    player_id: e.player_id.clone(),
                    prediction,
                    actual: result.actual,
                    outcome: result.score.outcome,
                    score: result.score.points,
                }),
                _ => None,
            })
            .collect();

        Ok(Round { id, results })
    }

    /// Unset every slot, keeping the seats.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.prediction = None;
            entry.result = None;
        }
    }
}
