//! Round ledger - the ordered record of completed rounds
//!
//! The ledger is the ground truth for every total. It only grows by appending a
//! finished [`Round`] and only shrinks by dropping the most recent one.

use serde::{Deserialize, Serialize};

use crate::scoring::calculate_score;
use crate::types::{Outcome, PlayerId, RoundId};

/// One player's result within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub player_id: PlayerId,
    pub prediction: u8,
    pub actual: u8,
    #[serde(rename = "result")]
    pub outcome: Outcome,
    pub score: i32,
}

impl RoundResult {
    /// Build a result, deriving outcome and score from the hands.
    pub fn scored(player_id: PlayerId, prediction: u8, actual: u8) -> Self {
        let score = calculate_score(prediction, actual);
        Self {
            player_id,
            prediction,
            actual,
            outcome: score.outcome,
            score: score.points,
        }
    }

    /// Whether outcome and score are what the score rule gives for these hands.
    pub fn is_consistent(&self) -> bool {
        let expected = calculate_score(self.prediction, self.actual);
        expected.outcome == self.outcome && expected.points == self.score
    }
}

/// A completed round: one result per seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub results: Vec<RoundResult>,
}

impl Round {
    pub fn result_for(&self, player_id: &PlayerId) -> Option<&RoundResult> {
        self.results.iter().find(|r| &r.player_id == player_id)
    }

    /// The player's score this round, 0 if they have no result in it.
    pub fn score_for(&self, player_id: &PlayerId) -> i32 {
        self.result_for(player_id).map_or(0, |r| r.score)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundLedger {
    rounds: Vec<Round>,
}

impl RoundLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from rounds already in chronological order.
    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn last(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Round> {
        self.rounds.iter()
    }

    /// Number the next round will be shown with (1-based).
    pub fn next_round_number(&self) -> usize {
        self.rounds.len() + 1
    }

    /// Id for a round finalized at `now_ms`.
    pub fn next_round_id(&self, now_ms: u64) -> RoundId {
        match self.rounds.last() {
            Some(last) => last.id.next_after(now_ms),
            None => RoundId::new(now_ms),
        }
    }

    pub fn push(&mut self, round: Round) {
        self.rounds.push(round);
    }

    /// Remove and return the most recent round.
    pub fn pop_last(&mut self) -> Option<Round> {
        self.rounds.pop()
    }

    /// Sum of a player's round scores across the whole ledger, saturating at
    /// the `i32` bounds.
    pub fn score_sum(&self, player_id: &PlayerId) -> i32 {
        self.rounds
            .iter()
            .fold(0i32, |acc, r| acc.saturating_add(r.score_for(player_id)))
    }

    /// Sum of a player's round scores, `None` if it leaves `i32`.
    pub fn checked_score_sum(&self, player_id: &PlayerId) -> Option<i32> {
        checked_score_sum(&self.rounds, player_id)
    }

    /// Whether round ids are strictly increasing in ledger order.
    pub fn is_chronological(&self) -> bool {
        is_chronological(&self.rounds)
    }
}

/// Sum of a player's scores over `rounds`, `None` on `i32` overflow.
pub fn checked_score_sum(rounds: &[Round], player_id: &PlayerId) -> Option<i32> {
    rounds
        .iter()
        .try_fold(0i32, |acc, r| acc.checked_add(r.score_for(player_id)))
}

/// Whether round ids strictly increase along `rounds`.
pub fn is_chronological(rounds: &[Round]) -> bool {
    rounds.windows(2).all(|w| w[0].id < w[1].id)
}

impl<'a> IntoIterator for &'a RoundLedger {
    type Item = &'a Round;
    type IntoIter = std::slice::Iter<'a, Round>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.iter()
    }
}
