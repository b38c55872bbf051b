//! Game session - the scorekeeper state machine
//!
//! ```text
//! NotStarted --start--> InProgress --winner found--> Won
//!      ^                    |  ^                      |
//!      |                    |  +-------undo-----------+
//!      +------restart-------+-------------------------+
//! ```
//!
//! Every transition is all-or-nothing: it validates first, then mutates, then
//! recomputes totals and the winner from the ledger. A rejected transition
//! returns a [`SessionError`] and leaves the session untouched.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::capture::RoundCapture;
use crate::error::SessionError;
use crate::ledger::{Round, RoundLedger};
use crate::player::{build_roster, Player};
use crate::scoring::ScoreResult;
use crate::snapshot::{SessionSnapshot, SNAPSHOT_VERSION};
use crate::standings::{standings, Standing};
use crate::totals::{ensure_totals_fit, offset_for_total, project_totals, refresh_totals};
use crate::types::{PlayerId, ResultShortcut, RoundId, DEFAULT_TARGET_SCORE};
use crate::winner::find_winner_player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    /// Still in progress, but some player has reached the target.
    Won,
}

/// One-shot winner notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    pub player_id: PlayerId,
    pub name: String,
    pub total: i32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    players: Vec<Player>,
    ledger: RoundLedger,
    target_score: i32,
    /// Seat index of the winner, recomputed after every change.
    winner: Option<usize>,
    started: bool,
    /// Entries for the round being played (not persisted).
    capture: RoundCapture,
    /// Pending celebration (consumed by the presentation layer).
    celebration: Option<Celebration>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl GameSession {
    /// Create an empty, not-started session
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            ledger: RoundLedger::new(),
            target_score: DEFAULT_TARGET_SCORE,
            winner: None,
            started: false,
            capture: RoundCapture::default(),
            celebration: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.started, self.winner) {
            (false, _) => SessionPhase::NotStarted,
            (true, None) => SessionPhase::InProgress,
            (true, Some(_)) => SessionPhase::Won,
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    pub fn seat_of(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == player_id)
    }

    pub fn target_score(&self) -> i32 {
        self.target_score
    }

    pub fn ledger(&self) -> &RoundLedger {
        &self.ledger
    }

    /// Completed rounds, oldest first.
    pub fn rounds(&self) -> &[Round] {
        self.ledger.rounds()
    }

    pub fn capture(&self) -> &RoundCapture {
        &self.capture
    }

    /// Current totals in seat order, projected from the ledger.
    pub fn totals(&self) -> Vec<i32> {
        project_totals(&self.players, &self.ledger)
    }

    pub fn winner_seat(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|seat| self.players.get(seat))
    }

    pub fn standings(&self) -> Vec<Standing> {
        standings(&self.players)
    }

    /// 1-based number of the round being captured.
    pub fn current_round_number(&self) -> usize {
        self.ledger.next_round_number()
    }

    pub fn can_complete_round(&self) -> bool {
        self.started && self.capture.is_complete()
    }

    pub fn pending_celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    /// Take the pending celebration, if any. Returns it at most once per win.
    pub fn take_celebration(&mut self) -> Option<Celebration> {
        self.celebration.take()
    }

    fn ensure_started(&self) -> Result<(), SessionError> {
        if self.started {
            Ok(())
        } else {
            Err(SessionError::NotStarted)
        }
    }

    /// Start a session with players seated in `names` order.
    pub fn start<S: AsRef<str>>(&mut self, names: &[S], target_score: i32) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        if target_score <= 0 {
            return Err(SessionError::InvalidTargetScore(target_score));
        }
        let players = build_roster(names)?;

        self.capture = RoundCapture::for_players(&players);
        self.players = players;
        self.ledger = RoundLedger::new();
        self.target_score = target_score;
        self.winner = None;
        self.celebration = None;
        self.started = true;

        log::info!(
            "session started: {} players, target {}",
            self.players.len(),
            self.target_score
        );
        Ok(())
    }

    pub fn record_prediction(&mut self, player_id: &PlayerId, value: u8) -> Result<(), SessionError> {
        self.ensure_started()?;
        self.capture.set_prediction(player_id, value)?;
        log::debug!("prediction {} = {}", player_id, value);
        Ok(())
    }

    pub fn clear_prediction(&mut self, player_id: &PlayerId) -> Result<(), SessionError> {
        self.ensure_started()?;
        self.capture.clear_prediction(player_id)
    }

    /// Record an exact or missed result for the current round.
    pub fn record_shortcut_result(
        &mut self,
        player_id: &PlayerId,
        shortcut: ResultShortcut,
    ) -> Result<ScoreResult, SessionError> {
        self.ensure_started()?;
        let score = self.capture.record_shortcut(player_id, shortcut)?;
        log::debug!("result {} {} ({:+})", player_id, score.outcome, score.points);
        Ok(score)
    }

    /// Record an over result with the hands actually won.
    pub fn record_over_result(&mut self, player_id: &PlayerId, actual: u8) -> Result<ScoreResult, SessionError> {
        self.ensure_started()?;
        let score = self.capture.record_over(player_id, actual)?;
        log::debug!("result {} over {} ({:+})", player_id, actual, score.points);
        Ok(score)
    }

    /// Finalize the captured round, stamped with the current wall clock.
    pub fn complete_round(&mut self) -> Result<RoundId, SessionError> {
        self.complete_round_at(now_ms())
    }

    /// Finalize the captured round as if the clock read `now_ms`.
    pub fn complete_round_at(&mut self, now_ms: u64) -> Result<RoundId, SessionError> {
        self.ensure_started()?;
        let id = self.ledger.next_round_id(now_ms);
        let round = self.capture.to_round(id)?;

        self.ledger.push(round);
        if let Err(e) = ensure_totals_fit(&self.players, self.ledger.rounds()) {
            self.ledger.pop_last();
            return Err(e);
        }
        self.capture.reset();
        self.recompute();

        log::info!(
            "round {} completed (id {}), totals {:?}",
            self.ledger.len(),
            id,
            self.totals()
        );
        Ok(id)
    }

    /// Remove the most recent round and return it.
    pub fn undo_last_round(&mut self) -> Result<Round, SessionError> {
        self.ensure_started()?;
        let round = self.ledger.pop_last().ok_or(SessionError::EmptyLedger)?;
        if let Err(e) = ensure_totals_fit(&self.players, self.ledger.rounds()) {
            self.ledger.push(round);
            return Err(e);
        }
        self.recompute();

        log::info!("round {} undone, totals {:?}", round.id, self.totals());
        Ok(round)
    }

    /// Set displayed totals by adjusting each listed player's offset.
    ///
    /// Unlisted players keep their totals; the ledger is not touched. Any
    /// unknown player id, or a total whose offset does not fit in `i32`,
    /// rejects the whole edit.
    pub fn edit_scores<I>(&mut self, requested: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = (PlayerId, i32)>,
    {
        self.ensure_started()?;

        let mut offsets = Vec::new();
        for (player_id, total) in requested {
            let seat = self
                .seat_of(&player_id)
                .ok_or_else(|| SessionError::UnknownPlayer(player_id.clone()))?;
            let offset = offset_for_total(&player_id, total, &self.ledger)
                .ok_or_else(|| SessionError::ScoreOutOfRange(player_id.clone()))?;
            offsets.push((seat, offset));
        }

        for (seat, offset) in offsets {
            self.players[seat].base_score_offset = offset;
        }
        self.recompute();

        log::info!("scores edited, totals {:?}", self.totals());
        Ok(())
    }

    /// Discard players and rounds and return to the not-started state.
    pub fn restart(&mut self) {
        *self = Self::new();
        log::info!("session restarted");
    }

    /// Recompute cached totals and the winner from the ledger.
    fn recompute(&mut self) {
        refresh_totals(&mut self.players, &self.ledger);
        let winner = find_winner_player(&self.players, self.target_score);

        if winner != self.winner {
            self.celebration = winner.map(|seat| {
                let p = &self.players[seat];
                log::info!("{} reached the target with {}", p.name, p.total_score);
                Celebration {
                    player_id: p.id.clone(),
                    name: p.name.clone(),
                    total: p.total_score,
                }
            });
        }
        self.winner = winner;
    }

    /// Persistable view of the session (the capture buffer is left out).
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            players: self.players.clone(),
            rounds: self.ledger.rounds().to_vec(),
            target_score: self.target_score,
            game_started: self.started,
            winner: self.winner().map(|p| p.id.clone()),
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// Totals and the winner are recomputed; the stored values are ignored.
    /// No celebration is pending after a restore.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, SessionError> {
        snapshot.validate()?;

        let mut session = Self {
            capture: RoundCapture::for_players(&snapshot.players),
            players: snapshot.players,
            ledger: RoundLedger::from_rounds(snapshot.rounds),
            target_score: snapshot.target_score,
            winner: None,
            started: snapshot.game_started,
            celebration: None,
        };
        refresh_totals(&mut session.players, &session.ledger);
        session.winner = find_winner_player(&session.players, session.target_score);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, DEFAULT_PLAYER_COUNT};

    fn seat(i: usize) -> PlayerId {
        PlayerId::from_seat(i)
    }

    fn started(target: i32) -> GameSession {
        let mut s = GameSession::new();
        s.start(&["A", "B", "C", "D"], target).unwrap();
        s
    }

    /// Record `prediction` and an exact/missed result for every seat.
    fn play(s: &mut GameSession, entries: &[(u8, Outcome, u8)], at: u64) -> RoundId {
        for (i, &(prediction, outcome, actual)) in entries.iter().enumerate() {
            s.record_prediction(&seat(i), prediction).unwrap();
            let recorded = match outcome {
                Outcome::Exact => s.record_shortcut_result(&seat(i), ResultShortcut::Exact),
                Outcome::Missed => s.record_shortcut_result(&seat(i), ResultShortcut::Missed),
                Outcome::Over => s.record_over_result(&seat(i), actual),
            };
            recorded.unwrap();
        }
        s.complete_round_at(at).unwrap()
    }

    #[test]
    fn test_new_session_not_started() {
        let s = GameSession::new();
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        assert_eq!(s.target_score(), DEFAULT_TARGET_SCORE);
        assert!(s.players().is_empty());
        assert!(s.winner().is_none());
    }

    #[test]
    fn test_start_transitions_to_in_progress() {
        let s = started(300);
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.players().len(), DEFAULT_PLAYER_COUNT);
        assert_eq!(s.totals(), vec![0, 0, 0, 0]);
        assert_eq!(s.capture().entries().len(), 4);
        assert_eq!(s.current_round_number(), 1);
    }

    #[test]
    fn test_start_rejections_leave_state() {
        let mut s = GameSession::new();
        assert_eq!(
            s.start(&["A", ""], 250),
            Err(SessionError::BlankPlayerName { seat: 1 })
        );
        assert_eq!(s.start(&["A", "B"], 0), Err(SessionError::InvalidTargetScore(0)));
        assert_eq!(s.phase(), SessionPhase::NotStarted);

        let mut s = started(250);
        assert_eq!(s.start(&["X", "Y"], 250), Err(SessionError::AlreadyStarted));
        assert_eq!(s.players()[0].name, "A");
    }

    #[test]
    fn test_operations_require_started_session() {
        let mut s = GameSession::new();
        assert_eq!(s.record_prediction(&seat(0), 5), Err(SessionError::NotStarted));
        assert_eq!(s.complete_round(), Err(SessionError::NotStarted));
        assert_eq!(s.undo_last_round(), Err(SessionError::NotStarted));
        assert_eq!(s.edit_scores(vec![(seat(0), 10)]), Err(SessionError::NotStarted));
    }

    #[test]
    fn test_complete_incomplete_round_rejected() {
        let mut s = started(250);
        s.record_prediction(&seat(0), 5).unwrap();
        s.record_shortcut_result(&seat(0), ResultShortcut::Exact).unwrap();

        assert_eq!(
            s.complete_round_at(1),
            Err(SessionError::IncompleteRound { pending: 3 })
        );
        assert!(s.rounds().is_empty());
        // The partial capture survives the rejection.
        assert!(s.capture().entry(&seat(0)).unwrap().is_complete());
    }

    #[test]
    fn test_complete_resets_capture_and_totals() {
        let mut s = started(250);
        play(
            &mut s,
            &[
                (5, Outcome::Exact, 5),
                (4, Outcome::Missed, 0),
                (6, Outcome::Over, 8),
                (3, Outcome::Missed, 0),
            ],
            1_000,
        );

        assert_eq!(s.totals(), vec![50, -40, 62, -30]);
        assert_eq!(s.players()[2].total_score, 62);
        assert!(s.winner().is_none());
        assert!(s.capture().entries().iter().all(|e| e.prediction.is_none()));
        assert_eq!(s.current_round_number(), 2);
    }

    #[test]
    fn test_round_ids_strictly_increase() {
        let mut s = started(10_000);
        let row = [(2, Outcome::Exact, 2); 4];
        let a = play(&mut s, &row, 5_000);
        let b = play(&mut s, &row, 5_000);
        let c = play(&mut s, &row, 4_000);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_undo_empty_ledger_rejected() {
        let mut s = started(250);
        assert_eq!(s.undo_last_round(), Err(SessionError::EmptyLedger));
    }

    #[test]
    fn test_undo_past_win_clears_winner_and_celebration() {
        let mut s = started(100);
        let row = [
            (13, Outcome::Exact, 13),
            (2, Outcome::Exact, 2),
            (2, Outcome::Exact, 2),
            (2, Outcome::Exact, 2),
        ];
        play(&mut s, &row, 1);
        assert_eq!(s.phase(), SessionPhase::Won);
        assert_eq!(s.winner().map(|p| p.name.as_str()), Some("A"));
        assert!(s.pending_celebration().is_some());

        s.undo_last_round().unwrap();
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert!(s.winner().is_none());
        assert!(s.pending_celebration().is_none());
    }

    #[test]
    fn test_celebration_fires_once() {
        let mut s = started(100);
        let win = [
            (13, Outcome::Exact, 13),
            (2, Outcome::Exact, 2),
            (2, Outcome::Exact, 2),
            (2, Outcome::Exact, 2),
        ];
        play(&mut s, &win, 1);

        let c = s.take_celebration().unwrap();
        assert_eq!(c.player_id, seat(0));
        assert_eq!(c.total, 130);
        assert!(s.take_celebration().is_none());

        // Same winner after another round: no new signal.
        play(&mut s, &win, 2);
        assert!(s.take_celebration().is_none());

        // Undo both rounds, then win again: the signal is re-armed.
        s.undo_last_round().unwrap();
        s.undo_last_round().unwrap();
        play(&mut s, &win, 3);
        assert!(s.take_celebration().is_some());
    }

    #[test]
    fn test_edit_scores_sets_offsets() {
        let mut s = started(250);
        s.edit_scores(vec![(seat(1), 75)]).unwrap();
        assert_eq!(s.totals(), vec![0, 75, 0, 0]);
        assert_eq!(s.players()[1].base_score_offset, 75);
        assert_eq!(s.rounds().len(), 0);
    }

    #[test]
    fn test_edit_scores_unknown_player_is_atomic() {
        let mut s = started(250);
        let result = s.edit_scores(vec![(seat(0), 40), (PlayerId::new("ghost"), 10)]);
        assert_eq!(result, Err(SessionError::UnknownPlayer(PlayerId::new("ghost"))));
        assert_eq!(s.totals(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_edit_scores_can_declare_winner() {
        let mut s = started(250);
        s.edit_scores(vec![(seat(3), 250)]).unwrap();
        assert_eq!(s.winner_seat(), Some(3));
        assert!(s.take_celebration().is_some());
    }

    #[test]
    fn test_restart_returns_to_default() {
        let mut s = started(500);
        play(&mut s, &[(3, Outcome::Exact, 3); 4], 1);
        s.restart();
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        assert!(s.players().is_empty());
        assert!(s.rounds().is_empty());
        assert_eq!(s.target_score(), DEFAULT_TARGET_SCORE);
        assert!(s.start(&["A", "B"], 250).is_ok());
    }

    #[test]
    fn test_snapshot_restore_recomputes() {
        let mut s = started(250);
        play(&mut s, &[(12, Outcome::Exact, 12); 4], 1);
        s.edit_scores(vec![(seat(1), 200)]).unwrap();

        let mut snap = s.snapshot();
        // Stored totals and winner are not trusted.
        snap.players[0].total_score = 9_000;
        snap.winner = Some(seat(0));

        let restored = GameSession::from_snapshot(snap).unwrap();
        assert_eq!(restored.totals(), vec![120, 200, 120, 120]);
        assert_eq!(restored.players()[0].total_score, 120);
        assert!(restored.winner().is_none());
        assert!(restored.pending_celebration().is_none());
        assert_eq!(restored.capture().entries().len(), 4);
    }

    #[test]
    fn test_snapshot_of_default_restores_not_started() {
        let snap = GameSession::new().snapshot();
        let restored = GameSession::from_snapshot(snap).unwrap();
        assert_eq!(restored.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_edit_scores_offset_overflow_is_rejected() {
        let mut s = GameSession::new();
        s.start(&["A", "B"], 250).unwrap();
        play(&mut s, &[(5, Outcome::Missed, 0), (5, Outcome::Missed, 0)], 1);

        assert_eq!(
            s.edit_scores(vec![(seat(1), 30), (seat(0), i32::MAX)]),
            Err(SessionError::ScoreOutOfRange(seat(0)))
        );
        assert_eq!(s.totals(), vec![-50, -50]);
        assert_eq!(s.players()[1].base_score_offset, 0);
    }

    #[test]
    fn test_round_that_overflows_a_total_is_rejected() {
        let mut s = GameSession::new();
        s.start(&["A", "B"], 250).unwrap();
        s.edit_scores(vec![(seat(0), i32::MAX - 10)]).unwrap();
        s.take_celebration();

        s.record_prediction(&seat(0), 2).unwrap();
        s.record_shortcut_result(&seat(0), ResultShortcut::Exact).unwrap();
        s.record_prediction(&seat(1), 2).unwrap();
        s.record_shortcut_result(&seat(1), ResultShortcut::Exact).unwrap();

        assert_eq!(s.complete_round_at(1), Err(SessionError::ScoreOutOfRange(seat(0))));
        assert!(s.rounds().is_empty());
        assert_eq!(s.totals()[0], i32::MAX - 10);
        // The captured round is kept so it can be corrected.
        assert!(s.capture().is_complete());
    }

    #[test]
    fn test_undo_that_overflows_a_total_is_rejected() {
        let mut s = GameSession::new();
        s.start(&["A", "B"], 250).unwrap();
        play(&mut s, &[(13, Outcome::Exact, 13), (2, Outcome::Exact, 2)], 1);
        play(&mut s, &[(13, Outcome::Missed, 0), (2, Outcome::Exact, 2)], 2);
        s.edit_scores(vec![(seat(0), i32::MAX - 5)]).unwrap();

        // Dropping the -130 round would push A past i32::MAX.
        assert_eq!(s.undo_last_round(), Err(SessionError::ScoreOutOfRange(seat(0))));
        assert_eq!(s.rounds().len(), 2);
        assert_eq!(s.totals()[0], i32::MAX - 5);
    }
}
