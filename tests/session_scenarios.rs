//! End-to-end session scenarios through the facade crate.

use madani_estimation::core::{
    project_total, GameSession, Round, RoundLedger, RoundResult, SessionError, SessionPhase,
};
use madani_estimation::types::{Outcome, PlayerId, ResultShortcut, RoundId};

fn seat(i: usize) -> PlayerId {
    PlayerId::from_seat(i)
}

fn four_players(target: i32) -> GameSession {
    let mut s = GameSession::new();
    s.start(&["A", "B", "C", "D"], target).unwrap();
    s
}

fn exact_round(s: &mut GameSession, predictions: [u8; 4], at: u64) {
    for (i, p) in predictions.into_iter().enumerate() {
        s.record_prediction(&seat(i), p).unwrap();
        s.record_shortcut_result(&seat(i), ResultShortcut::Exact).unwrap();
    }
    s.complete_round_at(at).unwrap();
}

#[test]
fn test_first_round_then_undo() {
    let mut s = four_players(250);

    s.record_prediction(&seat(0), 5).unwrap();
    s.record_shortcut_result(&seat(0), ResultShortcut::Exact).unwrap();
    s.record_prediction(&seat(1), 4).unwrap();
    s.record_shortcut_result(&seat(1), ResultShortcut::Missed).unwrap();
    s.record_prediction(&seat(2), 6).unwrap();
    s.record_over_result(&seat(2), 8).unwrap();
    s.record_prediction(&seat(3), 3).unwrap();
    s.record_shortcut_result(&seat(3), ResultShortcut::Missed).unwrap();
    s.complete_round().unwrap();

    assert_eq!(s.totals(), vec![50, -40, 62, -30]);
    assert!(s.winner().is_none());

    let round = &s.rounds()[0];
    let c = round.result_for(&seat(2)).unwrap();
    assert_eq!((c.prediction, c.actual, c.outcome, c.score), (6, 8, Outcome::Over, 62));

    s.undo_last_round().unwrap();
    assert_eq!(s.totals(), vec![0, 0, 0, 0]);
    assert!(s.rounds().is_empty());
}

#[test]
fn test_missed_at_minimum_prediction_floors_actual() {
    let mut s = four_players(250);
    s.record_prediction(&seat(0), 2).unwrap();
    let score = s
        .record_shortcut_result(&seat(0), ResultShortcut::Missed)
        .unwrap();
    assert_eq!(score.points, -20);
    assert_eq!(score.outcome, Outcome::Missed);

    let captured = s.capture().entry(&seat(0)).unwrap().result.unwrap();
    assert_eq!(captured.actual, 1);
}

#[test]
fn test_edit_to_reach_target() {
    let mut s = four_players(250);
    exact_round(&mut s, [12, 2, 2, 2], 1);
    exact_round(&mut s, [12, 2, 2, 2], 2);
    assert_eq!(s.totals()[0], 240);
    assert_eq!(s.phase(), SessionPhase::InProgress);

    s.edit_scores(vec![(seat(0), 260)]).unwrap();
    assert_eq!(s.players()[0].base_score_offset, 20);
    assert_eq!(s.totals()[0], 260);
    assert_eq!(s.winner().map(|p| p.id.clone()), Some(seat(0)));

    let c = s.take_celebration().unwrap();
    assert_eq!((c.name.as_str(), c.total), ("A", 260));
    assert!(s.take_celebration().is_none());

    // The offset is carried into later rounds.
    exact_round(&mut s, [2, 2, 2, 2], 3);
    assert_eq!(s.totals()[0], 280);
    assert!(s.take_celebration().is_none());
}

#[test]
fn test_zero_score_round_keeps_edited_total() {
    let mut s = four_players(250);
    exact_round(&mut s, [12, 2, 2, 2], 1);
    exact_round(&mut s, [12, 2, 2, 2], 2);
    s.edit_scores(vec![(seat(0), 260)]).unwrap();

    let a = s.players()[0].clone();
    let mut ledger = RoundLedger::from_rounds(s.rounds().to_vec());
    ledger.push(Round {
        id: RoundId::new(3),
        results: vec![RoundResult {
            player_id: a.id.clone(),
            prediction: 2,
            actual: 2,
            outcome: Outcome::Exact,
            score: 0,
        }],
    });
    assert_eq!(project_total(&a, &ledger), 260);
}

#[test]
fn test_rejections_leave_session_unchanged() {
    let mut s = four_players(250);
    exact_round(&mut s, [3, 3, 3, 3], 1);
    let before = s.snapshot();

    assert_eq!(
        s.record_prediction(&seat(0), 1),
        Err(SessionError::PredictionOutOfRange(1))
    );
    assert_eq!(
        s.record_shortcut_result(&seat(1), ResultShortcut::Exact),
        Err(SessionError::MissingPrediction(seat(1)))
    );
    s.record_prediction(&seat(2), 13).unwrap();
    assert_eq!(
        s.record_over_result(&seat(2), 14),
        Err(SessionError::OverActualOutOfRange {
            prediction: 13,
            actual: 14
        })
    );
    assert!(matches!(
        s.complete_round(),
        Err(SessionError::IncompleteRound { .. })
    ));
    assert!(s.edit_scores(vec![(PlayerId::new("nobody"), 5)]).is_err());

    assert_eq!(s.snapshot(), before);
}

#[test]
fn test_changing_prediction_discards_result() {
    let mut s = four_players(250);
    s.record_prediction(&seat(0), 5).unwrap();
    s.record_shortcut_result(&seat(0), ResultShortcut::Exact).unwrap();

    s.record_prediction(&seat(0), 5).unwrap();
    assert!(s.capture().entry(&seat(0)).unwrap().result.is_some());

    s.record_prediction(&seat(0), 6).unwrap();
    assert!(s.capture().entry(&seat(0)).unwrap().result.is_none());
}

#[test]
fn test_full_game_to_win_and_restart() {
    let mut s = four_players(300);
    let mut at = 10;
    while s.winner().is_none() {
        exact_round(&mut s, [13, 2, 3, 4], at);
        at += 1;
    }
    assert_eq!(s.rounds().len(), 3);
    assert_eq!(s.winner().map(|p| p.name.as_str()), Some("A"));
    assert_eq!(s.standings()[0].seat, 0);

    s.restart();
    assert_eq!(s.phase(), SessionPhase::NotStarted);
    assert!(s.rounds().is_empty());
}
