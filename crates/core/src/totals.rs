//! Total score projection.
//!
//! A player's total is always `ledger sum + base_score_offset`, recomputed from
//! the full ledger. Totals are never patched incrementally.
//!
//! Every total must fit in `i32`. The session rejects any change that would
//! break this, and snapshots that break it fail validation, so the saturating
//! [`project_total`] never actually saturates on a live session.

use crate::error::SessionError;
use crate::ledger::{checked_score_sum, Round, RoundLedger};
use crate::player::Player;
use crate::types::PlayerId;

/// Projected total for one player.
pub fn project_total(player: &Player, ledger: &RoundLedger) -> i32 {
    ledger
        .score_sum(&player.id)
        .saturating_add(player.base_score_offset)
}

/// Projected total over `rounds`, `None` if it does not fit in `i32`.
pub fn checked_total(player: &Player, rounds: &[Round]) -> Option<i32> {
    checked_score_sum(rounds, &player.id)?.checked_add(player.base_score_offset)
}

/// Fail with [`SessionError::ScoreOutOfRange`] for the first player whose
/// total over `rounds` does not fit in `i32`.
pub fn ensure_totals_fit(players: &[Player], rounds: &[Round]) -> Result<(), SessionError> {
    match players.iter().find(|p| checked_total(p, rounds).is_none()) {
        Some(p) => Err(SessionError::ScoreOutOfRange(p.id.clone())),
        None => Ok(()),
    }
}

/// Projected totals for all players, in seat order.
pub fn project_totals(players: &[Player], ledger: &RoundLedger) -> Vec<i32> {
    players.iter().map(|p| project_total(p, ledger)).collect()
}

/// Overwrite every player's cached `total_score` from the ledger.
pub fn refresh_totals(players: &mut [Player], ledger: &RoundLedger) {
    for player in players.iter_mut() {
        player.total_score = project_total(player, ledger);
    }
}

/// Offset that makes a player's projected total equal `requested`, `None` if
/// that offset does not fit in `i32`.
pub fn offset_for_total(player_id: &PlayerId, requested: i32, ledger: &RoundLedger) -> Option<i32> {
    requested.checked_sub(ledger.checked_score_sum(player_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Round, RoundResult};
    use crate::player::build_roster;
    use crate::types::RoundId;

    fn ledger_for(players: &[Player], hands: &[&[(u8, u8)]]) -> RoundLedger {
        let rounds = hands
            .iter()
            .enumerate()
            .map(|(i, row)| Round {
                id: RoundId::new(i as u64 + 1),
                results: players
                    .iter()
                    .zip(row.iter())
                    .map(|(p, &(pred, act))| RoundResult::scored(p.id.clone(), pred, act))
                    .collect(),
            })
            .collect();
        RoundLedger::from_rounds(rounds)
    }

    #[test]
    fn test_project_totals_sums_rounds() {
        let players = build_roster(&["A", "B"]).unwrap();
        let ledger = ledger_for(&players, &[&[(5, 5), (4, 3)], &[(3, 4), (2, 2)]]);
        assert_eq!(project_totals(&players, &ledger), vec![50 + 31, -40 + 20]);
    }

    #[test]
    fn test_offset_is_added() {
        let mut players = build_roster(&["A", "B"]).unwrap();
        let ledger = ledger_for(&players, &[&[(5, 5), (4, 3)]]);
        players[1].base_score_offset = 15;
        assert_eq!(project_total(&players[1], &ledger), -25);
    }

    #[test]
    fn test_offset_for_total_hits_request() {
        let mut players = build_roster(&["A", "B"]).unwrap();
        let ledger = ledger_for(&players, &[&[(12, 12), (2, 2)], &[(12, 12), (2, 2)]]);
        assert_eq!(project_total(&players[0], &ledger), 240);

        let offset = offset_for_total(&players[0].id, 260, &ledger).unwrap();
        assert_eq!(offset, 20);
        players[0].base_score_offset = offset;
        assert_eq!(project_total(&players[0], &ledger), 260);
    }

    #[test]
    fn test_refresh_overwrites_stale_totals() {
        let mut players = build_roster(&["A", "B"]).unwrap();
        players[0].total_score = 9999;
        let ledger = RoundLedger::new();
        refresh_totals(&mut players, &ledger);
        assert_eq!(players[0].total_score, 0);
    }

    #[test]
    fn test_offset_for_total_rejects_overflow() {
        let players = build_roster(&["A", "B"]).unwrap();
        let ledger = ledger_for(&players, &[&[(5, 3), (2, 2)]]);
        assert_eq!(offset_for_total(&players[0].id, i32::MAX, &ledger), None);
        assert_eq!(offset_for_total(&players[1].id, i32::MIN, &ledger), None);
        assert_eq!(offset_for_total(&players[1].id, i32::MAX, &ledger), Some(i32::MAX - 20));
    }

    #[test]
    fn test_totals_must_fit() {
        let mut players = build_roster(&["A", "B"]).unwrap();
        let ledger = ledger_for(&players, &[&[(5, 5), (2, 2)]]);
        assert!(ensure_totals_fit(&players, ledger.rounds()).is_ok());

        players[1].base_score_offset = i32::MAX;
        assert_eq!(checked_total(&players[1], ledger.rounds()), None);
        assert_eq!(
            ensure_totals_fit(&players, ledger.rounds()),
            Err(SessionError::ScoreOutOfRange(players[1].id.clone()))
        );
        assert_eq!(project_total(&players[1], &ledger), i32::MAX);
    }
}
