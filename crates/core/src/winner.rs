//! Winner detection.

use crate::player::Player;

/// Seat index of the first total that reached `target_score`.
///
/// Seat order breaks ties: when several players cross the target in the same
/// recomputation the lowest seat wins, whatever the scores.
pub fn find_winner<I>(totals: I, target_score: i32) -> Option<usize>
where
    I: IntoIterator<Item = i32>,
{
    totals.into_iter().position(|total| total >= target_score)
}

/// [`find_winner`] over the players' cached totals.
pub fn find_winner_player(players: &[Player], target_score: i32) -> Option<usize> {
    find_winner(players.iter().map(|p| p.total_score), target_score)
}
