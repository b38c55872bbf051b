//! Leaderboard ordering.

use crate::player::Player;

/// One leaderboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    /// 1-based position on the leaderboard.
    pub rank: usize,
    /// Seat index into the session's player list.
    pub seat: usize,
    pub total: i32,
}

/// Players ordered by total, highest first; equal totals keep seat order.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut rows: Vec<(usize, i32)> = players
        .iter()
        .enumerate()
        .map(|(seat, p)| (seat, p.total_score))
        .collect();
    // Stable sort keeps seat order among ties.
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    rows.into_iter()
        .enumerate()
        .map(|(i, (seat, total))| Standing {
            rank: i + 1,
            seat,
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::build_roster;

    #[test]
    fn test_standings_sorted_desc_with_stable_ties() {
        let mut players = build_roster(&["A", "B", "C", "D"]).unwrap();
        for (p, t) in players.iter_mut().zip([50, -40, 62, 50]) {
            p.total_score = t;
        }

        let rows = standings(&players);
        let seats: Vec<usize> = rows.iter().map(|r| r.seat).collect();
        assert_eq!(seats, vec![2, 0, 3, 1]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].total, 62);
        assert_eq!(rows[3].rank, 4);
    }

    #[test]
    fn test_standings_empty() {
        assert!(standings(&[]).is_empty());
    }
}
