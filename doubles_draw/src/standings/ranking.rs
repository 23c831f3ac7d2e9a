//! Ordering and competition ranks of standings.

use std::cmp::Ordering;

use super::stats::PlayerStanding;

/// Tolerance for the per-game and win-rate comparisons.
pub const EPSILON: f64 = 0.001;

fn compare_desc_epsilon(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < EPSILON {
        Ordering::Equal
    } else if a > b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Compare on the numeric criteria only, better first:
/// points per game, win rate, total points with sitting, wins, draws.
///
/// `Equal` here means the two players share a rank.
pub fn compare_performance(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    compare_desc_epsilon(a.points_per_game, b.points_per_game)
        .then_with(|| compare_desc_epsilon(a.win_rate, b.win_rate))
        .then_with(|| b.total_points_with_sitting.cmp(&a.total_points_with_sitting))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.draws.cmp(&a.draws))
}

/// Full ordering: performance, then name ascending.
pub fn compare_standings(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    compare_performance(a, b).then_with(|| a.name.cmp(&b.name))
}

/// Sort standings best first and assign competition ranks (1, 2, 2, 4).
pub fn rank_standings(standings: &mut [PlayerStanding]) {
    // Epsilon comparison is not transitive, which `sort_by` may reject.
    for i in 1..standings.len() {
        let mut j = i;
        while j > 0 && compare_standings(&standings[j - 1], &standings[j]) == Ordering::Greater {
            standings.swap(j - 1, j);
            j -= 1;
        }
    }

    for i in 0..standings.len() {
        standings[i].rank = if i > 0
            && compare_performance(&standings[i - 1], &standings[i]) == Ordering::Equal
        {
            standings[i - 1].rank
        } else {
            i + 1
        };
    }
}
