//! Standings-seeded pairing for the ranking-adaptive format.

use std::collections::BTreeSet;

use crate::standings::compute_stats;
use crate::tournament::{Match, MatchupStyle, PlayerIndex, Team, Tournament};

/// Active players in current ranking order.
pub fn ranked_active(t: &Tournament, active: &[PlayerIndex]) -> Vec<PlayerIndex> {
    let active: BTreeSet<PlayerIndex> = active.iter().copied().collect();
    compute_stats(t, None)
        .ranked_players()
        .into_iter()
        .filter(|p| active.contains(p))
        .collect()
}

/// Cut the ranked players into blocks of four and split every block by
/// `style`.
pub fn pair_players(t: &Tournament, active: &[PlayerIndex], style: MatchupStyle) -> Vec<Match> {
    ranked_active(t, active)
        .chunks_exact(4)
        .map(|block| {
            let (team1, team2) = style.split([block[0], block[1], block[2], block[3]]);
            Match::new(team1, team2)
        })
        .collect()
}

/// Order fixed teams by their best-ranked member and match neighbours.
pub fn pair_teams(t: &Tournament, teams: &[Team]) -> Vec<Match> {
    let order = compute_stats(t, None).ranked_players();
    let position = |p: PlayerIndex| order.iter().position(|&q| q == p).unwrap_or(usize::MAX);

    let mut seeded = teams.to_vec();
    seeded.sort_by_key(|team| position(team[0]).min(position(team[1])));
    seeded
        .chunks_exact(2)
        .map(|pair| Match::new(pair[0], pair[1]))
        .collect()
}
