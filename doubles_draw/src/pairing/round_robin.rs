//! Diversity-maximising pairing for round-robin rounds.
//!
//! Each attempt shuffles the active players, then greedily gives the first
//! unpaired player the partner they played with least, and the first
//! unmatched team the opponents it faced least. The cheapest of a number of
//! attempts wins, where any repeated partnership costs more than any number
//! of repeated opponents.

use log::debug;
use rand::{Rng, seq::SliceRandom};

use super::history::{History, RepeatCost};
use crate::tournament::{Match, PlayerIndex, Team};

/// Randomised restarts of the greedy pass.
pub const ATTEMPTS: usize = 64;

/// Pair up `units` in order: the first unpaired unit takes the cheapest of
/// the rest, the first one found on ties. An odd unit out is dropped.
fn pair_greedy<U, F>(units: &[U], cost: F) -> Vec<(U, U)>
where
    U: Copy,
    F: Fn(U, U) -> u32,
{
    let mut pool = units.to_vec();
    let mut pairs = Vec::with_capacity(pool.len() / 2);
    while pool.len() >= 2 {
        let first = pool.remove(0);
        let mut best = 0;
        for (i, &candidate) in pool.iter().enumerate().skip(1) {
            if cost(first, candidate) < cost(first, pool[best]) {
                best = i;
            }
        }
        pairs.push((first, pool.remove(best)));
    }
    pairs
}

fn search<R, B, C>(rng: &mut R, mut build: B, cost_of: C) -> Vec<Match>
where
    R: Rng + ?Sized,
    B: FnMut(&mut R) -> Vec<Match>,
    C: Fn(&[Match]) -> RepeatCost,
{
    let mut best: Option<(RepeatCost, Vec<Match>)> = None;
    for _ in 0..ATTEMPTS {
        let round = build(rng);
        let cost = cost_of(&round);
        if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
            best = Some((cost, round));
        }
        if cost == RepeatCost::ZERO {
            break;
        }
    }

    match best {
        Some((cost, round)) => {
            debug!(
                "Round-robin pairing: {} repeated partners, {} repeated opponents",
                cost.partners, cost.opponents
            );
            round
        }
        None => Vec::new(),
    }
}

/// Pair individual players into fresh teams and matches.
pub fn pair_players<R: Rng + ?Sized>(
    active: &[PlayerIndex],
    history: &History,
    rng: &mut R,
) -> Vec<Match> {
    search(
        rng,
        |rng| {
            let mut pool = active.to_vec();
            pool.shuffle(rng);
            let teams: Vec<Team> = pair_greedy(&pool, |a, b| history.partner_count(a, b))
                .into_iter()
                .map(|(a, b)| [a, b])
                .collect();
            pair_greedy(&teams, |a, b| history.team_opponent_cost(a, b))
                .into_iter()
                .map(|(team1, team2)| Match::new(team1, team2))
                .collect()
        },
        |round| history.round_cost(round),
    )
}

/// Match fixed teams against the teams they faced least.
pub fn pair_teams<R: Rng + ?Sized>(teams: &[Team], history: &History, rng: &mut R) -> Vec<Match> {
    search(
        rng,
        |rng| {
            let mut pool = teams.to_vec();
            pool.shuffle(rng);
            pair_greedy(&pool, |a, b| history.team_opponent_cost(a, b))
                .into_iter()
                .map(|(team1, team2)| Match::new(team1, team2))
                .collect()
        },
        // Partners never change with fixed teams.
        |round| RepeatCost {
            partners: 0,
            opponents: history.round_cost(round).opponents,
        },
    )
}
