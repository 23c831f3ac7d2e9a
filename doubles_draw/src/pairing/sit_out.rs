//! Rotation of the players who sit out a round.

use rand::{Rng, seq::SliceRandom};

use crate::rounds::{pausing_players, total_rounds};
use crate::tournament::{PlayerIndex, Tournament};

/// For every player, the number of rounds so far they had no match in.
pub fn sit_out_counts(t: &Tournament) -> Vec<u32> {
    let mut counts = vec![0; t.player_count()];
    for round in 1..=total_rounds(t) {
        for player in pausing_players(t, round) {
            counts[player] += 1;
        }
    }
    counts
}

/// Split `units` into `(active, resting)`, resting the `resting` units that
/// sat out least so far. Ties are broken uniformly at random.
///
/// Both halves keep the input order.
pub fn split_resting<U, R, F>(
    units: &[U],
    resting: usize,
    sat_out: F,
    rng: &mut R,
) -> (Vec<U>, Vec<U>)
where
    U: Copy,
    R: Rng + ?Sized,
    F: Fn(&U) -> u32,
{
    let mut order: Vec<usize> = (0..units.len()).collect();
    order.shuffle(rng);
    // Stable, so the shuffle decides among equal counts.
    order.sort_by_key(|&i| sat_out(&units[i]));

    let mut is_resting = vec![false; units.len()];
    for &i in order.iter().take(resting) {
        is_resting[i] = true;
    }

    let mut active = Vec::with_capacity(units.len());
    let mut rest = Vec::with_capacity(resting);
    for (unit, rests) in units.iter().zip(is_resting) {
        if rests {
            rest.push(*unit);
        } else {
            active.push(*unit);
        }
    }
    (active, rest)
}

/// Split the roster for the next round into `(active, sitting)`.
pub fn select_sitting<R: Rng + ?Sized>(
    t: &Tournament,
    sitting: usize,
    rng: &mut R,
) -> (Vec<PlayerIndex>, Vec<PlayerIndex>) {
    let counts = sit_out_counts(t);
    let players: Vec<PlayerIndex> = (0..t.player_count()).collect();
    split_resting(&players, sitting, |&p| counts[p], rng)
}
