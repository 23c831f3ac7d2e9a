//! Unranked random pairing, used for the opening rounds.

use rand::{Rng, seq::SliceRandom};

use crate::tournament::{Match, PlayerIndex, Team};

/// Shuffle the players and group them by four: `[a, b]` against `[c, d]`.
pub fn pair_players<R: Rng + ?Sized>(active: &[PlayerIndex], rng: &mut R) -> Vec<Match> {
    let mut pool = active.to_vec();
    pool.shuffle(rng);
    pool.chunks_exact(4)
        .map(|block| Match::new([block[0], block[1]], [block[2], block[3]]))
        .collect()
}

/// Shuffle fixed teams and match them two by two.
pub fn pair_teams<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Vec<Match> {
    let mut pool = teams.to_vec();
    pool.shuffle(rng);
    pool.chunks_exact(2)
        .map(|pair| Match::new(pair[0], pair[1]))
        .collect()
}
