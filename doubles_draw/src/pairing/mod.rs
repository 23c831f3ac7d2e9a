//! Pairing generator.
//!
//! [`generate_next_round`] produces the matches of the next round without
//! touching the record; append them with [`crate::rounds::append_round`].
//! An empty result means no round can be generated right now.
//!
//! Each round is built in three steps:
//!
//! 1. Sit-outs: when the courts cannot hold everybody, the players (or fixed
//!    teams) who sat out least so far rest, ties drawn at random.
//! 2. Pairing: the first round is always random. Round-robin rounds then
//!    minimise repeated partners and opponents. Ranking-adaptive rounds stay
//!    random for `random_rounds` completed rounds, then group players by
//!    standing in blocks of four.
//! 3. Court cap: never more than `min(courts, active / 4)` matches.

pub mod history;
pub mod random;
pub mod ranked;
pub mod round_robin;
pub mod sit_out;

use log::debug;
use rand::Rng;

pub use history::{History, RepeatCost};
pub use sit_out::{select_sitting, sit_out_counts, split_resting};

use crate::rounds::{can_generate_next, completed_rounds, total_rounds};
use crate::tournament::{Format, MIN_PLAYERS, Match, PlayerIndex, Team, Tournament};

/// Matches per round: every court, as long as there are players for it.
pub fn matches_per_round(t: &Tournament) -> usize {
    t.settings.number_of_courts.min(t.player_count() / 4)
}

/// Fixed teams: players `2k` and `2k + 1` play together.
pub fn fixed_teams(t: &Tournament) -> Vec<Team> {
    (0..t.player_count() / 2)
        .map(|k| [2 * k, 2 * k + 1])
        .collect()
}

/// Matches of the next round, or nothing if the tournament cannot advance.
pub fn generate_next_round<R: Rng + ?Sized>(t: &Tournament, rng: &mut R) -> Vec<Match> {
    if t.player_count() < MIN_PLAYERS || t.is_finished() {
        return Vec::new();
    }
    if !t.matches.is_empty() && !can_generate_next(t, total_rounds(t)) {
        return Vec::new();
    }

    let match_count = matches_per_round(t);
    let mut round = if t.settings.is_fixed_pairs {
        pair_fixed(t, match_count, rng)
    } else {
        pair_individuals(t, match_count, rng)
    };
    round.truncate(match_count);
    round
}

fn random_phase(t: &Tournament) -> bool {
    if t.matches.is_empty() {
        return true;
    }
    match t.settings.format {
        Format::RoundRobin => false,
        Format::RankingAdaptive { random_rounds, .. } => {
            completed_rounds(t) < usize::from(random_rounds)
        }
    }
}

fn pair_individuals<R: Rng + ?Sized>(
    t: &Tournament,
    match_count: usize,
    rng: &mut R,
) -> Vec<Match> {
    let sitting = t.player_count() - 4 * match_count;
    let (active, resting) = select_sitting(t, sitting, rng);
    if !resting.is_empty() {
        debug!("Tournament {}: {:?} sit out", t.id, resting);
    }

    if random_phase(t) {
        return random::pair_players(&active, rng);
    }
    match t.settings.format {
        Format::RoundRobin => {
            let history = History::from_matches(t.player_count(), &t.matches);
            round_robin::pair_players(&active, &history, rng)
        }
        Format::RankingAdaptive { matchup_style, .. } => {
            ranked::pair_players(t, &active, matchup_style)
        }
    }
}

fn pair_fixed<R: Rng + ?Sized>(t: &Tournament, match_count: usize, rng: &mut R) -> Vec<Match> {
    let teams = fixed_teams(t);
    let counts = sit_out_counts(t);
    let resting = teams.len().saturating_sub(2 * match_count);
    let (active, rest) = split_resting(&teams, resting, |team| counts[team[0]], rng);
    if !rest.is_empty() {
        let players: Vec<PlayerIndex> = rest.iter().flatten().copied().collect();
        debug!("Tournament {}: {:?} sit out", t.id, players);
    }

    if random_phase(t) {
        return random::pair_teams(&active, rng);
    }
    match t.settings.format {
        Format::RoundRobin => {
            let history = History::from_matches(t.player_count(), &t.matches);
            round_robin::pair_teams(&active, &history, rng)
        }
        Format::RankingAdaptive { .. } => ranked::pair_teams(t, &active),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::{append_round, record_result};
    use crate::tournament::{MatchupStyle, TeamSide, TournamentSettings};
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::BTreeSet;

    fn tournament(players: usize, settings: TournamentSettings) -> Tournament {
        let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(99);
        Tournament::new(None, settings, &names, &mut rng).unwrap()
    }

    fn finish_round(mut t: Tournament) -> Tournament {
        let round = total_rounds(&t);
        for local in 0..crate::rounds::round_matches(&t, round).len() {
            t = record_result(&t, round, local, TeamSide::Team1, 2).unwrap();
        }
        t
    }

    #[test]
    fn test_first_round_fills_courts() {
        let settings = TournamentSettings {
            number_of_courts: 2,
            ..Default::default()
        };
        let t = tournament(9, settings);
        let mut rng = StdRng::seed_from_u64(1);
        let round = generate_next_round(&t, &mut rng);
        assert_eq!(round.len(), 2);
        let players: BTreeSet<usize> = round.iter().flat_map(Match::players).collect();
        assert_eq!(players.len(), 8);
        assert!(round.iter().all(|m| !m.is_finished && m.winner.is_none()));
    }

    #[test]
    fn test_no_round_while_current_is_open() {
        let t = tournament(4, TournamentSettings::default());
        let mut rng = StdRng::seed_from_u64(1);
        let t = append_round(&t, generate_next_round(&t, &mut rng));
        assert!(generate_next_round(&t, &mut rng).is_empty());

        let t = finish_round(t);
        assert_eq!(generate_next_round(&t, &mut rng).len(), 1);
    }

    #[test]
    fn test_no_round_after_finish() {
        let t = crate::rounds::finish(&tournament(4, TournamentSettings::default()));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_next_round(&t, &mut rng).is_empty());
    }

    #[test]
    fn test_too_few_players() {
        let mut t = tournament(4, TournamentSettings::default());
        t.players.truncate(3);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_next_round(&t, &mut rng).is_empty());
    }

    #[test]
    fn test_random_phase_follows_completed_rounds() {
        let settings = TournamentSettings {
            format: Format::RankingAdaptive {
                matchup_style: MatchupStyle::Balanced,
                random_rounds: 2,
            },
            ..Default::default()
        };
        let mut t = tournament(4, settings);
        assert!(random_phase(&t));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2 {
            t = finish_round(append_round(&t, generate_next_round(&t, &mut rng)));
        }
        assert!(!random_phase(&t));

        let rr = tournament(4, TournamentSettings::default());
        assert!(random_phase(&rr));
        let rr = finish_round(append_round(&rr, generate_next_round(&rr, &mut rng)));
        assert!(!random_phase(&rr));
    }

    #[test]
    fn test_fixed_pairs_stay_together() {
        let settings = TournamentSettings {
            number_of_courts: 2,
            is_fixed_pairs: true,
            ..Default::default()
        };
        let mut t = tournament(10, settings);
        let teams = fixed_teams(&t);
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..5 {
            let round = generate_next_round(&t, &mut rng);
            assert_eq!(round.len(), 2);
            for m in &round {
                assert!(teams.contains(&m.team1) && teams.contains(&m.team2));
            }
            t = finish_round(append_round(&t, round));
        }
        // Five teams, one resting per round: everybody rested exactly once.
        assert!(sit_out_counts(&t).iter().all(|&c| c == 1));
    }
}
