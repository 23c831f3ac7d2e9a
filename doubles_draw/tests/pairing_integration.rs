//! Integration tests for next-round generation
//!
//! Rounds are generated, appended and scored through the public API with a
//! seeded random source, the way a caller drives a tournament.

use doubles_draw::pairing::{History, generate_next_round, sit_out_counts};
use doubles_draw::rounds::{append_round, pausing_players, record_result, round_matches, total_rounds};
use doubles_draw::{
    Format, Match, MatchupStyle, TeamSide, Tournament, TournamentSettings, compute_stats,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::BTreeSet;

fn tournament(players: usize, settings: TournamentSettings, seed: u64) -> Tournament {
    let names: Vec<String> = (0..players).map(|i| format!("Player {i:02}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    Tournament::new(None, settings, &names, &mut rng).unwrap()
}

fn courts(n: usize) -> TournamentSettings {
    TournamentSettings {
        number_of_courts: n,
        ..Default::default()
    }
}

/// Generate the next round, append it and finish every match with random
/// results.
fn play_round(t: &Tournament, rng: &mut StdRng) -> Tournament {
    let round = generate_next_round(t, rng);
    assert!(!round.is_empty(), "no round generated");
    let mut t = append_round(t, round);
    let r = total_rounds(&t);
    for local in 0..round_matches(&t, r).len() {
        let winner = if rng.random_bool(0.5) {
            TeamSide::Team1
        } else {
            TeamSide::Team2
        };
        let delta = rng.random_range(0..=t.points_per_game().points());
        t = record_result(&t, r, local, winner, delta).unwrap();
    }
    t
}

#[test]
fn test_ten_players_two_courts_each_sit_once() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut t = tournament(10, courts(2), 1);
    for _ in 0..5 {
        t = play_round(&t, &mut rng);
    }
    assert_eq!(total_rounds(&t), 5);
    assert_eq!(sit_out_counts(&t), vec![1; 10]);
}

#[test]
fn test_sit_outs_never_differ_by_more_than_one() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = tournament(15, courts(3), seed);
        for round in 1..=12 {
            t = play_round(&t, &mut rng);
            let counts = sit_out_counts(&t);
            let min = counts.iter().min().copied().unwrap_or(0);
            let max = counts.iter().max().copied().unwrap_or(0);
            assert!(max - min <= 1, "seed {seed} round {round}: {counts:?}");
            assert_eq!(counts.iter().sum::<u32>(), 3 * round);
        }
    }
}

#[test]
fn test_every_player_at_most_once_per_round() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut t = tournament(23, courts(5), 3);
    for _ in 0..6 {
        let round = generate_next_round(&t, &mut rng);
        assert_eq!(round.len(), 5);
        let seen: Vec<usize> = round.iter().flat_map(Match::players).collect();
        let distinct: BTreeSet<usize> = seen.iter().copied().collect();
        assert_eq!(seen.len(), distinct.len());
        assert!(round.iter().all(|m| !m.is_finished && m.winner.is_none()));
        t = play_round(&t, &mut rng);
    }
    assert_eq!(pausing_players(&t, 1).len(), 3);
}

#[test]
fn test_round_robin_avoids_repeated_partners_early() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut t = tournament(12, courts(3), 5);
    for _ in 0..3 {
        let history = History::from_matches(t.player_count(), &t.matches);
        let round = generate_next_round(&t, &mut rng);
        assert_eq!(history.round_cost(&round).partners, 0);
        t = play_round(&t, &mut rng);
    }
}

#[test]
fn test_ranking_adaptive_blocks_follow_style() {
    for style in [MatchupStyle::Balanced, MatchupStyle::Staggered] {
        let settings = TournamentSettings {
            format: Format::RankingAdaptive {
                matchup_style: style,
                random_rounds: 2,
            },
            number_of_courts: 2,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(31);
        let mut t = tournament(8, settings, 31);
        t = play_round(&t, &mut rng);
        t = play_round(&t, &mut rng);

        let ranked = compute_stats(&t, None).ranked_players();
        let round = generate_next_round(&t, &mut rng);
        let expected: Vec<Match> = ranked
            .chunks_exact(4)
            .map(|b| {
                let (team1, team2) = style.split([b[0], b[1], b[2], b[3]]);
                Match::new(team1, team2)
            })
            .collect();
        assert_eq!(round, expected);
    }
}

#[test]
fn test_ranking_adaptive_skips_sitting_players() {
    let settings = TournamentSettings {
        format: Format::RankingAdaptive {
            matchup_style: MatchupStyle::Balanced,
            random_rounds: 1,
        },
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(8);
    let mut t = tournament(6, settings, 8);
    t = play_round(&t, &mut rng);

    let round = generate_next_round(&t, &mut rng);
    assert_eq!(round.len(), 1);
    let playing: BTreeSet<usize> = round[0].players().into_iter().collect();
    // Those who sat out round 1 must play round 2.
    for sitter in pausing_players(&t, 1) {
        assert!(playing.contains(&sitter));
    }
    let ranked: Vec<usize> = compute_stats(&t, None)
        .ranked_players()
        .into_iter()
        .filter(|p| playing.contains(p))
        .collect();
    assert_eq!(round[0].team1, [ranked[0], ranked[3]]);
    assert_eq!(round[0].team2, [ranked[1], ranked[2]]);
}

#[test]
fn test_fixed_pairs_round_robin_rotates_opponents() {
    let settings = TournamentSettings {
        number_of_courts: 2,
        is_fixed_pairs: true,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(4);
    let mut t = tournament(8, settings, 4);
    for _ in 0..3 {
        t = play_round(&t, &mut rng);
    }
    // Four teams, three rounds: every team met every other team once.
    let mut meetings = BTreeSet::new();
    for m in &t.matches {
        assert_eq!(m.team1[0] % 2, 0);
        assert_eq!(m.team1[1], m.team1[0] + 1);
        let key = (m.team1[0].min(m.team2[0]), m.team1[0].max(m.team2[0]));
        assert!(meetings.insert(key), "repeated meeting {key:?}");
    }
    assert_eq!(meetings.len(), 6);
}
