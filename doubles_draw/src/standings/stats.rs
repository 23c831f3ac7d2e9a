//! Per-player aggregates derived from the match history.

use log::warn;
use serde::{Deserialize, Serialize};

use super::ranking::rank_standings;
use crate::rounds::completed_rounds;
use crate::tournament::{PlayerIndex, TeamSide, Tournament};

/// Lifecycle status derived from the considered matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// No match finished yet (including no matches at all)
    Setup,
    /// Some but not all matches finished
    Playing,
    /// Every match finished
    Finished,
}

/// Aggregated results of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStanding {
    pub player: PlayerIndex,
    pub name: String,
    /// Sum of the derived team scores over decided matches
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub games_played: u32,
    /// Completed rounds the player did not play in
    pub games_sitting: u32,
    pub points_per_game: f64,
    pub win_rate: f64,
    pub points_from_sitting: u32,
    pub total_points_with_sitting: u32,
    /// Competition rank, 1-indexed; tied players share a rank
    pub rank: usize,
}

impl PlayerStanding {
    pub fn empty(player: PlayerIndex, name: &str) -> Self {
        Self {
            player,
            name: name.to_string(),
            points: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            games_played: 0,
            games_sitting: 0,
            points_per_game: 0.0,
            win_rate: 0.0,
            points_from_sitting: 0,
            total_points_with_sitting: 0,
            rank: 0,
        }
    }
}

/// Standings of a tournament, best player first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub standings: Vec<PlayerStanding>,
    pub completed_rounds: usize,
    pub status: TournamentStatus,
}

impl Stats {
    /// The podium: up to three leading players.
    pub fn top_players(&self) -> &[PlayerStanding] {
        &self.standings[..self.standings.len().min(3)]
    }

    /// Player indices in ranking order.
    pub fn ranked_players(&self) -> Vec<PlayerIndex> {
        self.standings.iter().map(|s| s.player).collect()
    }

    pub fn standing_of(&self, player: PlayerIndex) -> Option<&PlayerStanding> {
        self.standings.iter().find(|s| s.player == player)
    }
}

/// Compute standings, optionally as of the end of round `up_to_round`.
///
/// Finished matches whose result is missing or malformed are skipped, so a
/// single bad record does not blank the whole table.
pub fn compute_stats(t: &Tournament, up_to_round: Option<usize>) -> Stats {
    let courts = t.settings.number_of_courts.max(1);
    let points = t.points_per_game();

    let considered = match up_to_round {
        Some(round) => &t.matches[..(round.saturating_mul(courts)).min(t.matches.len())],
        None => &t.matches[..],
    };
    let completed = match up_to_round {
        Some(round) => completed_rounds(t).min(round),
        None => completed_rounds(t),
    };

    let mut standings: Vec<PlayerStanding> = t
        .players
        .iter()
        .enumerate()
        .map(|(idx, player)| PlayerStanding::empty(idx, &player.name))
        .collect();

    for (index, m) in considered.iter().enumerate() {
        if !m.is_finished {
            continue;
        }
        let (Some(outcome), Some((score1, score2))) = (m.outcome(points), m.team_scores(points))
        else {
            warn!(
                "Skipping match {} of tournament {}: incomplete result",
                index, t.id
            );
            continue;
        };

        for (side, team, score) in [
            (TeamSide::Team1, m.team1, score1),
            (TeamSide::Team2, m.team2, score2),
        ] {
            for player in team {
                let Some(entry) = standings.get_mut(player) else {
                    continue;
                };
                entry.points += score;
                if outcome.is_draw() {
                    entry.draws += 1;
                } else if outcome.winner == side {
                    entry.wins += 1;
                } else {
                    entry.losses += 1;
                }
            }
        }
    }

    let sitting_credit = t.settings.sitting_credit();
    for entry in &mut standings {
        entry.games_played = entry.wins + entry.draws + entry.losses;
        // A player can have results in the running round, which is not yet complete.
        entry.games_sitting = (completed as u32).saturating_sub(entry.games_played);
        if entry.games_played > 0 {
            entry.points_per_game = f64::from(entry.points) / f64::from(entry.games_played);
            entry.win_rate = f64::from(entry.wins) / f64::from(entry.games_played);
        }
        entry.points_from_sitting = entry.games_sitting * sitting_credit;
        entry.total_points_with_sitting = entry.points + entry.points_from_sitting;
    }

    rank_standings(&mut standings);

    let finished = considered.iter().filter(|m| m.is_finished).count();
    let status = if !considered.is_empty() && finished == considered.len() {
        TournamentStatus::Finished
    } else if finished > 0 {
        TournamentStatus::Playing
    } else {
        TournamentStatus::Setup
    };

    Stats {
        standings,
        completed_rounds: completed,
        status,
    }
}
