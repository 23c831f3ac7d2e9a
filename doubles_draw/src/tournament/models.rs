//! Tournament data models.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::{
    MAX_COURT_NAME_LEN, MAX_PLAYER_NAME_LEN, MAX_TOURNAMENT_NAME_LEN, PointsPerGame,
    TournamentSettings,
};
use super::errors::{TournamentError, TournamentResult};
use super::id::TournamentId;

/// Position of a player in [`Tournament::players`]; the player's identity.
pub type PlayerIndex = usize;

/// Two players sharing a side of the court.
pub type Team = [PlayerIndex; 2];

/// Which of the two teams of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub fn other(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }

    pub fn bit(self) -> bool {
        self == TeamSide::Team2
    }

    pub fn from_bit(bit: bool) -> Self {
        if bit { TeamSide::Team2 } else { TeamSide::Team1 }
    }
}

/// A participant. The index in the roster, not the name, identifies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

impl Player {
    pub fn new(name: &str) -> TournamentResult<Self> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_PLAYER_NAME_LEN {
            return Err(TournamentError::InvalidPlayerName {
                name: name.to_string(),
                max: MAX_PLAYER_NAME_LEN,
            });
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// Scores of a decided match: `(winning, losing)` for a given delta.
///
/// Scores are never stored; they are always derived from the points per game
/// and the gap, so both sides sum to at most the points per game.
pub fn derived_scores(points: PointsPerGame, score_delta: u8) -> (u32, u32) {
    let total = u32::from(points.points());
    let delta = u32::from(score_delta);
    ((total + delta) / 2, total.saturating_sub(delta) / 2)
}

/// The decided result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: TeamSide,
    pub score_delta: u8,
}

impl Outcome {
    pub fn is_draw(&self) -> bool {
        self.score_delta == 0
    }
}

/// One match on one court.
///
/// `winner` and `score_delta` are either both set or both unset, and only
/// set on a finished match. A `score_delta` of zero records a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub team1: Team,
    pub team2: Team,
    pub is_finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_delta: Option<u8>,
}

impl Match {
    /// A freshly scheduled match without a result.
    pub fn new(team1: Team, team2: Team) -> Self {
        Self {
            team1,
            team2,
            is_finished: false,
            winner: None,
            score_delta: None,
        }
    }

    /// Finish the match with a result.
    pub fn with_result(
        self,
        winner: TeamSide,
        score_delta: u8,
        points: PointsPerGame,
    ) -> TournamentResult<Self> {
        if score_delta > points.points() {
            return Err(TournamentError::ScoreDeltaTooLarge {
                delta: score_delta,
                max: points.points(),
            });
        }
        Ok(Self {
            is_finished: true,
            winner: Some(winner),
            score_delta: Some(score_delta),
            ..self
        })
    }

    /// Reopen the match, dropping any result.
    pub fn cleared(self) -> Self {
        Self::new(self.team1, self.team2)
    }

    pub fn team(&self, side: TeamSide) -> Team {
        match side {
            TeamSide::Team1 => self.team1,
            TeamSide::Team2 => self.team2,
        }
    }

    pub fn players(&self) -> [PlayerIndex; 4] {
        [self.team1[0], self.team1[1], self.team2[0], self.team2[1]]
    }

    pub fn side_of(&self, player: PlayerIndex) -> Option<TeamSide> {
        if self.team1.contains(&player) {
            Some(TeamSide::Team1)
        } else if self.team2.contains(&player) {
            Some(TeamSide::Team2)
        } else {
            None
        }
    }

    /// The result, if the match is finished and its result is well formed.
    pub fn outcome(&self, points: PointsPerGame) -> Option<Outcome> {
        if !self.is_finished {
            return None;
        }
        match (self.winner, self.score_delta) {
            (Some(winner), Some(score_delta)) if score_delta <= points.points() => {
                Some(Outcome {
                    winner,
                    score_delta,
                })
            }
            _ => None,
        }
    }

    /// Derived `(team1, team2)` scores of a decided match.
    pub fn team_scores(&self, points: PointsPerGame) -> Option<(u32, u32)> {
        let outcome = self.outcome(points)?;
        let (winning, losing) = derived_scores(points, outcome.score_delta);
        Some(match outcome.winner {
            TeamSide::Team1 => (winning, losing),
            TeamSide::Team2 => (losing, winning),
        })
    }

    fn validate(
        &self,
        index: usize,
        player_count: usize,
        points: PointsPerGame,
    ) -> TournamentResult<()> {
        let players = self.players();
        let distinct = players
            .iter()
            .enumerate()
            .all(|(i, p)| *p < player_count && !players[..i].contains(p));
        if !distinct {
            return Err(TournamentError::InvalidTeams { index });
        }

        let consistent = match (self.winner, self.score_delta) {
            (None, None) => true,
            (Some(_), Some(delta)) => self.is_finished && delta <= points.points(),
            _ => false,
        };
        if !consistent {
            return Err(TournamentError::InvalidResult { index });
        }
        Ok(())
    }
}

/// A complete tournament: configuration, roster and the flat match history.
///
/// Round `r` (1-indexed) is the slice
/// `matches[(r - 1) * number_of_courts .. r * number_of_courts]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub settings: TournamentSettings,
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub court_names: BTreeMap<usize, String>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a tournament with no matches.
    pub fn new<R: Rng + ?Sized>(
        name: Option<&str>,
        settings: TournamentSettings,
        player_names: &[&str],
        rng: &mut R,
    ) -> TournamentResult<Self> {
        let players = player_names
            .iter()
            .map(|name| Player::new(name))
            .collect::<TournamentResult<Vec<_>>>()?;

        let tournament = Self {
            id: TournamentId::generate(Utc::now(), rng),
            name: normalize_name(name),
            settings,
            players,
            court_names: BTreeMap::new(),
            matches: Vec::new(),
            finished_at: None,
        };
        tournament.validate()?;
        Ok(tournament)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn points_per_game(&self) -> PointsPerGame {
        self.settings.points_per_game
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.created_at()
    }

    /// Check every invariant of the record.
    pub fn validate(&self) -> TournamentResult<()> {
        self.settings.validate(self.players.len())?;

        for player in &self.players {
            let len = player.name.chars().count();
            if len == 0 || len > MAX_PLAYER_NAME_LEN {
                return Err(TournamentError::InvalidPlayerName {
                    name: player.name.clone(),
                    max: MAX_PLAYER_NAME_LEN,
                });
            }
        }

        if let Some(name) = &self.name {
            if name.chars().count() > MAX_TOURNAMENT_NAME_LEN {
                return Err(TournamentError::NameTooLong {
                    max: MAX_TOURNAMENT_NAME_LEN,
                });
            }
        }

        for (&court, label) in &self.court_names {
            let len = label.chars().count();
            if court >= self.settings.number_of_courts || len == 0 || len > MAX_COURT_NAME_LEN {
                return Err(TournamentError::InvalidCourtName { court });
            }
        }

        for (index, m) in self.matches.iter().enumerate() {
            m.validate(index, self.players.len(), self.settings.points_per_game)?;
        }

        // Finish times are kept to the millisecond.
        if let Some(at) = self.finished_at {
            if at.timestamp_subsec_nanos() % 1_000_000 != 0 {
                return Err(TournamentError::FinishTimeTooPrecise(at));
            }
        }

        Ok(())
    }

    /// Rename a player. Only allowed before the first round is generated.
    pub fn rename_player(&self, player: PlayerIndex, name: &str) -> TournamentResult<Self> {
        if !self.matches.is_empty() {
            return Err(TournamentError::AlreadyStarted);
        }
        if player >= self.players.len() {
            return Err(TournamentError::PlayerNotFound(player));
        }

        let mut renamed = self.clone();
        renamed.players[player] = Player::new(name)?;
        Ok(renamed)
    }

    /// Set or clear (`None` or blank) the custom label of a court.
    pub fn set_court_name(&self, court: usize, label: Option<&str>) -> TournamentResult<Self> {
        if self.is_finished() {
            return Err(TournamentError::AlreadyFinished);
        }
        if court >= self.settings.number_of_courts {
            return Err(TournamentError::InvalidCourtName { court });
        }

        let mut updated = self.clone();
        match label.map(str::trim).filter(|l| !l.is_empty()) {
            Some(label) if label.chars().count() <= MAX_COURT_NAME_LEN => {
                updated.court_names.insert(court, label.to_string());
            }
            Some(_) => return Err(TournamentError::InvalidCourtName { court }),
            None => {
                updated.court_names.remove(&court);
            }
        }
        Ok(updated)
    }

    /// Display label of a court: its custom name or `"Court N"`.
    pub fn court_label(&self, court: usize) -> String {
        self.court_names
            .get(&court)
            .cloned()
            .unwrap_or_else(|| format!("Court {}", court + 1))
    }

    /// Parse the JSON record form. Structural only; see [`Tournament::validate`].
    pub fn from_json(json: &str) -> TournamentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> TournamentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn roster(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{i}")).collect()
    }

    fn tournament(n: usize) -> Tournament {
        let names = roster(n);
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(42);
        Tournament::new(Some("Friday"), TournamentSettings::default(), &names, &mut rng).unwrap()
    }

    #[test]
    fn test_derived_scores() {
        assert_eq!(derived_scores(PointsPerGame::P24, 4), (14, 10));
        assert_eq!(derived_scores(PointsPerGame::P24, 6), (15, 9));
        assert_eq!(derived_scores(PointsPerGame::P21, 0), (10, 10));
        assert_eq!(derived_scores(PointsPerGame::P21, 21), (21, 0));
    }

    #[test]
    fn test_team_scores_follow_winner() {
        let m = Match::new([0, 1], [2, 3])
            .with_result(TeamSide::Team2, 6, PointsPerGame::P24)
            .unwrap();
        assert_eq!(m.team_scores(PointsPerGame::P24), Some((9, 15)));
    }

    #[test]
    fn test_with_result_rejects_large_delta() {
        let result = Match::new([0, 1], [2, 3]).with_result(TeamSide::Team1, 17, PointsPerGame::P16);
        assert!(matches!(
            result,
            Err(TournamentError::ScoreDeltaTooLarge { delta: 17, max: 16 })
        ));
    }

    #[test]
    fn test_outcome_requires_both_fields() {
        let mut m = Match::new([0, 1], [2, 3]);
        m.is_finished = true;
        m.winner = Some(TeamSide::Team1);
        assert_eq!(m.outcome(PointsPerGame::P24), None);
        m.score_delta = Some(3);
        assert!(m.outcome(PointsPerGame::P24).is_some());
        m.score_delta = Some(30);
        assert_eq!(m.outcome(PointsPerGame::P24), None);
    }

    #[test]
    fn test_player_name_limits() {
        assert!(Player::new("").is_err());
        assert!(Player::new("   ").is_err());
        assert!(Player::new("Ærøskøbing Pådel").is_ok());
        assert!(Player::new("seventeen chars!!").is_err());
    }

    #[test]
    fn test_new_tournament_is_empty_and_valid() {
        let t = tournament(8);
        assert_eq!(t.player_count(), 8);
        assert!(t.matches.is_empty());
        assert!(!t.is_finished());
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_rename_only_before_start() {
        let t = tournament(4);
        let renamed = t.rename_player(2, "Zoë").unwrap();
        assert_eq!(renamed.players[2].name, "Zoë");
        assert_eq!(t.players[2].name, "P2");
        assert!(t.rename_player(9, "X").is_err());

        let mut started = t.clone();
        started.matches.push(Match::new([0, 1], [2, 3]));
        assert!(matches!(
            started.rename_player(0, "X"),
            Err(TournamentError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_court_labels() {
        let t = tournament(8);
        assert_eq!(t.court_label(0), "Court 1");
        let named = t.set_court_name(0, Some(" Centre ")).unwrap();
        assert_eq!(named.court_label(0), "Centre");
        let cleared = named.set_court_name(0, None).unwrap();
        assert!(cleared.court_names.is_empty());
        assert!(t.set_court_name(1, Some("Side")).is_err());
    }

    #[test]
    fn test_validate_catches_bad_matches() {
        let mut t = tournament(4);
        t.matches.push(Match::new([0, 1], [1, 3]));
        assert!(matches!(
            t.validate(),
            Err(TournamentError::InvalidTeams { index: 0 })
        ));

        t.matches[0] = Match::new([0, 1], [2, 3]);
        t.matches[0].winner = Some(TeamSide::Team1);
        assert!(matches!(
            t.validate(),
            Err(TournamentError::InvalidResult { index: 0 })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut t = tournament(4);
        t.matches.push(
            Match::new([0, 1], [2, 3])
                .with_result(TeamSide::Team1, 2, PointsPerGame::P24)
                .unwrap(),
        );
        let json = t.to_json().unwrap();
        assert!(json.contains("\"pointsPerGame\": 24"));
        assert!(json.contains("\"kind\": \"roundRobin\""));
        let back = Tournament::from_json(&json).unwrap();
        assert_eq!(back, t);
    }
}
