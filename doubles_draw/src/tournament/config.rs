//! Tournament configuration models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{TournamentError, TournamentResult};

/// Fewest players a tournament can be created with.
pub const MIN_PLAYERS: usize = 4;

/// Most players a tournament can hold.
pub const MAX_PLAYERS: usize = 40;

/// Most courts a tournament can play on.
pub const MAX_COURTS: usize = 10;

/// Upper bound for the random opening rounds of the ranking-adaptive format.
pub const MAX_RANDOM_ROUNDS: u8 = 5;

/// Maximum player name length, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 16;

/// Maximum tournament name length, in characters.
pub const MAX_TOURNAMENT_NAME_LEN: usize = 50;

/// Maximum custom court label length, in characters.
pub const MAX_COURT_NAME_LEN: usize = 20;

/// Total points contested in a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PointsPerGame {
    P16,
    P21,
    P24,
    P32,
}

impl PointsPerGame {
    /// All variants in wire order.
    pub const ALL: [PointsPerGame; 4] = [Self::P16, Self::P21, Self::P24, Self::P32];

    pub fn points(self) -> u8 {
        match self {
            Self::P16 => 16,
            Self::P21 => 21,
            Self::P24 => 24,
            Self::P32 => 32,
        }
    }

    /// Position in [`PointsPerGame::ALL`]; this is what the share codec stores.
    pub fn index(self) -> u8 {
        match self {
            Self::P16 => 0,
            Self::P21 => 1,
            Self::P24 => 2,
            Self::P32 => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Points credited for every round spent sitting out: half a game, rounded up.
    pub fn sitting_credit(self) -> u32 {
        u32::from(self.points()).div_ceil(2)
    }
}

impl TryFrom<u8> for PointsPerGame {
    type Error = TournamentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| p.points() == value)
            .ok_or(TournamentError::InvalidPointsPerGame(value))
    }
}

impl From<PointsPerGame> for u8 {
    fn from(value: PointsPerGame) -> Self {
        value.points()
    }
}

impl fmt::Display for PointsPerGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// How a ranked block of four players is split into two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchupStyle {
    /// Style A: 1st & 4th against 2nd & 3rd.
    Balanced,
    /// Style B: 1st & 3rd against 2nd & 4th.
    Staggered,
}

impl MatchupStyle {
    /// Split a block `[p0, p1, p2, p3]` given in rank order.
    pub fn split<T: Copy>(self, block: [T; 4]) -> ([T; 2], [T; 2]) {
        let [p0, p1, p2, p3] = block;
        match self {
            Self::Balanced => ([p0, p3], [p1, p2]),
            Self::Staggered => ([p0, p2], [p1, p3]),
        }
    }
}

impl fmt::Display for MatchupStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchupStyle::Balanced => write!(f, "1&4 vs 2&3"),
            MatchupStyle::Staggered => write!(f, "1&3 vs 2&4"),
        }
    }
}

/// Matchmaking policy of a tournament. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Format {
    /// Every round maximises new partners and opponents.
    RoundRobin,
    /// After `random_rounds` random rounds, players are grouped by standing.
    #[serde(rename_all = "camelCase")]
    RankingAdaptive {
        matchup_style: MatchupStyle,
        random_rounds: u8,
    },
}

impl Format {
    pub fn is_ranking_adaptive(&self) -> bool {
        matches!(self, Format::RankingAdaptive { .. })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::RoundRobin => write!(f, "round-robin"),
            Format::RankingAdaptive { .. } => write!(f, "ranking-adaptive"),
        }
    }
}

/// Tournament-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSettings {
    /// Matchmaking policy
    pub format: Format,

    /// Points contested per match
    pub points_per_game: PointsPerGame,

    /// Number of courts; also the number of matches per round
    pub number_of_courts: usize,

    /// Whether partners stay together for the whole tournament
    pub is_fixed_pairs: bool,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            format: Format::RoundRobin,
            points_per_game: PointsPerGame::P24,
            number_of_courts: 1,
            is_fixed_pairs: false,
        }
    }
}

impl TournamentSettings {
    /// Validate settings against a roster size.
    ///
    /// Courts are limited to `1..=MAX_COURTS` and, more narrowly, to at most
    /// `player_count / 4`. A round therefore always fills every court, which
    /// keeps the flat match list slicing into rounds of exactly
    /// `number_of_courts` matches. Records with more courts than four-player
    /// groups are refused here even though they would fit the court range.
    pub fn validate(&self, player_count: usize) -> TournamentResult<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(TournamentError::InvalidPlayerCount(player_count));
        }

        if self.number_of_courts == 0
            || self.number_of_courts > MAX_COURTS
            || self.number_of_courts > player_count / 4
        {
            return Err(TournamentError::InvalidCourtCount {
                courts: self.number_of_courts,
                players: player_count,
            });
        }

        if let Format::RankingAdaptive { random_rounds, .. } = self.format {
            if random_rounds == 0 || random_rounds > MAX_RANDOM_ROUNDS {
                return Err(TournamentError::InvalidRandomRounds(random_rounds));
            }
        }

        if self.is_fixed_pairs && player_count % 2 != 0 {
            return Err(TournamentError::OddFixedPairs(player_count));
        }

        Ok(())
    }

    /// Sitting-out credit per round, derived from the points per game.
    pub fn sitting_credit(&self) -> u32 {
        self.points_per_game.sitting_credit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_per_game_conversions() {
        assert_eq!(PointsPerGame::try_from(21).unwrap(), PointsPerGame::P21);
        assert!(PointsPerGame::try_from(20).is_err());
        assert_eq!(PointsPerGame::from_index(3), Some(PointsPerGame::P32));
        assert_eq!(PointsPerGame::from_index(4), None);
        for p in PointsPerGame::ALL {
            assert_eq!(PointsPerGame::from_index(p.index()), Some(p));
        }
    }

    #[test]
    fn test_sitting_credit_rounds_up() {
        assert_eq!(PointsPerGame::P16.sitting_credit(), 8);
        assert_eq!(PointsPerGame::P21.sitting_credit(), 11);
        assert_eq!(PointsPerGame::P24.sitting_credit(), 12);
        assert_eq!(PointsPerGame::P32.sitting_credit(), 16);
    }

    #[test]
    fn test_matchup_style_split() {
        let block = ['a', 'b', 'c', 'd'];
        assert_eq!(MatchupStyle::Balanced.split(block), (['a', 'd'], ['b', 'c']));
        assert_eq!(MatchupStyle::Staggered.split(block), (['a', 'c'], ['b', 'd']));
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(TournamentSettings::default().validate(4).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let settings = TournamentSettings::default();
        assert!(settings.validate(3).is_err());
        assert!(settings.validate(41).is_err());

        let too_many_courts = TournamentSettings {
            number_of_courts: 3,
            ..Default::default()
        };
        assert!(too_many_courts.validate(11).is_err());
        assert!(too_many_courts.validate(12).is_ok());

        let two_courts = TournamentSettings {
            number_of_courts: 2,
            ..Default::default()
        };
        assert!(two_courts.validate(4).is_err());
        assert!(two_courts.validate(8).is_ok());

        let adaptive = TournamentSettings {
            format: Format::RankingAdaptive {
                matchup_style: MatchupStyle::Balanced,
                random_rounds: 6,
            },
            ..Default::default()
        };
        assert!(matches!(
            adaptive.validate(8),
            Err(TournamentError::InvalidRandomRounds(6))
        ));

        let fixed = TournamentSettings {
            is_fixed_pairs: true,
            ..Default::default()
        };
        assert!(fixed.validate(9).is_err());
        assert!(fixed.validate(10).is_ok());
    }

    #[test]
    fn test_points_per_game_serializes_as_number() {
        let json = serde_json::to_string(&PointsPerGame::P21).unwrap();
        assert_eq!(json, "21");
        let back: PointsPerGame = serde_json::from_str("32").unwrap();
        assert_eq!(back, PointsPerGame::P32);
        assert!(serde_json::from_str::<PointsPerGame>("17").is_err());
    }
}
