//! Tournament error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when a tournament record or one of its parts is invalid
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Player count {0} is outside 4..=40")]
    InvalidPlayerCount(usize),

    #[error("Court count {courts} is invalid for {players} players")]
    InvalidCourtCount { courts: usize, players: usize },

    #[error("Unsupported points per game: {0}")]
    InvalidPointsPerGame(u8),

    #[error("Random rounds must be between 1 and 5, got {0}")]
    InvalidRandomRounds(u8),

    #[error("Fixed pairs need an even number of players, got {0}")]
    OddFixedPairs(usize),

    #[error("Player name must be 1 to {max} characters: {name:?}")]
    InvalidPlayerName { name: String, max: usize },

    #[error("Tournament name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("Invalid court name for court {court}")]
    InvalidCourtName { court: usize },

    #[error("Invalid tournament id: {0:?}")]
    InvalidId(String),

    #[error("Match {index} references an invalid or repeated player")]
    InvalidTeams { index: usize },

    #[error("Match {index} has an inconsistent result")]
    InvalidResult { index: usize },

    #[error("Score delta {delta} exceeds {max} points per game")]
    ScoreDeltaTooLarge { delta: u8, max: u8 },

    #[error("Player index {0} is out of range")]
    PlayerNotFound(usize),

    #[error("Match {local} not found in round {round}")]
    MatchNotFound { round: usize, local: usize },

    #[error("Round {0} is no longer the current round")]
    RoundClosed(usize),

    #[error("Tournament already started")]
    AlreadyStarted,

    #[error("Tournament already finished")]
    AlreadyFinished,

    #[error("Finish time {0} is finer than a millisecond")]
    FinishTimeTooPrecise(DateTime<Utc>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
