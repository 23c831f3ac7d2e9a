//! Tournament record: the value every other module reads and produces.
//!
//! This module provides:
//! - Tournament-wide settings and their limits
//! - Players, matches and derived scores
//! - The 9-character tournament identity
//!
//! Records are plain values. Operations elsewhere in the crate take a
//! `&Tournament` and hand back a new `Tournament` instead of mutating.
//!
//! ## Example
//!
//! ```
//! use doubles_draw::tournament::{Tournament, TournamentSettings};
//!
//! let mut rng = rand::rng();
//! let tournament = Tournament::new(
//!     Some("Sunday Social"),
//!     TournamentSettings::default(),
//!     &["Ana", "Ben", "Cleo", "Dev"],
//!     &mut rng,
//! )
//! .unwrap();
//!
//! assert!(tournament.matches.is_empty());
//! ```

pub mod config;
pub mod errors;
pub mod id;
pub mod models;

pub use config::{
    Format, MAX_COURT_NAME_LEN, MAX_COURTS, MAX_PLAYER_NAME_LEN, MAX_PLAYERS, MAX_RANDOM_ROUNDS,
    MAX_TOURNAMENT_NAME_LEN, MIN_PLAYERS, MatchupStyle, PointsPerGame, TournamentSettings,
};
pub use errors::{TournamentError, TournamentResult};
pub use id::TournamentId;
pub use models::{
    Match, Outcome, Player, PlayerIndex, Team, TeamSide, Tournament, derived_scores,
};
