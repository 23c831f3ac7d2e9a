//! # Doubles Draw
//!
//! A round-based doubles tournament engine: pairing, progression, standings
//! and a compact share format.
//!
//! Everything here is a pure function over a [`Tournament`] value. Mutators
//! return a new record, randomness is passed in by the caller, and nothing
//! performs I/O.
//!
//! ## Core Modules
//!
//! - [`tournament`]: The record itself, its settings, limits and errors
//! - [`rounds`]: Round slicing, completion checks and lifecycle transitions
//! - [`pairing`]: Next-round generation for round-robin and ranking-adaptive play
//! - [`standings`]: Per-player statistics and the ranking cascade
//! - [`codec`]: Versioned binary encoding and its URL-safe text form
//!
//! ## Example
//!
//! ```
//! use doubles_draw::{
//!     TeamSide, Tournament, TournamentSettings, compute_stats, generate_next_round,
//!     rounds::{append_round, record_result},
//! };
//!
//! let mut rng = rand::rng();
//! let t = Tournament::new(
//!     None,
//!     TournamentSettings::default(),
//!     &["Ana", "Ben", "Cleo", "Dev", "Eve"],
//!     &mut rng,
//! )
//! .unwrap();
//!
//! let t = append_round(&t, generate_next_round(&t, &mut rng));
//! let t = record_result(&t, 1, 0, TeamSide::Team1, 4).unwrap();
//!
//! let stats = compute_stats(&t, None);
//! assert_eq!(stats.completed_rounds, 1);
//! assert_eq!(stats.standings.iter().filter(|s| s.games_sitting == 1).count(), 1);
//! ```

/// Tournament record, settings and validation.
pub mod tournament;
pub use tournament::{
    Format, Match, MatchupStyle, Player, PlayerIndex, PointsPerGame, Team, TeamSide, Tournament,
    TournamentError, TournamentId, TournamentResult, TournamentSettings,
};

/// Round and lifecycle engine.
pub mod rounds;

/// Next-round generation.
pub mod pairing;
pub use pairing::generate_next_round;

/// Standings and ranking.
pub mod standings;
pub use standings::{PlayerStanding, Stats, TournamentStatus, compute_stats};

/// Binary and text share format.
pub mod codec;
pub use codec::{CodecError, CodecResult, decode_from_text, encode_to_text};
