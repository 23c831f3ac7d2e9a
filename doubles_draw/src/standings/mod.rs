//! Standings calculator.
//!
//! Standings are derived, never stored: [`compute_stats`] walks the decided
//! matches of a tournament (optionally only the first `n` rounds) and ranks
//! every player by, in order:
//!
//! 1. points per game (within 0.001)
//! 2. win rate (within 0.001)
//! 3. total points including the sitting-out credit
//! 4. wins
//! 5. draws
//! 6. name, ascending
//!
//! Players equal on the first five criteria share a rank and the next rank
//! is skipped (`1, 2, 2, 4`).

pub mod ranking;
pub mod stats;

pub use ranking::{EPSILON, compare_performance, compare_standings, rank_standings};
pub use stats::{PlayerStanding, Stats, TournamentStatus, compute_stats};
