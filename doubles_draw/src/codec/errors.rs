//! Codec error types.

use thiserror::Error;

use crate::tournament::TournamentError;

/// Errors raised while encoding or decoding a shared tournament.
///
/// Decoders never hand back a partial record: any failure while reading is
/// one of these, and callers are expected to treat them all as bad data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Truncated, malformed or inconsistent input
    #[error("Corrupt tournament data: {0}")]
    Corrupt(String),

    /// Header version this build cannot read
    #[error("Unsupported tournament data version {0}")]
    UnsupportedVersion(u8),

    /// The record to encode breaks the data model
    #[error("Cannot encode invalid tournament: {0}")]
    InvalidRecord(#[from] TournamentError),

    /// More matches than the match counter can hold
    #[error("Too many matches to encode: {count} (max {max})")]
    TooManyMatches { count: usize, max: usize },
}

impl CodecError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt(reason.into())
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
