//! Compact tournament identity.
//!
//! An id is 9 lowercase base-36 characters: 5 encode the hours elapsed since
//! 2024-01-01T00:00Z, 4 are random. The hour prefix doubles as the creation
//! timestamp. Two tournaments created in the same hour collide with
//! probability 1 in 36^4.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{TournamentError, TournamentResult};

/// Number of characters in an id.
pub const ID_LEN: usize = 9;

const HOUR_DIGITS: usize = 5;
const RANDOM_DIGITS: usize = 4;
const ID_EPOCH_SECS: i64 = 1_704_067_200;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TournamentId(String);

impl TournamentId {
    /// Create an id for a tournament created at `now`.
    pub fn generate<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let max_hours = 36u64.pow(HOUR_DIGITS as u32) - 1;
        let hours = ((now.timestamp() - ID_EPOCH_SECS).max(0) / 3600) as u64;
        let random = rng.random_range(0..36u64.pow(RANDOM_DIGITS as u32));

        let mut id = to_base36(hours.min(max_hours), HOUR_DIGITS);
        id.push_str(&to_base36(random, RANDOM_DIGITS));
        Self(id)
    }

    pub fn parse(s: &str) -> TournamentResult<Self> {
        let valid = s.len() == ID_LEN && s.bytes().all(|b| digit_value(b).is_some());
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(TournamentError::InvalidId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time, truncated to the hour.
    pub fn created_at(&self) -> DateTime<Utc> {
        let hours = self.0.as_bytes()[..HOUR_DIGITS]
            .iter()
            .filter_map(|&b| digit_value(b))
            .fold(0i64, |acc, d| acc * 36 + i64::from(d));
        DateTime::from_timestamp(ID_EPOCH_SECS + hours * 3600, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// The base-36 digit values of every character, in order.
    pub fn digits(&self) -> [u8; ID_LEN] {
        let mut digits = [0; ID_LEN];
        for (slot, b) in digits.iter_mut().zip(self.0.bytes()) {
            *slot = digit_value(b).unwrap_or(0);
        }
        digits
    }

    /// Rebuild an id from digit values; `None` if any digit is out of range.
    pub fn from_digits(digits: [u8; ID_LEN]) -> Option<Self> {
        digits
            .iter()
            .map(|&d| ALPHABET.get(d as usize).map(|&b| b as char))
            .collect::<Option<String>>()
            .map(Self)
    }
}

impl TryFrom<String> for TournamentId {
    type Error = TournamentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TournamentId> for String {
    fn from(value: TournamentId) -> Self {
        value.0
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn digit_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'z' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn to_base36(mut value: u64, width: usize) -> String {
    let mut out = vec![b'0'; width];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_generate_has_fixed_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 14, 35, 0).unwrap();
        let id = TournamentId::generate(now, &mut rng);
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(TournamentId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_created_at_has_hour_resolution() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 14, 35, 12).unwrap();
        let id = TournamentId::generate(now, &mut rng);
        assert_eq!(
            id.created_at(),
            Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_epoch_start_is_all_zero_prefix() {
        let mut rng = StdRng::seed_from_u64(3);
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let id = TournamentId::generate(epoch, &mut rng);
        assert!(id.as_str().starts_with("00000"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(TournamentId::parse("abc").is_err());
        assert!(TournamentId::parse("ABCDEFGHI").is_err());
        assert!(TournamentId::parse("abcd-fghi").is_err());
        assert!(TournamentId::parse("0a1b2c3d4").is_ok());
    }

    #[test]
    fn test_digits_round_trip() {
        let id = TournamentId::parse("0a1b2c3dz").unwrap();
        assert_eq!(TournamentId::from_digits(id.digits()), Some(id));
        assert_eq!(TournamentId::from_digits([36; ID_LEN]), None);
    }
}
