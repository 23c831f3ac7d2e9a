//! Bit-packed binary layout of a tournament.
//!
//! All fields are written high bit first, without alignment:
//!
//! | field                         | bits                       |
//! |-------------------------------|----------------------------|
//! | version tag                   | 8                          |
//! | format (0 round-robin)        | 1                          |
//! | points per game index         | 2                          |
//! | courts - 1                    | 4                          |
//! | fixed pairs                   | 1                          |
//! | player count                  | 6                          |
//! | matchup style, random rounds  | 1 + 3, ranking-adaptive only |
//! | has name, has court names, finished | 3                    |
//! | finished at, ms since epoch   | 64, if finished            |
//! | match count                   | 16                         |
//! | id, base-36 digits            | 9 x 6                      |
//! | name                          | string, if present         |
//! | court names                   | 4-bit count, then 4-bit court + string each, if present |
//! | players                       | string each                |
//! | matches                       | see below                  |
//!
//! Strings are an 8-bit byte length followed by UTF-8 bytes. A match is
//! four player indices of `width_for(player_count)` bits, a finished bit,
//! and for finished matches a result bit followed, if set, by the winner
//! bit and a 6-bit score delta. The last byte is zero padded.

use chrono::DateTime;
use std::collections::BTreeMap;

use super::bitio::{BitReader, BitWriter, width_for};
use super::errors::{CodecError, CodecResult};
use super::version::FormatVersion;
use crate::tournament::{
    Format, Match, MatchupStyle, Player, PointsPerGame, TeamSide, Tournament, TournamentId,
    TournamentSettings, id::ID_LEN,
};

/// Largest match list the 16-bit counter can describe.
pub const MAX_ENCODED_MATCHES: usize = u16::MAX as usize;

const COURT_BITS: u32 = 4;
const PLAYER_COUNT_BITS: u32 = 6;
const RANDOM_ROUNDS_BITS: u32 = 3;
const MATCH_COUNT_BITS: u32 = 16;
const ID_DIGIT_BITS: u32 = 6;
const DELTA_BITS: u32 = 6;

/// Encode a valid tournament to bytes.
pub fn encode(t: &Tournament) -> CodecResult<Vec<u8>> {
    t.validate()?;
    if t.matches.len() > MAX_ENCODED_MATCHES {
        return Err(CodecError::TooManyMatches {
            count: t.matches.len(),
            max: MAX_ENCODED_MATCHES,
        });
    }

    let mut w = BitWriter::new();
    write_tournament(t, &mut w);
    Ok(w.into_bytes())
}

fn write_tournament(t: &Tournament, w: &mut BitWriter) {
    w.write_bits(u64::from(FormatVersion::current().tag()), 8);

    let settings = &t.settings;
    w.write_bit(settings.format.is_ranking_adaptive());
    w.write_bits(u64::from(settings.points_per_game.index()), 2);
    w.write_bits((settings.number_of_courts - 1) as u64, COURT_BITS);
    w.write_bit(settings.is_fixed_pairs);
    w.write_bits(t.players.len() as u64, PLAYER_COUNT_BITS);
    if let Format::RankingAdaptive {
        matchup_style,
        random_rounds,
    } = settings.format
    {
        w.write_bit(matchup_style == MatchupStyle::Staggered);
        w.write_bits(u64::from(random_rounds), RANDOM_ROUNDS_BITS);
    }

    w.write_bit(t.name.is_some());
    w.write_bit(!t.court_names.is_empty());
    w.write_bit(t.finished_at.is_some());
    if let Some(at) = t.finished_at {
        w.write_bits(at.timestamp_millis() as u64, 64);
    }
    w.write_bits(t.matches.len() as u64, MATCH_COUNT_BITS);

    for digit in t.id.digits() {
        w.write_bits(u64::from(digit), ID_DIGIT_BITS);
    }
    if let Some(name) = &t.name {
        w.write_str(name);
    }
    if !t.court_names.is_empty() {
        w.write_bits(t.court_names.len() as u64, COURT_BITS);
        for (&court, label) in &t.court_names {
            w.write_bits(court as u64, COURT_BITS);
            w.write_str(label);
        }
    }
    for player in &t.players {
        w.write_str(&player.name);
    }

    let width = width_for(t.players.len());
    for m in &t.matches {
        for player in m.players() {
            w.write_bits(player as u64, width);
        }
        w.write_bit(m.is_finished);
        if m.is_finished {
            w.write_bit(m.winner.is_some());
            if let (Some(winner), Some(delta)) = (m.winner, m.score_delta) {
                w.write_bit(winner.bit());
                w.write_bits(u64::from(delta), DELTA_BITS);
            }
        }
    }
}

/// Decode bytes produced by [`encode`].
///
/// The decoded record is validated; anything short of a valid tournament is
/// reported as [`CodecError::Corrupt`].
pub fn decode(bytes: &[u8]) -> CodecResult<Tournament> {
    if bytes.is_empty() {
        return Err(CodecError::corrupt("empty input"));
    }
    let mut r = BitReader::new(bytes);
    let version = FormatVersion::from_tag(r.read_bits(8)? as u8)?;
    match version {
        FormatVersion::V1 => decode_v1(r),
    }
}

fn decode_v1(mut r: BitReader<'_>) -> CodecResult<Tournament> {
    let adaptive = r.read_bit()?;
    let points_per_game = PointsPerGame::from_index(r.read_bits(2)? as u8)
        .ok_or_else(|| CodecError::corrupt("points per game index"))?;
    let number_of_courts = r.read_bits(COURT_BITS)? as usize + 1;
    let is_fixed_pairs = r.read_bit()?;
    let player_count = r.read_bits(PLAYER_COUNT_BITS)? as usize;
    let format = if adaptive {
        let matchup_style = if r.read_bit()? {
            MatchupStyle::Staggered
        } else {
            MatchupStyle::Balanced
        };
        let random_rounds = r.read_bits(RANDOM_ROUNDS_BITS)? as u8;
        Format::RankingAdaptive {
            matchup_style,
            random_rounds,
        }
    } else {
        Format::RoundRobin
    };

    let has_name = r.read_bit()?;
    let has_court_names = r.read_bit()?;
    let finished_at = if r.read_bit()? {
        let millis = r.read_bits(64)? as i64;
        Some(
            DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| CodecError::corrupt("finish time out of range"))?,
        )
    } else {
        None
    };
    let match_count = r.read_bits(MATCH_COUNT_BITS)? as usize;

    let mut digits = [0u8; ID_LEN];
    for digit in &mut digits {
        *digit = r.read_bits(ID_DIGIT_BITS)? as u8;
    }
    let id = TournamentId::from_digits(digits).ok_or_else(|| CodecError::corrupt("id digit"))?;

    let name = if has_name { Some(r.read_str()?) } else { None };

    let mut court_names = BTreeMap::new();
    if has_court_names {
        let count = r.read_bits(COURT_BITS)?;
        for _ in 0..count {
            let court = r.read_bits(COURT_BITS)? as usize;
            let label = r.read_str()?;
            if court_names.insert(court, label).is_some() {
                return Err(CodecError::corrupt("duplicate court name"));
            }
        }
        if court_names.is_empty() {
            return Err(CodecError::corrupt("empty court name table"));
        }
    }

    let players = (0..player_count)
        .map(|_| r.read_str().map(|name| Player { name }))
        .collect::<CodecResult<Vec<_>>>()?;

    let width = width_for(player_count);
    // Each match needs at least its indices and finished bit.
    if r.remaining() < match_count * (4 * width as usize + 1) {
        return Err(CodecError::corrupt("unexpected end of data"));
    }
    let mut matches = Vec::with_capacity(match_count);
    for _ in 0..match_count {
        let mut indices = [0usize; 4];
        for index in &mut indices {
            *index = r.read_bits(width)? as usize;
        }
        let mut m = Match::new([indices[0], indices[1]], [indices[2], indices[3]]);
        m.is_finished = r.read_bit()?;
        if m.is_finished && r.read_bit()? {
            m.winner = Some(TeamSide::from_bit(r.read_bit()?));
            m.score_delta = Some(r.read_bits(DELTA_BITS)? as u8);
        }
        matches.push(m);
    }
    r.finish()?;

    let tournament = Tournament {
        id,
        name,
        settings: TournamentSettings {
            format,
            points_per_game,
            number_of_courts,
            is_fixed_pairs,
        },
        players,
        court_names,
        matches,
        finished_at,
    };
    tournament
        .validate()
        .map_err(|e| CodecError::corrupt(e.to_string()))?;
    Ok(tournament)
}
