//! Round and lifecycle engine.
//!
//! Rounds are never stored. Round `r` is the `r`-th run of
//! `number_of_courts` matches in the flat match list, so every query here is
//! index arithmetic. Mutators take a `&Tournament` and return a new one.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::BTreeSet;

use crate::pairing::matches_per_round;
use crate::tournament::{
    Match, PlayerIndex, TeamSide, Tournament, TournamentError, TournamentResult,
};

/// Number of rounds in the record, counting a trailing partial round.
pub fn total_rounds(t: &Tournament) -> usize {
    t.matches.len().div_ceil(t.settings.number_of_courts.max(1))
}

fn round_range(t: &Tournament, round: usize) -> Option<std::ops::Range<usize>> {
    if round < 1 || round > total_rounds(t) {
        return None;
    }
    let courts = t.settings.number_of_courts.max(1);
    let start = (round - 1) * courts;
    Some(start..(start + courts).min(t.matches.len()))
}

/// Matches of a round; empty for `round < 1` or past the last round.
pub fn round_matches(t: &Tournament, round: usize) -> &[Match] {
    match round_range(t, round) {
        Some(range) => &t.matches[range],
        None => &[],
    }
}

pub fn is_round_complete(t: &Tournament, round: usize) -> bool {
    let matches = round_matches(t, round);
    !matches.is_empty() && matches.iter().all(|m| m.is_finished)
}

pub fn remaining_count(t: &Tournament, round: usize) -> usize {
    round_matches(t, round)
        .iter()
        .filter(|m| !m.is_finished)
        .count()
}

/// Players without a match in the round, in index order.
pub fn pausing_players(t: &Tournament, round: usize) -> Vec<PlayerIndex> {
    let playing: BTreeSet<PlayerIndex> = round_matches(t, round)
        .iter()
        .flat_map(Match::players)
        .collect();
    (0..t.player_count())
        .filter(|p| !playing.contains(p))
        .collect()
}

pub fn is_last_round(t: &Tournament, round: usize) -> bool {
    round == total_rounds(t)
}

/// Complete rounds counted from round 1 up to the first incomplete one.
pub fn completed_rounds(t: &Tournament) -> usize {
    (1..=total_rounds(t))
        .take_while(|&round| is_round_complete(t, round))
        .count()
}

/// The only gate for generating a new round: the tournament is open and
/// `round` is the last round and it is complete.
pub fn can_generate_next(t: &Tournament, round: usize) -> bool {
    !t.is_finished() && is_last_round(t, round) && is_round_complete(t, round)
}

/// Replace one match of a round.
///
/// Out-of-range positions and finished tournaments leave the record unchanged.
pub fn update_match(t: &Tournament, round: usize, local: usize, new_match: Match) -> Tournament {
    let mut updated = t.clone();
    if t.is_finished() {
        warn!("Ignoring match update on finished tournament {}", t.id);
        return updated;
    }

    match round_range(t, round) {
        Some(range) if local < range.len() => {
            updated.matches[range.start + local] = new_match;
        }
        _ => warn!(
            "Ignoring update of match {} in round {} of tournament {}",
            local, round, t.id
        ),
    }
    updated
}

/// Record the result of a match.
pub fn record_result(
    t: &Tournament,
    round: usize,
    local: usize,
    winner: TeamSide,
    score_delta: u8,
) -> TournamentResult<Tournament> {
    let current = current_match(t, round, local)?;
    let decided = current.with_result(winner, score_delta, t.points_per_game())?;
    Ok(update_match(t, round, local, decided))
}

/// Reopen a match. Only matches of the last round can be reopened, since
/// later rounds were paired from earlier results.
pub fn clear_result(t: &Tournament, round: usize, local: usize) -> TournamentResult<Tournament> {
    let current = current_match(t, round, local)?;
    if !is_last_round(t, round) {
        return Err(TournamentError::RoundClosed(round));
    }
    Ok(update_match(t, round, local, current.cleared()))
}

fn current_match(t: &Tournament, round: usize, local: usize) -> TournamentResult<Match> {
    if t.is_finished() {
        return Err(TournamentError::AlreadyFinished);
    }
    round_matches(t, round)
        .get(local)
        .cloned()
        .ok_or(TournamentError::MatchNotFound { round, local })
}

/// Append a freshly generated round.
///
/// A no-op when the tournament is finished, the current round is still in
/// progress, or the round does not fill exactly every court. A short round
/// would shift every later round boundary.
pub fn append_round(t: &Tournament, new_matches: Vec<Match>) -> Tournament {
    let last = total_rounds(t);
    let eligible = if t.matches.is_empty() {
        !t.is_finished()
    } else {
        can_generate_next(t, last)
    };

    if !eligible || new_matches.len() != matches_per_round(t) {
        warn!(
            "Refusing to append {} matches to tournament {} after round {}",
            new_matches.len(),
            t.id,
            last
        );
        return t.clone();
    }

    debug!("Tournament {} starts round {}", t.id, last + 1);
    let mut updated = t.clone();
    updated.matches.extend(new_matches);
    updated
}

/// Close the tournament now. See [`finish_at`].
pub fn finish(t: &Tournament) -> Tournament {
    finish_at(t, Utc::now())
}

/// Close the tournament at the given instant, kept to millisecond precision.
///
/// The caller must check that the tournament is not already finished.
pub fn finish_at(t: &Tournament, at: DateTime<Utc>) -> Tournament {
    let at = DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at);
    debug!("Tournament {} finished after {} rounds", t.id, total_rounds(t));
    Tournament {
        finished_at: Some(at),
        ..t.clone()
    }
}

/// Resolve a requested round number.
///
/// Missing, non-numeric and out-of-range requests fall back to the last
/// round. With no rounds at all, round 1 is returned.
pub fn parse_round_selector(t: &Tournament, raw: Option<&str>) -> usize {
    let last = total_rounds(t).max(1);
    raw.and_then(|r| r.trim().parse::<usize>().ok())
        .filter(|r| (1..=last).contains(r))
        .unwrap_or(last)
}
