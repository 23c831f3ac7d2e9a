//! Plain-text rendering of rounds and standings.

use doubles_draw::{
    Match, Stats, Tournament,
    rounds::{pausing_players, remaining_count, round_matches, total_rounds},
};

fn team_names(t: &Tournament, team: [usize; 2]) -> String {
    let name = |p: usize| t.players.get(p).map_or("?", |player| player.name.as_str());
    format!("{} & {}", name(team[0]), name(team[1]))
}

fn result(t: &Tournament, m: &Match) -> String {
    match m.team_scores(t.points_per_game()) {
        Some((score1, score2)) => format!("{score1}-{score2}"),
        None if m.is_finished => "finished".to_string(),
        None => "-".to_string(),
    }
}

/// Matches of one round with their courts, results and sitting players.
pub fn round(t: &Tournament, round: usize) -> String {
    let mut lines = vec![format!(
        "Round {} of {} ({} open)",
        round,
        total_rounds(t),
        remaining_count(t, round)
    )];
    for (court, m) in round_matches(t, round).iter().enumerate() {
        lines.push(format!(
            "  {}. {:<12} {} vs {}  {}",
            court + 1,
            t.court_label(court),
            team_names(t, m.team1),
            team_names(t, m.team2),
            result(t, m)
        ));
    }

    let sitting: Vec<&str> = pausing_players(t, round)
        .into_iter()
        .filter_map(|p| t.players.get(p).map(|player| player.name.as_str()))
        .collect();
    if !sitting.is_empty() {
        lines.push(format!("  Sitting out: {}", sitting.join(", ")));
    }
    to_block(lines)
}

pub fn standings(t: &Tournament, stats: &Stats) -> String {
    let mut lines: Vec<String> = t.name.iter().cloned().collect();
    lines.push(format!(
        "After {} completed rounds ({:?})",
        stats.completed_rounds, stats.status
    ));
    lines.push(format!(
        "{:>4}  {:<16} {:>3} {:>3} {:>3} {:>6} {:>6} {:>5} {:>6}",
        "#", "Player", "W", "D", "L", "Pts", "PPG", "Win%", "Total"
    ));
    for s in &stats.standings {
        lines.push(format!(
            "{:>4}  {:<16} {:>3} {:>3} {:>3} {:>6} {:>6.2} {:>5.0} {:>6}",
            s.rank,
            s.name,
            s.wins,
            s.draws,
            s.losses,
            s.points,
            s.points_per_game,
            s.win_rate * 100.0,
            s.total_points_with_sitting
        ));
    }
    to_block(lines)
}

fn to_block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
