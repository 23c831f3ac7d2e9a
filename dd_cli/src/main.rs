//! Command-line front end for doubles tournaments.
//!
//! The tournament lives in a JSON file; every command reads it, applies one
//! engine operation and writes the new record back.

mod render;

use anyhow::{Context, Result, anyhow, bail};
use doubles_draw::{
    Format, MatchupStyle, PointsPerGame, TeamSide, Tournament, TournamentSettings,
    codec::{decode_from_text, encode_to_text},
    compute_stats, generate_next_round,
    rounds::{
        append_round, can_generate_next, clear_result, finish, parse_round_selector,
        record_result, total_rounds,
    },
};
use log::{debug, info};
use pico_args::Arguments;
use rand::{SeedableRng, rngs::StdRng};
use std::{
    fs,
    path::{Path, PathBuf},
};

const HELP: &str = "\
Run a round-based doubles tournament

USAGE:
  dd <COMMAND> FILE [OPTIONS]

COMMANDS:
  new FILE             Create a tournament
  next FILE            Generate and append the next round
  show FILE            Print the matches of a round
  score FILE           Record (or clear) a match result
  standings FILE       Print the standings
  finish FILE          Close the tournament
  share FILE           Print a share token for the tournament
  import TOKEN FILE    Write the tournament from a share token to FILE

NEW OPTIONS:
  --players LIST       Comma-separated player names (4-40)
  --name NAME          Tournament name
  --courts N           Number of courts  [default: 1]
  --points N           Points per game: 16, 21, 24 or 32  [default: 24]
  --adaptive           Ranking-adaptive format instead of round-robin
  --style A|B          Matchup style, 1&4 vs 2&3 (A) or 1&3 vs 2&4 (B)  [default: A]
  --random-rounds N    Random rounds before ranked pairing  [default: 2]
  --fixed-pairs        Keep partners (1&2, 3&4, ...) for the whole tournament

SCORE OPTIONS:
  --round N            Round  [default: last round]
  --match N            Match within the round, from 1
  --winner 1|2         Winning team
  --delta N            Point difference, 0 for a draw
  --clear              Reopen the match instead

SHOW/STANDINGS OPTIONS:
  --round N            Round  [default: last round]
  --json               Print standings as JSON

FLAGS:
  -h, --help           Print help information

ENVIRONMENT:
  DD_SEED              Seed for the random source, for reproducible draws
  RUST_LOG             Log level (e.g., debug)
";

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let command: String = pargs
        .free_from_str()
        .context("Missing command, see --help")?;
    match command.as_str() {
        "new" => cmd_new(&mut pargs),
        "next" => cmd_next(&mut pargs),
        "show" => cmd_show(&mut pargs),
        "score" => cmd_score(&mut pargs),
        "standings" => cmd_standings(&mut pargs),
        "finish" => cmd_finish(&mut pargs),
        "share" => cmd_share(&mut pargs),
        "import" => cmd_import(&mut pargs),
        other => bail!("Unknown command '{}', see --help", other),
    }
}

fn rng() -> StdRng {
    match std::env::var("DD_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => {
            debug!("Seeding random source with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}

fn file_arg(pargs: &mut Arguments) -> Result<PathBuf> {
    pargs
        .free_from_str()
        .context("Missing tournament FILE, see --help")
}

fn load(path: &Path) -> Result<Tournament> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let t = Tournament::from_json(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    t.validate()
        .with_context(|| format!("Invalid tournament in {}", path.display()))?;
    Ok(t)
}

fn save(path: &Path, t: &Tournament) -> Result<()> {
    fs::write(path, t.to_json()?).with_context(|| format!("Failed to write {}", path.display()))
}

fn cmd_new(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let players: String = pargs
        .value_from_str("--players")
        .context("--players is required")?;
    let name: Option<String> = pargs.opt_value_from_str("--name")?;
    let courts: usize = pargs.opt_value_from_str("--courts")?.unwrap_or(1);
    let points: u8 = pargs.opt_value_from_str("--points")?.unwrap_or(24);
    let adaptive = pargs.contains("--adaptive");
    let style: String = pargs
        .opt_value_from_str("--style")?
        .unwrap_or_else(|| "A".to_string());
    let random_rounds: u8 = pargs.opt_value_from_str("--random-rounds")?.unwrap_or(2);
    let is_fixed_pairs = pargs.contains("--fixed-pairs");

    let format = if adaptive {
        let matchup_style = match style.to_ascii_uppercase().as_str() {
            "A" => MatchupStyle::Balanced,
            "B" => MatchupStyle::Staggered,
            other => bail!("Unknown matchup style '{}', expected A or B", other),
        };
        Format::RankingAdaptive {
            matchup_style,
            random_rounds,
        }
    } else {
        Format::RoundRobin
    };
    let settings = TournamentSettings {
        format,
        points_per_game: PointsPerGame::try_from(points)?,
        number_of_courts: courts,
        is_fixed_pairs,
    };

    let names: Vec<&str> = players.split(',').collect();
    let t = Tournament::new(name.as_deref(), settings, &names, &mut rng())?;
    save(&path, &t)?;
    info!("Created tournament {} with {} players", t.id, t.player_count());
    println!("{}", t.id);
    Ok(())
}

fn cmd_next(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let t = load(&path)?;

    let round = generate_next_round(&t, &mut rng());
    if round.is_empty() {
        let last = total_rounds(&t);
        if t.is_finished() {
            bail!("Tournament {} is finished", t.id);
        } else if last > 0 && !can_generate_next(&t, last) {
            bail!("Round {} still has unfinished matches", last);
        }
        bail!("No round can be generated for tournament {}", t.id);
    }

    let t = append_round(&t, round);
    save(&path, &t)?;
    print!("{}", render::round(&t, total_rounds(&t)));
    Ok(())
}

fn cmd_show(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let raw: Option<String> = pargs.opt_value_from_str("--round")?;
    let t = load(&path)?;
    if t.matches.is_empty() {
        println!("No rounds yet");
        return Ok(());
    }
    print!("{}", render::round(&t, parse_round_selector(&t, raw.as_deref())));
    Ok(())
}

fn cmd_score(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let raw_round: Option<String> = pargs.opt_value_from_str("--round")?;
    let number: usize = pargs.value_from_str("--match").context("--match is required")?;
    let clear = pargs.contains("--clear");
    let t = load(&path)?;

    let round = parse_round_selector(&t, raw_round.as_deref());
    let local = number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Matches are numbered from 1"))?;

    let t = if clear {
        clear_result(&t, round, local)?
    } else {
        let winner = match pargs.value_from_str::<_, u8>("--winner")? {
            1 => TeamSide::Team1,
            2 => TeamSide::Team2,
            other => bail!("Winner must be 1 or 2, got {}", other),
        };
        let delta: u8 = pargs.value_from_str("--delta").context("--delta is required")?;
        record_result(&t, round, local, winner, delta)?
    };

    save(&path, &t)?;
    print!("{}", render::round(&t, round));
    Ok(())
}

fn cmd_standings(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let raw: Option<String> = pargs.opt_value_from_str("--round")?;
    let json = pargs.contains("--json");
    let t = load(&path)?;

    let up_to = raw.as_deref().map(|r| parse_round_selector(&t, Some(r)));
    let stats = compute_stats(&t, up_to);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render::standings(&t, &stats));
    }
    Ok(())
}

fn cmd_finish(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let t = load(&path)?;
    if t.is_finished() {
        bail!("Tournament {} is already finished", t.id);
    }
    let t = finish(&t);
    save(&path, &t)?;
    print!("{}", render::standings(&t, &compute_stats(&t, None)));
    Ok(())
}

fn cmd_share(pargs: &mut Arguments) -> Result<()> {
    let path = file_arg(pargs)?;
    let t = load(&path)?;
    let token = encode_to_text(&t)?;
    debug!("Share token for {} is {} characters", t.id, token.len());
    println!("{token}");
    Ok(())
}

fn cmd_import(pargs: &mut Arguments) -> Result<()> {
    let token: String = pargs.free_from_str().context("Missing share TOKEN")?;
    let path = file_arg(pargs)?;
    let t = decode_from_text(&token).context("Invalid share token")?;
    save(&path, &t)?;
    info!("Imported tournament {} ({} matches)", t.id, t.matches.len());
    println!("{}", t.id);
    Ok(())
}
