//! Boarding War - Headless War Runner
//!
//! Loads (or generates) two rosters, runs a war between them and prints the
//! combat log. With `--step` the war pauses after every round until Enter.

use boarding_war::core::config::{load_config, WarConfig};
use boarding_war::core::dice::SeededRng;
use boarding_war::core::error::Result;
use boarding_war::war::{
    load_roster_book, random_roster, FinalTally, Roster, RosterBook, War, WarPhase,
};

use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Boarding War - AI vs AI squad battles
#[derive(Parser, Debug)]
#[command(name = "boarding-war")]
#[command(about = "Run an automated war between two rosters and print the combat log")]
struct Args {
    /// Roster book JSON ({ "Group 1": [...], ... }); random rosters when omitted
    #[arg(long)]
    rosters: Option<PathBuf>,

    /// Name of the first roster
    #[arg(long, default_value = "Group 1")]
    group1: String,

    /// Name of the second roster
    #[arg(long, default_value = "Group 2")]
    group2: String,

    /// Members per generated roster
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// War config TOML (defaults apply to missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause after every round; Enter continues, q stops
    #[arg(long)]
    step: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct WarResult<'a> {
    seed: u64,
    rounds: u32,
    tally: Option<&'a FinalTally>,
    rosters: Option<(&'a Roster, &'a Roster)>,
    log: &'a [String],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("boarding_war=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = SeededRng::seeded(seed);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => WarConfig::default(),
    };

    let book = match &args.rosters {
        Some(path) => load_roster_book(path)?,
        None => {
            let mut book = RosterBook::new();
            for name in [&args.group1, &args.group2] {
                let roster = random_roster(name, args.size, &mut rng);
                book.store(&roster);
            }
            book
        }
    };

    let mut war = War::new(config, rng)?;
    let mut printed = 0;
    war.start(&book, &args.group1, &args.group2)?;

    let text = args.format != "json";
    loop {
        if text {
            printed = print_new_lines(&war, printed);
        }
        if war.phase() != WarPhase::Paused {
            break;
        }
        if args.step && !wait_for_continue(war.round())? {
            tracing::info!("War stopped by user after round {}", war.round());
            break;
        }
        war.continue_war()?;
    }

    if !text {
        let result = WarResult {
            seed,
            rounds: war.round(),
            tally: war.tally(),
            rosters: war.rosters(),
            log: war.log().lines(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn print_new_lines<R: boarding_war::core::dice::RandomSource>(war: &War<R>, from: usize) -> usize {
    let lines = war.log().lines();
    for line in &lines[from.min(lines.len())..] {
        println!("{}", line);
    }
    lines.len()
}

/// Prompt between rounds; false means stop
fn wait_for_continue(round: u32) -> Result<bool> {
    print!("Press Enter to continue to round {} (q to stop) > ", round + 1);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();
    Ok(!(input == "q" || input == "quit"))
}
