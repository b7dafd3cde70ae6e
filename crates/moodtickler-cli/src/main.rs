//! MoodTickler headless driver
//!
//! Rolls the mood die without a renderer and reports what came up.
//!
//! # Usage
//!
//! ```bash
//! # Roll five times from seed 42
//! moodtickler roll --seed 42 --rolls 5
//!
//! # Same, with a custom resolver config and the history JSON
//! moodtickler roll --seed 42 --rolls 5 --config die.json --json
//!
//! # Face distribution over 10,000 seeds
//! moodtickler survey --seeds 10000
//!
//! # List the mood catalog
//! moodtickler moods
//! ```

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use moodtickler_core::dice::{DieResolver, Face, Outcome};
use moodtickler_core::{Mood, MoodSession, ResolverConfig};

/// Ticks to wait for a roll before giving up. Covers the default settle timeout.
const MAX_ROLL_TICKS: u32 = 5_000;

/// MoodTickler headless driver
#[derive(Parser, Debug)]
#[command(name = "moodtickler")]
#[command(author, version, about = "Roll the MoodTickler die without a renderer", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Roll the die through a mood session and print the history
    Roll {
        /// RNG seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Number of rolls
        #[arg(short, long, default_value = "1")]
        rolls: u32,

        /// Resolver config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also print the history in its storage JSON form
        #[arg(long)]
        json: bool,
    },

    /// Roll once per seed, in parallel, and print the face distribution
    Survey {
        /// Number of seeds, starting at 0
        #[arg(short = 'n', long, default_value = "1000")]
        seeds: u64,

        /// Resolver config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the mood catalog
    Moods,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("MoodTickler v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Roll {
            seed,
            rolls,
            config,
            json,
        } => run_roll(load_config(config.as_deref())?, seed, rolls, json),
        Commands::Survey { seeds, config } => run_survey(&load_config(config.as_deref())?, seeds),
        Commands::Moods => {
            list_moods();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ResolverConfig> {
    let Some(path) = path else {
        return Ok(ResolverConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = ResolverConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), "loaded resolver config");
    Ok(config)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

fn run_roll(config: ResolverConfig, seed: u64, rolls: u32, json: bool) -> anyhow::Result<()> {
    let mut session = MoodSession::new(config, seed)?;

    for roll in 1..=rolls {
        session.roll_die();
        let outcome = (0..MAX_ROLL_TICKS).find_map(|_| session.tick(now_ms()));
        let Some(outcome) = outcome else {
            bail!("roll {roll} did not resolve within {MAX_ROLL_TICKS} ticks");
        };
        print_outcome(roll, &outcome);
    }

    let stats = session.stats();
    println!();
    println!("{} moods recorded", stats.total());
    for slice in stats.slices() {
        println!(
            "  {:<10} {:>4}  {:>3}%  {}",
            slice.mood.label(),
            slice.count,
            slice.percent(),
            slice.color
        );
    }
    if let Some(mood) = stats.most_common() {
        println!("most common: {} {}", mood.data().emoji, mood);
    }

    if json {
        println!("{}", session.history().to_json()?);
    }
    Ok(())
}

fn print_outcome(roll: u32, outcome: &Outcome) {
    let data = outcome.mood.data();
    let forced = if outcome.forced { " (timed out)" } else { "" };
    println!(
        "roll {roll}: {} {}{forced} after tick {}",
        data.emoji, outcome.mood, outcome.tick
    );
    println!("  {}", data.message);
    println!("  {}", data.joke);
}

fn run_survey(config: &ResolverConfig, seeds: u64) -> anyhow::Result<()> {
    info!(seeds, "surveying die faces");

    let outcomes = (0..seeds)
        .into_par_iter()
        .map(|seed| -> anyhow::Result<Outcome> {
            let mut resolver = DieResolver::new(config.clone(), seed)?;
            resolver.roll();
            for _ in 0..MAX_ROLL_TICKS {
                resolver.tick();
                if let Some(outcome) = resolver.observer().first() {
                    return Ok(*outcome);
                }
            }
            bail!("seed {seed} did not resolve within {MAX_ROLL_TICKS} ticks")
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut counts = [0_u64; 6];
    let mut forced = 0_u64;
    for outcome in &outcomes {
        counts[outcome.face as usize] += 1;
        forced += u64::from(outcome.forced);
    }

    println!("{} rolls", outcomes.len());
    for face in Face::ALL {
        let count = counts[face as usize];
        #[allow(clippy::cast_precision_loss)]
        let share = if outcomes.is_empty() {
            0.0
        } else {
            count as f64 / outcomes.len() as f64 * 100.0
        };
        println!("  {:?} {:<8} {count:>6}  {share:>5.1}%", face, face.mood().label());
    }
    println!("timed out: {forced}");
    Ok(())
}

fn list_moods() {
    for mood in Mood::ALL {
        let data = mood.data();
        println!("{} {:<10} {}", data.emoji, mood.label(), data.color);
    }
}
