//! Skirmish - Entry Point
//!
//! Interactive console game: walk the dungeon with WASD, pick up
//! supplies, and fight the goblins you run into.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::combat::{PromptSelector, RandomPolicy};
use skirmish::core::config::CombatConfig;
use skirmish::core::error::{Result, SkirmishError};
use skirmish::entity::Archetype;
use skirmish::narration;
use skirmish::world::{GameMap, MoveOutcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Walk the dungeon and fight goblins in turn-based combat")]
struct Args {
    /// Random seed for the goblins' choices
    #[arg(long)]
    seed: Option<u64>,

    /// Combat config (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "skirmish=warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the transcript on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::new(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Skirmish starting...");

    let mut goblin_policy =
        RandomPolicy::from_config(ChaCha8Rng::seed_from_u64(seed), &config.policy);
    let mut hero = Archetype::Hero.spawn(&config);
    let mut map = GameMap::standard(&config);

    println!("Controls: W A S D to move, Q to quit");

    match play(&mut map, &mut hero, &mut goblin_policy) {
        Err(SkirmishError::InputClosed) => {}
        other => other?,
    }

    println!("Game over. Gold collected: {}", map.gold());
    Ok(())
}

fn play(
    map: &mut GameMap,
    hero: &mut skirmish::entity::Entity,
    goblin_policy: &mut RandomPolicy<ChaCha8Rng>,
) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("{}", map.render());
        print!("{}'s move >>> ", hero.name());
        io::stdout().flush()?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            return Err(SkirmishError::InputClosed);
        }
        let line = String::from_utf8_lossy(&raw).into_owned();

        for command in line.chars().filter(|c| !c.is_whitespace()) {
            let command = command.to_ascii_lowercase();
            if command == 'q' {
                return Ok(());
            }

            let mut prompt = PromptSelector::new(&mut input, io::stdout());
            let outcome = map.command(command, hero, &mut prompt, goblin_policy, |event| {
                println!("{}", narration::describe_event(event))
            })?;

            if let Some(text) = narration::describe_move(&outcome) {
                println!("{}", text);
            }
            if matches!(outcome, MoveOutcome::Defeated { .. }) {
                return Ok(());
            }
        }
        println!();
    }
}
