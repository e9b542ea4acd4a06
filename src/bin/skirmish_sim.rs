//! Headless Skirmish Runner
//!
//! Runs hero-vs-goblin battles with random policies on both sides and
//! reports win rates, for checking balance changes in a config file.

use clap::Parser;
use serde::Serialize;
use skirmish::combat::{CombatOutcome, CombatSession, RandomPolicy, TurnState};
use skirmish::core::config::CombatConfig;
use skirmish::core::error::Result;
use skirmish::entity::Archetype;
use skirmish::narration;
use tracing_subscriber::EnvFilter;

/// Headless Skirmish Runner - random hero vs random goblin
#[derive(Parser, Debug)]
#[command(name = "skirmish_sim")]
#[command(about = "Run hero vs goblin battles and report outcomes")]
struct Args {
    /// Number of battles to run
    #[arg(long, default_value_t = 100)]
    battles: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Combat config (TOML)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Stop a battle after this many actions and count it as unresolved
    #[arg(long, default_value_t = 1000)]
    max_turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every battle transcript to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Default, Serialize)]
struct SimulationSummary {
    battles: u32,
    hero_wins: u32,
    goblin_wins: u32,
    unresolved: u32,
    hero_win_rate: f32,
    average_turns: f32,
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skirmish=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let summary = run_battles(&config, &args, seed)?;

    match args.format.as_str() {
        "text" => {
            println!("Battles:      {}", summary.battles);
            println!("Hero wins:    {}", summary.hero_wins);
            println!("Goblin wins:  {}", summary.goblin_wins);
            println!("Unresolved:   {}", summary.unresolved);
            println!("Win rate:     {:.1}%", summary.hero_win_rate * 100.0);
            println!("Avg turns:    {:.1}", summary.average_turns);
            println!("Seed:         {}", summary.seed);
        }
        _ => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn run_battles(config: &CombatConfig, args: &Args, seed: u64) -> Result<SimulationSummary> {
    let mut summary = SimulationSummary {
        seed,
        ..Default::default()
    };
    let mut resolved_turns = 0u64;

    // Hero picks from its whole loadout; the goblin keeps the configured limit
    let mut hero_policy = RandomPolicy::with_seed(seed, config.hero.actions.len());
    let mut goblin_policy =
        RandomPolicy::with_seed(seed.wrapping_add(1), config.policy.opponent_choice_limit);

    for battle in 0..args.battles {
        let mut hero = Archetype::Hero.spawn(config);
        let mut goblin = Archetype::Goblin.spawn(config);
        let mut session = CombatSession::new(&mut hero, &mut goblin);

        while !session.state().is_finished() && session.turn() < args.max_turns {
            session.step(&mut hero_policy, &mut goblin_policy)?;
        }

        if args.verbose {
            eprintln!("=== Battle {} ===", battle + 1);
            eprintln!("{}", narration::transcript(session.events()));
        }

        summary.battles += 1;
        match session.state() {
            TurnState::Finished(outcome) => {
                resolved_turns += u64::from(session.turn());
                match outcome {
                    CombatOutcome::ControlledWon => summary.hero_wins += 1,
                    CombatOutcome::ControlledLost => summary.goblin_wins += 1,
                }
            }
            TurnState::Awaiting(_) => {
                tracing::warn!(battle, turns = session.turn(), "battle hit the turn limit");
                summary.unresolved += 1;
            }
        }
    }

    let resolved = summary.hero_wins + summary.goblin_wins;
    if summary.battles > 0 {
        summary.hero_win_rate = summary.hero_wins as f32 / summary.battles as f32;
    }
    if resolved > 0 {
        summary.average_turns = resolved_turns as f32 / resolved as f32;
    }
    Ok(summary)
}
