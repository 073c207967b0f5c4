#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Scavenger headlessly.

mod config;
mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use session::{MemoryLedger, ScriptedInput, Session, SessionLimits, WanderingInput};

#[derive(Parser, Debug)]
#[command(name = "scavenger", about = "Headless turn-based dungeon crawl")]
struct Args {
    /// TOML configuration file; the classic tutorial board is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for level generation and wandering input.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of levels to play.
    #[arg(long, default_value_t = 3)]
    levels: u32,
    /// Player turns allowed per level before the run is abandoned.
    #[arg(long, default_value_t = 200)]
    max_turns: u32,
    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Where player directions come from.
    #[arg(long, value_enum, default_value_t = InputMode::Wander)]
    input: InputMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputMode {
    /// Random steps.
    Wander,
    /// Alternate right and up toward the exit.
    Script,
}

/// Entry point for the Scavenger command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    let limits = SessionLimits {
        levels: args.levels,
        max_turns: args.max_turns,
        tick: Duration::from_millis(args.tick_ms),
    };
    info!("seed {} for {} levels", args.seed, args.levels);

    let mut session = Session::new(
        config,
        ChaCha8Rng::seed_from_u64(args.seed),
        MemoryLedger::default(),
    );
    let outcome = match args.input {
        InputMode::Wander => {
            let rng = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(1));
            session.run(&mut WanderingInput::new(rng), limits)?
        }
        InputMode::Script => session.run(&mut ScriptedInput::toward_exit(), limits)?,
    };
    println!("{outcome}");
    Ok(())
}
