//! Headless host loop that drives the world, the generator, and the turn
//! coordinator through whole levels.

use std::{collections::VecDeque, fmt, time::Duration};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::Rng;
use scavenger_core::{
    Command, Event, FoodLedger, FoodPoints, InputSource, LevelLayout, LevelNumber, Participant,
    StepInput,
};
use scavenger_system_layout::LevelLayoutGenerator;
use scavenger_system_turns::TurnCoordinator;
use scavenger_world::{self as world, query, World};

use crate::config::GameConfig;

/// Keeps the carried food in memory between levels.
#[derive(Debug, Default)]
pub(crate) struct MemoryLedger {
    food: Option<FoodPoints>,
}

impl FoodLedger for MemoryLedger {
    fn load(&self) -> Option<FoodPoints> {
        self.food
    }

    fn store(&mut self, food: FoodPoints) {
        self.food = Some(food);
    }
}

/// Replays a fixed list of steps, starting over when it runs out.
#[derive(Debug)]
pub(crate) struct ScriptedInput {
    script: Vec<StepInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub(crate) fn new(script: Vec<StepInput>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Staircase toward the exit in the top-right corner.
    pub(crate) fn toward_exit() -> Self {
        Self::new(vec![StepInput::RIGHT, StepInput::UP])
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> StepInput {
        let Some(input) = self.script.get(self.cursor).copied() else {
            return StepInput::NONE;
        };
        self.cursor = (self.cursor + 1) % self.script.len();
        input
    }
}

/// Picks a random direction on every poll. Some polls yield no direction.
#[derive(Debug)]
pub(crate) struct WanderingInput<R> {
    rng: R,
}

impl<R: Rng> WanderingInput<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> InputSource for WanderingInput<R> {
    fn poll(&mut self) -> StepInput {
        let horizontal = self.rng.gen_range(-1..=1);
        let vertical = self.rng.gen_range(-1..=1);
        StepInput::normalized(horizontal, vertical)
    }
}

/// Bounds on a single run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionLimits {
    pub(crate) levels: u32,
    pub(crate) max_turns: u32,
    pub(crate) tick: Duration,
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Every requested level was cleared.
    Completed { levels: u32, food: FoodPoints },
    /// The player ran out of food.
    Starved { level: LevelNumber },
    /// The player used up the turn allowance on a level.
    TurnLimit { level: LevelNumber },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { levels, food } => {
                write!(f, "cleared {levels} levels with {} food left", food.get())
            }
            Self::Starved { level } => write!(f, "starved on day {}", level.get()),
            Self::TurnLimit { level } => write!(f, "ran out of turns on day {}", level.get()),
        }
    }
}

enum LevelEnd {
    Cleared(FoodPoints),
    Starved,
}

/// Owns every simulation component of one run.
pub(crate) struct Session<R, L> {
    world: World,
    coordinator: TurnCoordinator,
    generator: LevelLayoutGenerator,
    rng: R,
    ledger: L,
    starting_food: FoodPoints,
}

impl<R: Rng, L: FoodLedger> Session<R, L> {
    pub(crate) fn new(config: GameConfig, rng: R, ledger: L) -> Self {
        Self {
            world: World::new(config.world),
            coordinator: TurnCoordinator::new(config.turns),
            generator: LevelLayoutGenerator::new(config.layout),
            rng,
            ledger,
            starting_food: config.starting_food,
        }
    }

    /// Plays levels until the limits are reached or the player starves.
    pub(crate) fn run(
        &mut self,
        input: &mut dyn InputSource,
        limits: SessionLimits,
    ) -> Result<Outcome> {
        let mut level = LevelNumber::FIRST;
        for played in 0..limits.levels {
            if played > 0 {
                level = level
                    .next()
                    .with_context(|| format!("no day follows day {}", level.get()))?;
            }
            let food = self.ledger.load().unwrap_or(self.starting_food);
            let layout = self
                .generator
                .generate(level, &mut self.rng)
                .with_context(|| format!("failed to generate day {}", level.get()))?;
            info!("Day {}", level.get());
            let begun = self.begin_level(level, layout, food);

            match begun.or_else(|| self.play_level(input, limits)) {
                Some(LevelEnd::Cleared(food)) => self.ledger.store(food),
                Some(LevelEnd::Starved) => return Ok(Outcome::Starved { level }),
                None => return Ok(Outcome::TurnLimit { level }),
            }
        }

        Ok(Outcome::Completed {
            levels: limits.levels,
            food: self.ledger.load().unwrap_or(self.starting_food),
        })
    }

    /// Starts a level. A level that ends while it is being set up reports
    /// how it ended.
    fn begin_level(
        &mut self,
        level: LevelNumber,
        layout: LevelLayout,
        food: FoodPoints,
    ) -> Option<LevelEnd> {
        self.pump(vec![Command::BeginLevel {
            level,
            layout,
            food,
        }])
    }

    fn play_level(
        &mut self,
        input: &mut dyn InputSource,
        limits: SessionLimits,
    ) -> Option<LevelEnd> {
        let mut turns = 0;
        loop {
            let mut commands = Vec::new();
            if self.coordinator.accepts_player_input() {
                if turns >= limits.max_turns {
                    return None;
                }
                let step = input.poll();
                let snapshot = query::actor_snapshot(&self.world);
                match self
                    .coordinator
                    .submit_player_action(step, snapshot, &mut commands)
                {
                    Ok(()) => turns += 1,
                    Err(error) => debug!("input ignored: {error}"),
                }
            }
            if commands.is_empty() {
                commands.push(Command::Tick { dt: limits.tick });
            }

            if let Some(end) = self.pump(commands) {
                return Some(end);
            }
        }
    }

    /// Applies commands and feeds every resulting event batch to the
    /// coordinator until nothing is left to apply.
    fn pump(&mut self, commands: Vec<Command>) -> Option<LevelEnd> {
        let mut pending: VecDeque<Command> = commands.into();
        let mut end = None;
        while let Some(command) = pending.pop_front() {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);

            let mut out = Vec::new();
            let world = &self.world;
            self.coordinator
                .handle(&events, |actor| query::is_actor_live(world, actor), &mut out);

            for event in &events {
                present(event);
                match event {
                    Event::LevelCleared { food, .. } => end = Some(LevelEnd::Cleared(*food)),
                    Event::GameOver { .. } => end = Some(LevelEnd::Starved),
                    _ => {}
                }
            }
            pending.extend(out);
        }
        end
    }
}

fn present(event: &Event) {
    match event {
        Event::LevelStarted { level, actors } => {
            info!("day {} begins with {actors} enemies", level.get());
        }
        Event::ActorMoved {
            participant: Participant::Player,
            to,
            ..
        } => debug!("player moved to ({}, {})", to.x(), to.y()),
        Event::ActorMoved {
            participant: Participant::Enemy(actor),
            to,
            ..
        } => debug!("enemy {} moved to ({}, {})", actor.get(), to.x(), to.y()),
        Event::ActorBlocked {
            participant,
            obstacle,
            ..
        } => debug!("{participant:?} blocked by {obstacle:?}"),
        Event::PlayerDamaged { amount, remaining } => {
            info!("-{amount} food: {}", remaining.get());
        }
        Event::PlayerStepRejected { reason } => warn!("player step rejected: {reason:?}"),
        Event::WallDestroyed { cell } => debug!("wall at ({}, {}) destroyed", cell.x(), cell.y()),
        Event::FoodConsumed { points, total, .. } => {
            info!("+{points} food: {}", total.get());
        }
        Event::ActorDefeated { actor } => info!("enemy {} defeated", actor.get()),
        Event::LevelCleared { level, food } => {
            info!("day {} cleared with {} food", level.get(), food.get());
        }
        Event::GameOver { level } => info!("after {} days, you starved", level.get()),
        Event::TimeAdvanced { .. }
        | Event::ActorTurnTaken { .. }
        | Event::ActorTurnSkipped { .. }
        | Event::WallDamaged { .. } => {}
    }
}
