#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn coordination between the player and the enemy phase.
//!
//! The coordinator is a pure system: it consumes world events and answers
//! with commands. Every wait in the cycle (level setup, the delay opening an
//! enemy phase, and each actor's move delay) is a [`Duration`] budget paid
//! for with simulated time reported by [`Event::TimeAdvanced`]. After issuing
//! an actor turn the coordinator yields so the host can apply the command and
//! feed the resulting events back; a [`Event::GameOver`] or
//! [`Event::LevelCleared`] in that feedback cancels the rest of the phase.

use std::{collections::VecDeque, time::Duration};

use log::debug;
use scavenger_core::{ActorHandle, ActorId, ActorSnapshot, Command, Event, StepInput, TurnState};
use thiserror::Error;

/// Delays that pace the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnConfig {
    level_start_delay: Duration,
    turn_delay: Duration,
}

impl TurnConfig {
    /// Creates a configuration from the level-start and inter-phase delays.
    #[must_use]
    pub const fn new(level_start_delay: Duration, turn_delay: Duration) -> Self {
        Self {
            level_start_delay,
            turn_delay,
        }
    }

    /// Time between a level starting and the first player turn.
    #[must_use]
    pub const fn level_start_delay(&self) -> Duration {
        self.level_start_delay
    }

    /// Time between the player's action and the first enemy turn.
    #[must_use]
    pub const fn turn_delay(&self) -> Duration {
        self.turn_delay
    }
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), Duration::from_millis(100))
    }
}

/// Reasons a player action was refused by the coordinator.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InputRejected {
    /// Input arrived outside the player's turn.
    #[error("player input is not accepted during {state:?}")]
    NotPlayerTurn {
        /// State the coordinator was in.
        state: TurnState,
    },
    /// The input carried no direction.
    #[error("player input carries no direction")]
    NullInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PhaseStep {
    /// Waiting out the delay that opens every phase.
    Opening,
    /// Extra delay charged when no actor was registered.
    Padding,
    /// Waiting out the move delay of the actor that just acted.
    AfterActor,
    /// Ready to hand the next actor its turn.
    Ready,
}

#[derive(Clone, Debug)]
struct EnemyPhase {
    queue: VecDeque<ActorHandle>,
    step: PhaseStep,
    remaining: Duration,
}

#[derive(Clone, Debug)]
enum Stage {
    /// No level is running.
    Idle,
    Setup { remaining: Duration },
    AwaitingPlayer,
    Phase(EnemyPhase),
}

/// Sequences player turns and enemy phases.
#[derive(Debug)]
pub struct TurnCoordinator {
    config: TurnConfig,
    stage: Stage,
    banked: Duration,
}

impl TurnCoordinator {
    /// Creates a coordinator that waits for a level to start.
    #[must_use]
    pub fn new(config: TurnConfig) -> Self {
        Self {
            config,
            stage: Stage::Idle,
            banked: Duration::ZERO,
        }
    }

    /// Current phase of the turn cycle.
    #[must_use]
    pub fn state(&self) -> TurnState {
        match self.stage {
            Stage::Idle | Stage::Setup { .. } => TurnState::LevelSetup,
            Stage::AwaitingPlayer => TurnState::PlayerTurn,
            Stage::Phase(_) => TurnState::EnemyPhaseRunning,
        }
    }

    /// Reports whether a player action would be accepted right now.
    #[must_use]
    pub fn accepts_player_input(&self) -> bool {
        matches!(self.stage, Stage::AwaitingPlayer)
    }

    /// Accepts the player's action and opens the enemy phase.
    ///
    /// The snapshot fixes which actors take part in the phase and in which
    /// order. Actors removed afterwards are skipped when their turn comes.
    pub fn submit_player_action(
        &mut self,
        input: StepInput,
        snapshot: ActorSnapshot,
        out: &mut Vec<Command>,
    ) -> Result<(), InputRejected> {
        if !self.accepts_player_input() {
            return Err(InputRejected::NotPlayerTurn {
                state: self.state(),
            });
        }
        if input.is_null() {
            return Err(InputRejected::NullInput);
        }

        out.push(Command::StepPlayer { input });
        debug!("enemy phase opened with {} actors", snapshot.len());
        self.banked = Duration::ZERO;
        self.stage = Stage::Phase(EnemyPhase {
            queue: snapshot.into_vec().into(),
            step: PhaseStep::Opening,
            remaining: self.config.turn_delay,
        });
        Ok(())
    }

    /// Consumes world events and emits at most one actor turn per call.
    ///
    /// `is_live` reports whether an actor is still registered; actors that
    /// are not are skipped without charging their move delay.
    pub fn handle<F>(&mut self, events: &[Event], is_live: F, out: &mut Vec<Command>)
    where
        F: Fn(ActorId) -> bool,
    {
        for event in events {
            match event {
                Event::LevelStarted { level, .. } => {
                    debug!("level {} setup started", level.get());
                    self.banked = Duration::ZERO;
                    self.stage = Stage::Setup {
                        remaining: self.config.level_start_delay,
                    };
                }
                Event::LevelCleared { .. } | Event::GameOver { .. } => {
                    if matches!(self.stage, Stage::Phase(_)) {
                        debug!("enemy phase cancelled by level teardown");
                    }
                    self.banked = Duration::ZERO;
                    self.stage = Stage::Idle;
                }
                Event::TimeAdvanced { dt } => {
                    if matches!(self.stage, Stage::Setup { .. } | Stage::Phase(_)) {
                        self.banked = self.banked.saturating_add(*dt);
                    }
                }
                _ => {}
            }
        }

        self.advance(&is_live, out);
    }

    fn advance<F>(&mut self, is_live: &F, out: &mut Vec<Command>)
    where
        F: Fn(ActorId) -> bool,
    {
        loop {
            match &mut self.stage {
                Stage::Idle | Stage::AwaitingPlayer => {
                    self.banked = Duration::ZERO;
                    return;
                }
                Stage::Setup { remaining } => {
                    if !pay(remaining, &mut self.banked) {
                        return;
                    }
                    debug!("level setup finished");
                    self.stage = Stage::AwaitingPlayer;
                }
                Stage::Phase(phase) => match phase.step {
                    PhaseStep::Opening | PhaseStep::Padding | PhaseStep::AfterActor => {
                        if !pay(&mut phase.remaining, &mut self.banked) {
                            return;
                        }
                        match phase.step {
                            PhaseStep::Opening if phase.queue.is_empty() => {
                                phase.step = PhaseStep::Padding;
                                phase.remaining = self.config.turn_delay;
                            }
                            PhaseStep::Padding => self.finish_phase(),
                            _ => phase.step = PhaseStep::Ready,
                        }
                    }
                    PhaseStep::Ready => {
                        let Some(handle) = next_live(&mut phase.queue, is_live) else {
                            self.finish_phase();
                            continue;
                        };
                        phase.step = PhaseStep::AfterActor;
                        phase.remaining = handle.move_delay();
                        out.push(Command::TakeActorTurn { actor: handle.id() });
                        return;
                    }
                },
            }
        }
    }

    fn finish_phase(&mut self) {
        debug!("enemy phase finished");
        self.stage = Stage::AwaitingPlayer;
    }
}

/// Pops actors until one that is still live comes up.
fn next_live<F>(queue: &mut VecDeque<ActorHandle>, is_live: &F) -> Option<ActorHandle>
where
    F: Fn(ActorId) -> bool,
{
    while let Some(handle) = queue.pop_front() {
        if is_live(handle.id()) {
            return Some(handle);
        }
        debug!("skipping removed actor {}", handle.id().get());
    }
    None
}

/// Pays down a wait from the banked time. Returns true once the wait is over.
fn pay(remaining: &mut Duration, banked: &mut Duration) -> bool {
    if *banked >= *remaining {
        *banked -= *remaining;
        *remaining = Duration::ZERO;
        true
    } else {
        *remaining -= *banked;
        *banked = Duration::ZERO;
        false
    }
}

#[cfg(test)]
mod tests {
    use scavenger_core::LevelNumber;

    use super::*;

    const MOVE_DELAY: Duration = Duration::from_millis(100);

    fn snapshot(ids: &[u32]) -> ActorSnapshot {
        ActorSnapshot::from_handles(
            ids.iter()
                .map(|id| ActorHandle::new(ActorId::new(*id), MOVE_DELAY))
                .collect(),
        )
    }

    fn started() -> TurnCoordinator {
        let mut coordinator = TurnCoordinator::new(TurnConfig::default());
        let mut out = Vec::new();
        coordinator.handle(
            &[
                Event::LevelStarted {
                    level: LevelNumber::FIRST,
                    actors: 0,
                },
                tick(2000),
            ],
            |_| true,
            &mut out,
        );
        assert!(out.is_empty());
        coordinator
    }

    fn tick(ms: u64) -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(ms),
        }
    }

    fn actors(commands: &[Command]) -> Vec<u32> {
        commands
            .iter()
            .filter_map(|command| match command {
                Command::TakeActorTurn { actor } => Some(actor.get()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn input_is_refused_until_setup_delay_elapses() {
        let mut coordinator = TurnCoordinator::new(TurnConfig::default());
        let mut out = Vec::new();
        assert_eq!(coordinator.state(), TurnState::LevelSetup);

        coordinator.handle(
            &[
                Event::LevelStarted {
                    level: LevelNumber::FIRST,
                    actors: 0,
                },
                tick(1999),
            ],
            |_| true,
            &mut out,
        );
        assert_eq!(
            coordinator.submit_player_action(StepInput::UP, snapshot(&[]), &mut out),
            Err(InputRejected::NotPlayerTurn {
                state: TurnState::LevelSetup
            })
        );

        coordinator.handle(&[tick(1)], |_| true, &mut out);
        assert_eq!(coordinator.state(), TurnState::PlayerTurn);
        assert!(out.is_empty());
    }

    #[test]
    fn accepted_action_emits_step_and_opens_phase() {
        let mut coordinator = started();
        let mut out = Vec::new();

        coordinator
            .submit_player_action(StepInput::RIGHT, snapshot(&[1]), &mut out)
            .expect("accepted");

        assert_eq!(
            out,
            vec![Command::StepPlayer {
                input: StepInput::RIGHT
            }]
        );
        assert_eq!(coordinator.state(), TurnState::EnemyPhaseRunning);
        assert_eq!(
            coordinator.submit_player_action(StepInput::RIGHT, snapshot(&[1]), &mut out),
            Err(InputRejected::NotPlayerTurn {
                state: TurnState::EnemyPhaseRunning
            })
        );
    }

    #[test]
    fn null_input_is_refused() {
        let mut coordinator = started();
        let mut out = Vec::new();
        assert_eq!(
            coordinator.submit_player_action(StepInput::NONE, snapshot(&[]), &mut out),
            Err(InputRejected::NullInput)
        );
        assert_eq!(coordinator.state(), TurnState::PlayerTurn);
        assert!(out.is_empty());
    }

    #[test]
    fn actors_act_in_snapshot_order_once_each() {
        let mut coordinator = started();
        let mut out = Vec::new();
        coordinator
            .submit_player_action(StepInput::UP, snapshot(&[4, 2, 9]), &mut out)
            .expect("accepted");
        out.clear();

        coordinator.handle(&[tick(99)], |_| true, &mut out);
        assert!(out.is_empty());
        coordinator.handle(&[tick(1)], |_| true, &mut out);
        assert_eq!(actors(&out), vec![4]);

        coordinator.handle(&[tick(100)], |_| true, &mut out);
        coordinator.handle(&[tick(100)], |_| true, &mut out);
        assert_eq!(actors(&out), vec![4, 2, 9]);
        assert_eq!(coordinator.state(), TurnState::EnemyPhaseRunning);

        coordinator.handle(&[tick(100)], |_| true, &mut out);
        assert_eq!(coordinator.state(), TurnState::PlayerTurn);
        assert_eq!(actors(&out), vec![4, 2, 9]);
    }

    #[test]
    fn large_tick_yields_after_each_actor() {
        let mut coordinator = started();
        let mut out = Vec::new();
        coordinator
            .submit_player_action(StepInput::UP, snapshot(&[0, 1]), &mut out)
            .expect("accepted");
        out.clear();

        coordinator.handle(&[tick(10_000)], |_| true, &mut out);
        assert_eq!(actors(&out), vec![0]);
        coordinator.handle(&[], |_| true, &mut out);
        assert_eq!(actors(&out), vec![0, 1]);
        coordinator.handle(&[], |_| true, &mut out);
        assert_eq!(coordinator.state(), TurnState::PlayerTurn);
    }

    #[test]
    fn empty_phase_costs_an_extra_delay() {
        let mut coordinator = started();
        let mut out = Vec::new();
        coordinator
            .submit_player_action(StepInput::UP, snapshot(&[]), &mut out)
            .expect("accepted");

        coordinator.handle(&[tick(100)], |_| true, &mut out);
        assert_eq!(coordinator.state(), TurnState::EnemyPhaseRunning);
        coordinator.handle(&[tick(99)], |_| true, &mut out);
        assert_eq!(coordinator.state(), TurnState::EnemyPhaseRunning);
        coordinator.handle(&[tick(1)], |_| true, &mut out);
        assert_eq!(coordinator.state(), TurnState::PlayerTurn);
    }

    #[test]
    fn teardown_cancels_remaining_turns() {
        let mut coordinator = started();
        let mut out = Vec::new();
        coordinator
            .submit_player_action(StepInput::UP, snapshot(&[0, 1, 2]), &mut out)
            .expect("accepted");
        out.clear();

        coordinator.handle(&[tick(10_000)], |_| true, &mut out);
        assert_eq!(actors(&out), vec![0]);

        coordinator.handle(
            &[Event::GameOver {
                level: LevelNumber::FIRST,
            }],
            |_| true,
            &mut out,
        );
        coordinator.handle(&[tick(10_000)], |_| true, &mut out);

        assert_eq!(actors(&out), vec![0]);
        assert_eq!(coordinator.state(), TurnState::LevelSetup);
    }

    #[test]
    fn removed_actors_are_skipped_without_delay() {
        let mut coordinator = started();
        let mut out = Vec::new();
        coordinator
            .submit_player_action(StepInput::UP, snapshot(&[0, 1, 2]), &mut out)
            .expect("accepted");
        out.clear();
        let is_live = |actor: ActorId| actor.get() != 1;

        coordinator.handle(&[tick(100)], is_live, &mut out);
        coordinator.handle(&[tick(100)], is_live, &mut out);
        assert_eq!(actors(&out), vec![0, 2]);

        coordinator.handle(&[tick(100)], is_live, &mut out);
        assert_eq!(coordinator.state(), TurnState::PlayerTurn);
    }

    #[test]
    fn time_is_not_banked_during_player_turn() {
        let mut coordinator = started();
        let mut out = Vec::new();
        coordinator.handle(&[tick(5_000)], |_| true, &mut out);
        coordinator
            .submit_player_action(StepInput::UP, snapshot(&[0]), &mut out)
            .expect("accepted");
        out.clear();

        coordinator.handle(&[], |_| true, &mut out);
        assert!(out.is_empty());
    }
}
