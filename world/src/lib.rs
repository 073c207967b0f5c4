#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Scavenger.

mod board;
mod mover;
pub mod registry;

use std::collections::BTreeMap;

use log::{debug, info, warn};
use scavenger_core::{
    ActorHandle, ActorId, Catalogs, Cell, Command, Event, FoodPoints, Layer, LevelLayout,
    LevelNumber, Obstacle, SkipReason, StepInput, StepRejection,
};

use board::Board;
use mover::{attempt_move, Enemy, MoveOutcome, Mover, Player, Reaction};

pub use registry::ActorRegistry;

/// Cell every level starts the player on.
const PLAYER_START: Cell = Cell::new(0, 0);

/// Numeric rules applied when the player acts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    wall_damage: u32,
    step_cost: u32,
}

impl Rules {
    /// Creates rules with the provided wall damage and per-step food cost.
    #[must_use]
    pub const fn new(wall_damage: u32, step_cost: u32) -> Self {
        Self {
            wall_damage,
            step_cost,
        }
    }

    /// Hit points a wall loses when the player bumps into it.
    #[must_use]
    pub const fn wall_damage(&self) -> u32 {
        self.wall_damage
    }

    /// Food spent on every step attempt.
    #[must_use]
    pub const fn step_cost(&self) -> u32 {
        self.step_cost
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Static configuration of a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    rules: Rules,
    catalogs: Catalogs,
}

impl WorldConfig {
    /// Creates a configuration. The catalogs must match the ones layouts are
    /// generated from, since placements refer to variants by index.
    #[must_use]
    pub fn new(rules: Rules, catalogs: Catalogs) -> Self {
        Self { rules, catalogs }
    }

    /// Rules applied to player steps.
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// Variant catalogs used to resolve placements.
    #[must_use]
    pub const fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(Rules::default(), Catalogs::tutorial())
    }
}

#[derive(Debug)]
struct LevelState {
    number: LevelNumber,
    board: Board,
    player: Player,
    enemies: BTreeMap<ActorId, Enemy>,
    active: bool,
}

/// Represents the authoritative Scavenger world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    registry: ActorRegistry,
    level: Option<LevelState>,
    next_actor: u32,
}

impl World {
    /// Creates a world with no level installed.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            registry: ActorRegistry::new(),
            level: None,
            next_actor: 0,
        }
    }

    fn allocate_actor(&mut self) -> ActorId {
        let id = ActorId::new(self.next_actor);
        self.next_actor = self.next_actor.saturating_add(1);
        id
    }

    fn begin_level(
        &mut self,
        number: LevelNumber,
        layout: &LevelLayout,
        food: FoodPoints,
        out_events: &mut Vec<Event>,
    ) {
        self.registry.clear();

        let grid = layout.grid();
        let mut board = Board::new(grid, layout.exit().cell);
        let mut enemies = BTreeMap::new();

        for placement in layout.objects() {
            let catalogs = &self.config.catalogs;
            match placement.layer {
                Layer::Wall => {
                    let Some(spec) = catalogs.wall.get(placement.variant) else {
                        warn!("unknown wall variant {}", placement.variant);
                        continue;
                    };
                    board.add_wall(placement.cell, spec.hit_points);
                }
                Layer::Food => {
                    let Some(spec) = catalogs.food.get(placement.variant) else {
                        warn!("unknown food variant {}", placement.variant);
                        continue;
                    };
                    board.add_food(placement.cell, spec.points);
                }
                Layer::Enemy => {
                    let Some(spec) = catalogs.enemy.get(placement.variant) else {
                        warn!("unknown enemy variant {}", placement.variant);
                        continue;
                    };
                    let (damage, move_delay) = (spec.damage, spec.move_delay);
                    let id = self.allocate_actor();
                    self.registry.register(ActorHandle::new(id, move_delay));
                    board.occupy(placement.cell, Obstacle::Enemy(id));
                    let _ = enemies.insert(id, Enemy::new(id, placement.cell, damage));
                }
                Layer::Floor | Layer::OuterWall | Layer::Exit => {}
            }
        }

        board.occupy(PLAYER_START, Obstacle::Player);
        let player = Player::new(PLAYER_START, food, self.config.rules.wall_damage);

        let actors = u32::try_from(enemies.len()).unwrap_or(u32::MAX);
        info!(
            "level {} started with {actors} enemies and {} food",
            number.get(),
            food.get()
        );
        self.level = Some(LevelState {
            number,
            board,
            player,
            enemies,
            active: true,
        });
        out_events.push(Event::LevelStarted {
            level: number,
            actors,
        });
    }

    fn step_player(&mut self, input: StepInput, out_events: &mut Vec<Event>) {
        let Some(level) = self.level.as_mut().filter(|level| level.active) else {
            warn!("player step ignored: no active level");
            out_events.push(Event::PlayerStepRejected {
                reason: StepRejection::LevelInactive,
            });
            return;
        };
        if input.is_null() {
            out_events.push(Event::PlayerStepRejected {
                reason: StepRejection::NullInput,
            });
            return;
        }

        level.player.food = level.player.food.lose(self.config.rules.step_cost);
        let outcome = attempt_move(&mut level.board, &mut level.player, input, out_events);

        if let MoveOutcome::Blocked {
            target,
            reaction: Reaction::DamageWall(amount),
        } = outcome
        {
            level.board.damage_wall(target, amount, out_events);
        }

        if level.player.food.is_depleted() {
            end_run(level, out_events);
            return;
        }

        let MoveOutcome::Moved(cell) = outcome else {
            return;
        };

        if let Some(points) = level.board.take_food(cell) {
            level.player.food = level.player.food.gain(points);
            out_events.push(Event::FoodConsumed {
                cell,
                points,
                total: level.player.food,
            });
        }

        if cell == level.board.exit() {
            level.active = false;
            info!(
                "level {} cleared with {} food",
                level.number.get(),
                level.player.food.get()
            );
            out_events.push(Event::LevelCleared {
                level: level.number,
                food: level.player.food,
            });
        }
    }

    fn take_actor_turn(&mut self, actor: ActorId, out_events: &mut Vec<Event>) {
        let Some(level) = self.level.as_mut().filter(|level| level.active) else {
            out_events.push(Event::ActorTurnSkipped {
                actor,
                reason: SkipReason::LevelInactive,
            });
            return;
        };
        let enemy = match level.enemies.get_mut(&actor) {
            Some(enemy) if self.registry.contains(actor) => enemy,
            _ => {
                out_events.push(Event::ActorTurnSkipped {
                    actor,
                    reason: SkipReason::Missing,
                });
                return;
            }
        };

        let heading = enemy.heading(level.player.cell);
        match attempt_move(&mut level.board, enemy, heading, out_events) {
            MoveOutcome::Declined => {
                out_events.push(Event::ActorTurnSkipped {
                    actor,
                    reason: SkipReason::Resting,
                });
                return;
            }
            MoveOutcome::Blocked {
                reaction: Reaction::DamagePlayer(amount),
                ..
            } => {
                level.player.food = level.player.food.lose(amount);
                out_events.push(Event::PlayerDamaged {
                    amount,
                    remaining: level.player.food,
                });
                if level.player.food.is_depleted() {
                    end_run(level, out_events);
                }
            }
            MoveOutcome::Blocked { .. } | MoveOutcome::Moved(_) => {}
        }

        out_events.push(Event::ActorTurnTaken { actor });
    }

    fn remove_actor(&mut self, actor: ActorId, out_events: &mut Vec<Event>) {
        if !self.registry.remove(actor) {
            return;
        }
        if let Some(level) = self.level.as_mut() {
            if let Some(enemy) = level.enemies.remove(&actor) {
                level.board.vacate(enemy.cell());
            }
        }
        debug!("actor {} defeated", actor.get());
        out_events.push(Event::ActorDefeated { actor });
    }
}

fn end_run(level: &mut LevelState, out_events: &mut Vec<Event>) {
    level.active = false;
    info!("game over on level {}", level.number.get());
    out_events.push(Event::GameOver {
        level: level.number,
    });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginLevel {
            level,
            layout,
            food,
        } => world.begin_level(level, &layout, food, out_events),
        Command::Tick { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::StepPlayer { input } => world.step_player(input, out_events),
        Command::TakeActorTurn { actor } => world.take_actor_turn(actor, out_events),
        Command::RemoveActor { actor } => world.remove_actor(actor, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use scavenger_core::{ActorId, ActorSnapshot, Cell, FoodPoints, Obstacle};

    use super::{ActorRegistry, Mover, World};

    /// Reports whether the installed level still accepts moves.
    #[must_use]
    pub fn is_level_active(world: &World) -> bool {
        world.level.as_ref().is_some_and(|level| level.active)
    }

    /// Provides read-only access to the actor registry.
    #[must_use]
    pub fn registry(world: &World) -> &ActorRegistry {
        &world.registry
    }

    /// Captures the registry in registration order for an enemy phase.
    #[must_use]
    pub fn actor_snapshot(world: &World) -> ActorSnapshot {
        world.registry.snapshot()
    }

    /// Reports whether the actor is still registered.
    #[must_use]
    pub fn is_actor_live(world: &World, actor: ActorId) -> bool {
        world.registry.contains(actor)
    }

    /// Cell the player stands on.
    #[must_use]
    pub fn player_cell(world: &World) -> Option<Cell> {
        world.level.as_ref().map(|level| level.player.cell)
    }

    /// Food the player currently carries.
    #[must_use]
    pub fn food(world: &World) -> Option<FoodPoints> {
        world.level.as_ref().map(|level| level.player.food)
    }

    /// Location of the exit.
    #[must_use]
    pub fn exit_cell(world: &World) -> Option<Cell> {
        world.level.as_ref().map(|level| level.board.exit())
    }

    /// Remaining hit points of the wall at the cell.
    #[must_use]
    pub fn wall_at(world: &World, cell: Cell) -> Option<u32> {
        world
            .level
            .as_ref()
            .and_then(|level| level.board.wall_at(cell))
    }

    /// Points of the food item lying on the cell.
    #[must_use]
    pub fn food_at(world: &World, cell: Cell) -> Option<u32> {
        world
            .level
            .as_ref()
            .and_then(|level| level.board.food_at(cell))
    }

    /// What would block a move into the cell.
    #[must_use]
    pub fn obstacle_at(world: &World, cell: Cell) -> Option<Obstacle> {
        world
            .level
            .as_ref()
            .and_then(|level| level.board.obstacle_at(cell))
    }

    /// Captures the enemies of the installed level ordered by identifier.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .level
            .as_ref()
            .map(|level| {
                level
                    .enemies
                    .iter()
                    .map(|(id, enemy)| EnemySnapshot {
                        id: *id,
                        cell: enemy.cell(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        EnemyView { snapshots }
    }

    /// Read-only snapshot describing all enemies on the board.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemy snapshots.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Number of enemies captured.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no enemies were captured.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Position of a single enemy.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EnemySnapshot {
        /// Identifier of the enemy.
        pub id: ActorId,
        /// Cell the enemy occupies.
        pub cell: Cell,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use scavenger_core::{GridSize, Participant, Placement};

    use super::*;

    fn placement(layer: Layer, variant: usize, x: i32, y: i32) -> Placement {
        Placement {
            layer,
            variant,
            cell: Cell::new(x, y),
        }
    }

    fn layout(objects: Vec<Placement>) -> LevelLayout {
        let grid = GridSize::new(5, 5).expect("grid");
        let exit = placement(Layer::Exit, 0, 4, 4);
        LevelLayout::new(LevelNumber::FIRST, grid, Vec::new(), objects, exit)
    }

    fn started(objects: Vec<Placement>, food: u32) -> (World, Vec<Event>) {
        let mut world = World::new(WorldConfig::default());
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BeginLevel {
                level: LevelNumber::FIRST,
                layout: layout(objects),
                food: FoodPoints::new(food),
            },
            &mut events,
        );
        (world, events)
    }

    fn step(world: &mut World, input: StepInput) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::StepPlayer { input }, &mut events);
        events
    }

    fn take_turn(world: &mut World, actor: ActorId) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::TakeActorTurn { actor }, &mut events);
        events
    }

    #[test]
    fn begin_level_registers_enemies_in_placement_order() {
        let (world, events) = started(
            vec![
                placement(Layer::Enemy, 1, 3, 3),
                placement(Layer::Wall, 0, 1, 1),
                placement(Layer::Enemy, 0, 2, 3),
            ],
            100,
        );

        assert_eq!(
            events,
            vec![Event::LevelStarted {
                level: LevelNumber::FIRST,
                actors: 2,
            }]
        );
        let ids: Vec<u32> = query::actor_snapshot(&world)
            .iter()
            .map(|handle| handle.id().get())
            .collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(query::actor_snapshot(&world)
            .iter()
            .all(|handle| handle.move_delay() == Duration::from_millis(100)));
        assert_eq!(query::player_cell(&world), Some(Cell::new(0, 0)));
        assert_eq!(query::wall_at(&world, Cell::new(1, 1)), Some(3));
        assert_eq!(query::enemy_view(&world).len(), 2);
    }

    #[test]
    fn begin_level_replaces_previous_registry() {
        let (mut world, _) = started(vec![placement(Layer::Enemy, 0, 2, 2)], 100);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BeginLevel {
                level: LevelNumber::FIRST.next().expect("second level"),
                layout: layout(vec![placement(Layer::Enemy, 0, 3, 3)]),
                food: FoodPoints::new(50),
            },
            &mut events,
        );

        let ids: Vec<u32> = query::actor_snapshot(&world)
            .iter()
            .map(|handle| handle.id().get())
            .collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(query::food(&world), Some(FoodPoints::new(50)));
    }

    #[test]
    fn each_step_costs_food() {
        let (mut world, _) = started(Vec::new(), 10);
        let events = step(&mut world, StepInput::RIGHT);
        assert_eq!(
            events,
            vec![Event::ActorMoved {
                participant: Participant::Player,
                from: Cell::new(0, 0),
                to: Cell::new(1, 0),
            }]
        );
        assert_eq!(query::food(&world), Some(FoodPoints::new(9)));
    }

    #[test]
    fn blocked_step_still_costs_food() {
        let (mut world, _) = started(Vec::new(), 10);
        let _ = step(&mut world, StepInput::LEFT);
        assert_eq!(query::food(&world), Some(FoodPoints::new(9)));
        assert_eq!(query::player_cell(&world), Some(Cell::new(0, 0)));
    }

    #[test]
    fn null_step_is_rejected_without_cost() {
        let (mut world, _) = started(Vec::new(), 10);
        let events = step(&mut world, StepInput::NONE);
        assert_eq!(
            events,
            vec![Event::PlayerStepRejected {
                reason: StepRejection::NullInput,
            }]
        );
        assert_eq!(query::food(&world), Some(FoodPoints::new(10)));
    }

    #[test]
    fn step_without_level_is_rejected() {
        let mut world = World::new(WorldConfig::default());
        let events = step(&mut world, StepInput::UP);
        assert_eq!(
            events,
            vec![Event::PlayerStepRejected {
                reason: StepRejection::LevelInactive,
            }]
        );
    }

    #[test]
    fn player_knocks_down_walls() {
        let (mut world, _) = started(vec![placement(Layer::Wall, 0, 1, 0)], 100);
        let mut events = Vec::new();
        for _ in 0..3 {
            events.extend(step(&mut world, StepInput::RIGHT));
        }

        assert!(events.contains(&Event::WallDestroyed {
            cell: Cell::new(1, 0)
        }));
        assert_eq!(query::wall_at(&world, Cell::new(1, 0)), None);
        assert_eq!(query::player_cell(&world), Some(Cell::new(0, 0)));

        let _ = step(&mut world, StepInput::RIGHT);
        assert_eq!(query::player_cell(&world), Some(Cell::new(1, 0)));
    }

    #[test]
    fn picking_up_food_adds_points() {
        let (mut world, _) = started(vec![placement(Layer::Food, 1, 1, 0)], 10);
        let events = step(&mut world, StepInput::RIGHT);
        assert!(events.contains(&Event::FoodConsumed {
            cell: Cell::new(1, 0),
            points: 20,
            total: FoodPoints::new(29),
        }));
        assert_eq!(query::food_at(&world, Cell::new(1, 0)), None);
    }

    #[test]
    fn starving_ends_the_run_before_pickup() {
        let (mut world, _) = started(vec![placement(Layer::Food, 0, 1, 0)], 1);
        let events = step(&mut world, StepInput::RIGHT);

        assert_eq!(
            events.last(),
            Some(&Event::GameOver {
                level: LevelNumber::FIRST
            })
        );
        assert!(!query::is_level_active(&world));
        assert_eq!(query::food_at(&world, Cell::new(1, 0)), Some(10));
    }

    #[test]
    fn reaching_the_exit_clears_the_level() {
        let (mut world, _) = started(Vec::new(), 100);
        let events = [StepInput::RIGHT; 4]
            .into_iter()
            .chain([StepInput::UP; 4])
            .map(|input| step(&mut world, input))
            .last()
            .expect("eight steps");

        assert_eq!(
            events.last(),
            Some(&Event::LevelCleared {
                level: LevelNumber::FIRST,
                food: FoodPoints::new(92),
            })
        );
        assert!(!query::is_level_active(&world));
        assert_eq!(
            step(&mut world, StepInput::LEFT),
            vec![Event::PlayerStepRejected {
                reason: StepRejection::LevelInactive,
            }]
        );
    }

    #[test]
    fn enemies_rest_every_other_turn() {
        let (mut world, _) = started(vec![placement(Layer::Enemy, 0, 3, 3)], 100);
        let actor = ActorId::new(0);

        let first = take_turn(&mut world, actor);
        assert_eq!(
            first,
            vec![
                Event::ActorMoved {
                    participant: Participant::Enemy(actor),
                    from: Cell::new(3, 3),
                    to: Cell::new(2, 3),
                },
                Event::ActorTurnTaken { actor },
            ]
        );

        let second = take_turn(&mut world, actor);
        assert_eq!(
            second,
            vec![Event::ActorTurnSkipped {
                actor,
                reason: SkipReason::Resting,
            }]
        );
    }

    #[test]
    fn enemy_attack_costs_player_food() {
        let (mut world, _) = started(vec![placement(Layer::Enemy, 1, 1, 0)], 100);
        let actor = ActorId::new(0);

        let events = take_turn(&mut world, actor);

        assert!(events.contains(&Event::PlayerDamaged {
            amount: 20,
            remaining: FoodPoints::new(80),
        }));
        assert_eq!(events.last(), Some(&Event::ActorTurnTaken { actor }));
    }

    #[test]
    fn lethal_attack_ends_the_run() {
        let (mut world, _) = started(vec![placement(Layer::Enemy, 0, 0, 1)], 5);
        let events = take_turn(&mut world, ActorId::new(0));
        assert!(events.contains(&Event::GameOver {
            level: LevelNumber::FIRST
        }));

        let after = take_turn(&mut world, ActorId::new(0));
        assert_eq!(
            after,
            vec![Event::ActorTurnSkipped {
                actor: ActorId::new(0),
                reason: SkipReason::LevelInactive,
            }]
        );
    }

    #[test]
    fn removed_actor_no_longer_acts_or_blocks() {
        let (mut world, _) = started(vec![placement(Layer::Enemy, 0, 1, 0)], 100);
        let actor = ActorId::new(0);
        let mut events = Vec::new();

        apply(&mut world, Command::RemoveActor { actor }, &mut events);

        assert_eq!(events, vec![Event::ActorDefeated { actor }]);
        assert!(!query::is_actor_live(&world, actor));
        assert_eq!(query::obstacle_at(&world, Cell::new(1, 0)), None);
        assert_eq!(
            take_turn(&mut world, actor),
            vec![Event::ActorTurnSkipped {
                actor,
                reason: SkipReason::Missing,
            }]
        );
    }

    #[test]
    fn tick_reports_elapsed_time() {
        let mut world = World::new(WorldConfig::default());
        let mut events = Vec::new();
        let dt = Duration::from_millis(16);
        apply(&mut world, Command::Tick { dt }, &mut events);
        assert_eq!(events, vec![Event::TimeAdvanced { dt }]);
    }
}
