#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Scavenger simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid edge that still leaves at least one interior cell.
pub const MIN_GRID_EDGE: u32 = 3;

/// Largest grid edge whose cells, outer ring included, fit in [`Cell`] coordinates.
pub const MAX_GRID_EDGE: u32 = i32::MAX as u32;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the current level with a freshly generated layout.
    BeginLevel {
        /// Number of the level that begins.
        level: LevelNumber,
        /// Layout produced by the level generator for this level.
        layout: LevelLayout,
        /// Food the player carries into the level.
        food: FoodPoints,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Attempts a single player step in the provided direction.
    StepPlayer {
        /// Normalized direction of the attempted step.
        input: StepInput,
    },
    /// Lets a registered actor take its turn.
    TakeActorTurn {
        /// Actor whose behavior should run.
        actor: ActorId,
    },
    /// Removes an actor from play, for example after it was defeated.
    RemoveActor {
        /// Actor to remove.
        actor: ActorId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a level was installed and its setup began.
    LevelStarted {
        /// Number of the level that started.
        level: LevelNumber,
        /// Number of actors registered for the level.
        actors: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a participant moved between two cells.
    ActorMoved {
        /// Participant that moved.
        participant: Participant,
        /// Cell occupied before the move.
        from: Cell,
        /// Cell occupied after the move.
        to: Cell,
    },
    /// Reports that a participant's move was blocked.
    ActorBlocked {
        /// Participant whose move was blocked.
        participant: Participant,
        /// Obstacle found in the target cell.
        obstacle: Obstacle,
        /// Cell the participant attempted to enter.
        target: Cell,
    },
    /// Confirms that an actor finished its turn.
    ActorTurnTaken {
        /// Actor that took its turn.
        actor: ActorId,
    },
    /// Reports that an actor turn request did not run the actor's behavior.
    ActorTurnSkipped {
        /// Actor targeted by the request.
        actor: ActorId,
        /// Reason the behavior did not run.
        reason: SkipReason,
    },
    /// Confirms that an actor was removed from play.
    ActorDefeated {
        /// Actor that was removed.
        actor: ActorId,
    },
    /// Reports that an enemy attack cost the player food.
    PlayerDamaged {
        /// Food lost to the attack.
        amount: u32,
        /// Food remaining after the attack.
        remaining: FoodPoints,
    },
    /// Reports that a player step request was refused outright.
    PlayerStepRejected {
        /// Reason the step was refused.
        reason: StepRejection,
    },
    /// Reports that a wall took damage from the player.
    WallDamaged {
        /// Cell holding the wall.
        cell: Cell,
        /// Hit points left on the wall.
        remaining: u32,
    },
    /// Reports that a wall was knocked down.
    WallDestroyed {
        /// Cell the wall occupied.
        cell: Cell,
    },
    /// Reports that the player picked up food.
    FoodConsumed {
        /// Cell the food occupied.
        cell: Cell,
        /// Food points gained.
        points: u32,
        /// Food total after pickup.
        total: FoodPoints,
    },
    /// Announces that the player reached the exit.
    LevelCleared {
        /// Level that was cleared.
        level: LevelNumber,
        /// Food carried out of the level.
        food: FoodPoints,
    },
    /// Announces that the player starved.
    GameOver {
        /// Level on which the run ended.
        level: LevelNumber,
    },
}

/// Identifies who performed a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    /// The player character.
    Player,
    /// A registered non-player actor.
    Enemy(ActorId),
}

/// Things that can stop a participant from entering a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obstacle {
    /// The impassable ring surrounding the playable board.
    OuterWall,
    /// A destructible interior wall.
    Wall,
    /// The player character.
    Player,
    /// Another actor.
    Enemy(ActorId),
}

/// Reasons an actor turn request did not run the actor's behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// The actor is not registered for the current level.
    Missing,
    /// No level is currently in play.
    LevelInactive,
    /// The actor rests this turn after moving on its previous one.
    Resting,
}

/// Reasons a player step request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepRejection {
    /// No level is currently in play.
    LevelInactive,
    /// The input carried no direction.
    NullInput,
}

/// Location of a single board cell.
///
/// Coordinates are signed because the outer ring sits one cell outside the
/// playable board on every side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell reached by the provided step.
    #[must_use]
    pub const fn offset(self, input: StepInput) -> Self {
        Self {
            x: self.x + input.dx as i32,
            y: self.y + input.dy as i32,
        }
    }
}

/// Dimensions of the playable board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a grid description, rejecting boards without interior cells
    /// and boards too wide to address with [`Cell`] coordinates.
    pub fn new(columns: u32, rows: u32) -> Result<Self, ConfigurationError> {
        if columns < MIN_GRID_EDGE || rows < MIN_GRID_EDGE {
            return Err(ConfigurationError::GridTooSmall { columns, rows });
        }
        if columns > MAX_GRID_EDGE || rows > MAX_GRID_EDGE {
            return Err(ConfigurationError::GridTooLarge { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Edges as signed coordinates; lossless since both are at most [`MAX_GRID_EDGE`].
    const fn signed_edges(&self) -> (i32, i32) {
        (self.columns as i32, self.rows as i32)
    }

    /// Number of playable columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of playable rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells eligible for wall, food, and enemy placement.
    #[must_use]
    pub fn interior_capacity(&self) -> usize {
        let columns = (self.columns - 2) as usize;
        let rows = (self.rows - 2) as usize;
        columns * rows
    }

    /// Fixed cell that always receives the level exit.
    #[must_use]
    pub fn exit_cell(&self) -> Cell {
        let (columns, rows) = self.signed_edges();
        Cell::new(columns - 1, rows - 1)
    }

    /// Reports whether the cell lies on the playable board.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let (columns, rows) = self.signed_edges();
        (0..columns).contains(&cell.x()) && (0..rows).contains(&cell.y())
    }

    /// Reports whether the cell is eligible for random placement.
    #[must_use]
    pub fn is_interior(&self, cell: Cell) -> bool {
        let (columns, rows) = self.signed_edges();
        (1..columns - 1).contains(&cell.x()) && (1..rows - 1).contains(&cell.y())
    }

    /// Reports whether the cell belongs to the outer ring.
    #[must_use]
    pub fn is_outer_ring(&self, cell: Cell) -> bool {
        let (columns, rows) = self.signed_edges();
        let within = (-1..=columns).contains(&cell.x()) && (-1..=rows).contains(&cell.y());
        within && (cell.x() == -1 || cell.x() == columns || cell.y() == -1 || cell.y() == rows)
    }

    /// Iterates every interior cell, column by column.
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> {
        let (columns, rows) = self.signed_edges();
        (1..columns - 1).flat_map(move |x| (1..rows - 1).map(move |y| Cell::new(x, y)))
    }

    /// Iterates the playable board plus its outer ring, column by column.
    pub fn framed_cells(&self) -> impl Iterator<Item = Cell> {
        let (columns, rows) = self.signed_edges();
        (-1..=columns).flat_map(move |x| (-1..=rows).map(move |y| Cell::new(x, y)))
    }
}

/// Inclusive bounds used to randomize how many entities are placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct QuantityRange {
    minimum: u32,
    maximum: u32,
}

impl QuantityRange {
    /// Creates a new range, rejecting inverted bounds.
    pub fn new(minimum: u32, maximum: u32) -> Result<Self, ConfigurationError> {
        if minimum > maximum {
            return Err(ConfigurationError::InvertedRange { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// Creates a range that always yields the provided value.
    #[must_use]
    pub const fn exactly(value: u32) -> Self {
        Self {
            minimum: value,
            maximum: value,
        }
    }

    /// Smallest value the range can produce.
    #[must_use]
    pub const fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Largest value the range can produce.
    #[must_use]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Reports whether the value lies within the inclusive bounds.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.minimum && value <= self.maximum
    }

    /// Draws a uniformly distributed value from the inclusive bounds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.minimum..=self.maximum)
    }
}

/// Layers of entities that make up a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    /// Walkable background tiles.
    Floor,
    /// Impassable tiles on the outer ring.
    OuterWall,
    /// Destructible interior walls.
    Wall,
    /// Food pickups.
    Food,
    /// Turn-taking enemies.
    Enemy,
    /// The level exit.
    Exit,
}

/// Non-empty list of interchangeable variants for a single layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog<T> {
    layer: Layer,
    entries: Vec<T>,
}

impl<T> Catalog<T> {
    /// Creates a catalog, rejecting empty variant lists.
    pub fn new(layer: Layer, entries: Vec<T>) -> Result<Self, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::EmptyCatalog { layer });
        }
        Ok(Self { layer, entries })
    }

    /// Layer the catalog supplies.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Number of variants in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; catalogs hold at least one variant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieves the variant stored at the provided index.
    #[must_use]
    pub fn get(&self, variant: usize) -> Option<&T> {
        self.entries.get(variant)
    }

    /// Picks a uniformly random variant index.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.entries.len())
    }
}

/// Plain tile variant with no gameplay parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSpec {
    /// Name presentation adapters use to pick a sprite.
    pub name: String,
}

/// Wall variant and its durability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallSpec {
    /// Name presentation adapters use to pick a sprite.
    pub name: String,
    /// Damage the wall absorbs before it is knocked down.
    pub hit_points: u32,
}

/// Food variant and the food it restores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoodSpec {
    /// Name presentation adapters use to pick a sprite.
    pub name: String,
    /// Food restored when the player steps onto the item.
    pub points: u32,
}

/// Enemy variant and its combat and pacing parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpec {
    /// Name presentation adapters use to pick a sprite.
    pub name: String,
    /// Food the player loses when this enemy attacks.
    pub damage: u32,
    /// Time charged after the enemy acts, before the next actor's turn.
    pub move_delay: Duration,
}

/// Every catalog a level draws entities from.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalogs {
    /// Background tiles for the playable board.
    pub floor: Catalog<TileSpec>,
    /// Tiles for the outer ring.
    pub outer_wall: Catalog<TileSpec>,
    /// Destructible interior walls.
    pub wall: Catalog<WallSpec>,
    /// Food pickups.
    pub food: Catalog<FoodSpec>,
    /// Turn-taking enemies.
    pub enemy: Catalog<EnemySpec>,
    /// The single exit tile.
    pub exit: TileSpec,
}

impl Catalogs {
    /// Variant set of the classic tutorial board: eight floors, three outer
    /// walls, eight walls, food and soda, and two enemy kinds.
    #[must_use]
    pub fn tutorial() -> Self {
        let walls = (1..=8)
            .map(|index| WallSpec {
                name: format!("Wall{index}"),
                hit_points: 3,
            })
            .collect();
        let enemies = [("Enemy1", 10), ("Enemy2", 20)]
            .into_iter()
            .map(|(name, damage)| EnemySpec {
                name: name.to_owned(),
                damage,
                move_delay: Duration::from_millis(100),
            })
            .collect();

        Self {
            floor: Catalog {
                layer: Layer::Floor,
                entries: numbered_tiles("Floor", 8),
            },
            outer_wall: Catalog {
                layer: Layer::OuterWall,
                entries: numbered_tiles("OuterWall", 3),
            },
            wall: Catalog {
                layer: Layer::Wall,
                entries: walls,
            },
            food: Catalog {
                layer: Layer::Food,
                entries: vec![
                    FoodSpec {
                        name: "Food".to_owned(),
                        points: 10,
                    },
                    FoodSpec {
                        name: "Soda".to_owned(),
                        points: 20,
                    },
                ],
            },
            enemy: Catalog {
                layer: Layer::Enemy,
                entries: enemies,
            },
            exit: TileSpec {
                name: "Exit".to_owned(),
            },
        }
    }
}

fn numbered_tiles(prefix: &str, count: u32) -> Vec<TileSpec> {
    (1..=count)
        .map(|index| TileSpec {
            name: format!("{prefix}{index}"),
        })
        .collect()
}

/// Single entity placed by the level generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Layer the entity belongs to.
    pub layer: Layer,
    /// Index of the chosen variant within the layer's catalog.
    pub variant: usize,
    /// Cell the entity occupies.
    pub cell: Cell,
}

/// Complete result of one level-generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    level: LevelNumber,
    grid: GridSize,
    ground: Vec<Placement>,
    objects: Vec<Placement>,
    exit: Placement,
}

impl LevelLayout {
    /// Assembles a layout from the output of a generation pass.
    #[must_use]
    pub fn new(
        level: LevelNumber,
        grid: GridSize,
        ground: Vec<Placement>,
        objects: Vec<Placement>,
        exit: Placement,
    ) -> Self {
        Self {
            level,
            grid,
            ground,
            objects,
            exit,
        }
    }

    /// Level the layout was generated for.
    #[must_use]
    pub const fn level(&self) -> LevelNumber {
        self.level
    }

    /// Board dimensions used for the layout.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Floor and outer-wall tiles, one per framed cell.
    #[must_use]
    pub fn ground(&self) -> &[Placement] {
        &self.ground
    }

    /// Walls, food, and enemies in placement order.
    #[must_use]
    pub fn objects(&self) -> &[Placement] {
        &self.objects
    }

    /// The exit placement.
    #[must_use]
    pub const fn exit(&self) -> Placement {
        self.exit
    }

    /// Iterates the objects that belong to the provided layer, in placement order.
    pub fn objects_on(&self, layer: Layer) -> impl Iterator<Item = &Placement> {
        self.objects
            .iter()
            .filter(move |placement| placement.layer == layer)
    }
}

/// Level counter; the first level is number one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelNumber(u32);

impl LevelNumber {
    /// The opening level.
    pub const FIRST: Self = Self(1);

    /// Wraps a level number, rejecting zero.
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::LevelOutOfRange { level: 0 });
        }
        Ok(Self(value))
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level that follows this one.
    ///
    /// Fails once the level counter cannot grow any further.
    pub fn next(self) -> Result<Self, DomainError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(DomainError::LevelOutOfRange {
                level: i64::from(self.0) + 1,
            })
    }
}

/// Unique identifier assigned to a registered actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Scheduling view of a registered actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorHandle {
    id: ActorId,
    move_delay: Duration,
}

impl ActorHandle {
    /// Creates a handle for the actor with the provided move delay.
    #[must_use]
    pub const fn new(id: ActorId, move_delay: Duration) -> Self {
        Self { id, move_delay }
    }

    /// Identifier of the actor.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Time charged after the actor acts, before the next actor's turn.
    #[must_use]
    pub const fn move_delay(&self) -> Duration {
        self.move_delay
    }
}

/// Fixed copy of the actor registry taken when an enemy phase begins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorSnapshot {
    handles: Vec<ActorHandle>,
}

impl ActorSnapshot {
    /// Captures a snapshot preserving the provided registration order.
    #[must_use]
    pub fn from_handles(handles: Vec<ActorHandle>) -> Self {
        Self { handles }
    }

    /// Iterator over the captured handles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorHandle> {
        self.handles.iter()
    }

    /// Number of captured actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Reports whether no actors were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Consumes the snapshot, yielding the underlying handles.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorHandle> {
        self.handles
    }
}

/// Phase of the turn cycle. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// A level is being set up or torn down; nobody acts.
    LevelSetup,
    /// The player may submit one action.
    PlayerTurn,
    /// Registered actors take their turns in order.
    EnemyPhaseRunning,
}

/// Discrete step direction with at most one non-zero axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepInput {
    dx: i8,
    dy: i8,
}

impl StepInput {
    /// Input that carries no direction.
    pub const NONE: Self = Self { dx: 0, dy: 0 };
    /// One step toward decreasing `x`.
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    /// One step toward increasing `x`.
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };
    /// One step toward increasing `y`.
    pub const UP: Self = Self { dx: 0, dy: 1 };
    /// One step toward decreasing `y`.
    pub const DOWN: Self = Self { dx: 0, dy: -1 };

    /// Normalizes raw axis readings. Only signs matter and the horizontal
    /// axis wins when both are non-zero.
    #[must_use]
    pub fn normalized(horizontal: i32, vertical: i32) -> Self {
        let dx = horizontal.signum() as i8;
        let dy = if dx != 0 { 0 } else { vertical.signum() as i8 };
        Self { dx, dy }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i8 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i8 {
        self.dy
    }

    /// Reports whether the input carries no direction.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Food carried by the player; running out ends the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodPoints(u32);

impl FoodPoints {
    /// Creates a new food amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric food amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds food, saturating at the numeric limit.
    #[must_use]
    pub const fn gain(self, points: u32) -> Self {
        Self(self.0.saturating_add(points))
    }

    /// Removes food, stopping at zero.
    #[must_use]
    pub const fn lose(self, points: u32) -> Self {
        Self(self.0.saturating_sub(points))
    }

    /// Reports whether the player has starved.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Source of player directions, polled once per player-turn tick.
pub trait InputSource {
    /// Returns the direction the player wants to step in, or [`StepInput::NONE`].
    fn poll(&mut self) -> StepInput;
}

/// Storage for the food carried between levels.
pub trait FoodLedger {
    /// Returns the food saved at the end of the previous level, if any.
    fn load(&self) -> Option<FoodPoints>;

    /// Saves the food carried out of a level.
    fn store(&mut self, food: FoodPoints);
}

/// Invalid static configuration. Fatal at startup and never clamped.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The grid leaves no interior cells.
    #[error("a {columns}x{rows} grid has no interior cells")]
    GridTooSmall {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The grid is too large for cell coordinates.
    #[error("a {columns}x{rows} grid exceeds the largest supported edge")]
    GridTooLarge {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The quantity range has its bounds swapped.
    #[error("quantity range [{minimum}, {maximum}] is inverted")]
    InvertedRange {
        /// Requested lower bound.
        minimum: u32,
        /// Requested upper bound.
        maximum: u32,
    },
    /// A catalog has no variants to choose from.
    #[error("the {layer:?} catalog is empty")]
    EmptyCatalog {
        /// Layer whose catalog is empty.
        layer: Layer,
    },
}

/// Generation demand exceeded the cells available on the board.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A draw was attempted from an empty free-cell pool.
    #[error("the free cell pool is exhausted")]
    PoolExhausted,
    /// The requested placements cannot fit in the interior.
    #[error("layout needs {demand} interior cells but only {capacity} exist")]
    LayoutOverflow {
        /// Number of interior placements requested.
        demand: u64,
        /// Number of interior cells on the board.
        capacity: usize,
    },
}

/// Invalid level number.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Levels are numbered from one.
    #[error("level {level} is out of range; levels start at 1")]
    LevelOutOfRange {
        /// Offending level number.
        level: i64,
    },
}
