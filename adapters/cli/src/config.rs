//! TOML configuration for a play session.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use scavenger_core::{
    Catalog, Catalogs, EnemySpec, FoodPoints, FoodSpec, GridSize, Layer, QuantityRange, TileSpec,
    WallSpec,
};
use scavenger_system_layout::LayoutConfig;
use scavenger_system_turns::TurnConfig;
use scavenger_world::{Rules, WorldConfig};
use serde::Deserialize;

/// Built-in configuration reproducing the classic tutorial board.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Validated configuration for every part of a session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) layout: LayoutConfig,
    pub(crate) turns: TurnConfig,
    pub(crate) world: WorldConfig,
    pub(crate) starting_food: FoodPoints,
}

/// Loads the configuration at `path`, or the built-in default.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return parse(DEFAULT_CONFIG).context("built-in configuration is invalid");
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid configuration in {}", path.display()))
}

fn parse(contents: &str) -> Result<GameConfig> {
    let raw: RawConfig =
        toml::from_str(contents).context("failed to parse configuration toml contents")?;

    let grid = GridSize::new(raw.grid.columns, raw.grid.rows).context("invalid [grid] section")?;
    let wall_count = raw
        .layout
        .wall_count
        .validate()
        .context("invalid layout.wall_count")?;
    let food_count = raw
        .layout
        .food_count
        .validate()
        .context("invalid layout.food_count")?;
    let catalogs = raw.catalogs.validate().context("invalid [catalogs] section")?;

    Ok(GameConfig {
        layout: LayoutConfig::new(grid, wall_count, food_count, catalogs.clone()),
        turns: TurnConfig::new(
            Duration::from_millis(raw.turns.level_start_delay_ms),
            Duration::from_millis(raw.turns.turn_delay_ms),
        ),
        world: WorldConfig::new(
            Rules::new(raw.rules.wall_damage, raw.rules.step_cost),
            catalogs,
        ),
        starting_food: FoodPoints::new(raw.rules.starting_food),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    grid: RawGrid,
    layout: RawLayout,
    catalogs: RawCatalogs,
    turns: RawTurns,
    rules: RawRules,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrid {
    columns: u32,
    rows: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    wall_count: RawRange,
    food_count: RawRange,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    min: u32,
    max: u32,
}

impl RawRange {
    fn validate(&self) -> Result<QuantityRange> {
        Ok(QuantityRange::new(self.min, self.max)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalogs {
    floor: Vec<String>,
    outer_wall: Vec<String>,
    wall: Vec<RawWall>,
    food: Vec<RawFood>,
    enemy: Vec<RawEnemy>,
    exit: String,
}

impl RawCatalogs {
    fn validate(self) -> Result<Catalogs> {
        Ok(Catalogs {
            floor: Catalog::new(Layer::Floor, tiles(self.floor))?,
            outer_wall: Catalog::new(Layer::OuterWall, tiles(self.outer_wall))?,
            wall: Catalog::new(
                Layer::Wall,
                self.wall
                    .into_iter()
                    .map(|wall| WallSpec {
                        name: wall.name,
                        hit_points: wall.hit_points,
                    })
                    .collect(),
            )?,
            food: Catalog::new(
                Layer::Food,
                self.food
                    .into_iter()
                    .map(|food| FoodSpec {
                        name: food.name,
                        points: food.points,
                    })
                    .collect(),
            )?,
            enemy: Catalog::new(
                Layer::Enemy,
                self.enemy
                    .into_iter()
                    .map(|enemy| EnemySpec {
                        name: enemy.name,
                        damage: enemy.damage,
                        move_delay: Duration::from_millis(enemy.move_delay_ms),
                    })
                    .collect(),
            )?,
            exit: TileSpec { name: self.exit },
        })
    }
}

fn tiles(names: Vec<String>) -> Vec<TileSpec> {
    names.into_iter().map(|name| TileSpec { name }).collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWall {
    name: String,
    hit_points: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFood {
    name: String,
    points: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnemy {
    name: String,
    damage: u32,
    move_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTurns {
    level_start_delay_ms: u64,
    turn_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRules {
    starting_food: u32,
    wall_damage: u32,
    step_cost: u32,
}
