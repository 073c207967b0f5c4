#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural level layout generation.
//!
//! A generation pass lays the floor and outer ring, then scatters walls,
//! food, and enemies over distinct interior cells drawn from a
//! [`GridAllocator`], and finally pins the exit to the top-right interior
//! corner. Every random draw goes through the caller's RNG in a fixed order,
//! so a seeded source reproduces the same layout.

pub mod allocator;
pub mod difficulty;

use log::debug;
use rand::Rng;
use scavenger_core::{
    Catalog, Catalogs, GridSize, Layer, LayoutError, LevelLayout, LevelNumber, Placement,
    QuantityRange,
};

pub use allocator::GridAllocator;
pub use difficulty::{enemy_count, enemy_count_for};

/// Static parameters shared by every generation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    grid: GridSize,
    wall_count: QuantityRange,
    food_count: QuantityRange,
    catalogs: Catalogs,
}

impl LayoutConfig {
    /// Creates a configuration from validated parts.
    #[must_use]
    pub fn new(
        grid: GridSize,
        wall_count: QuantityRange,
        food_count: QuantityRange,
        catalogs: Catalogs,
    ) -> Self {
        Self {
            grid,
            wall_count,
            food_count,
            catalogs,
        }
    }

    /// Board dimensions.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Bounds on the number of walls per level.
    #[must_use]
    pub const fn wall_count(&self) -> QuantityRange {
        self.wall_count
    }

    /// Bounds on the number of food items per level.
    #[must_use]
    pub const fn food_count(&self) -> QuantityRange {
        self.food_count
    }

    /// Variant catalogs drawn from during generation.
    #[must_use]
    pub const fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }
}

/// Produces a fresh [`LevelLayout`] for each level.
#[derive(Debug)]
pub struct LevelLayoutGenerator {
    config: LayoutConfig,
    allocator: GridAllocator,
}

impl LevelLayoutGenerator {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            allocator: GridAllocator::new(),
        }
    }

    /// Runs one generation pass for the provided level.
    ///
    /// Fails with [`LayoutError::LayoutOverflow`] when the sampled counts do
    /// not fit in the interior, and never returns a partial layout. A
    /// configuration whose smallest possible demand already exceeds the
    /// interior fails before consuming anything from `rng`.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        level: LevelNumber,
        rng: &mut R,
    ) -> Result<LevelLayout, LayoutError> {
        let grid = self.config.grid;
        let enemies = enemy_count_for(level);
        self.ensure_minimum_fits(enemies)?;

        let ground = lay_ground(grid, &self.config.catalogs, rng);

        self.allocator.initialize(grid);
        let catalogs = &self.config.catalogs;
        let walls = self.config.wall_count.sample(rng);
        let mut objects = Vec::new();
        scatter(&mut self.allocator, &catalogs.wall, walls, rng, &mut objects)?;
        let food = self.config.food_count.sample(rng);
        scatter(&mut self.allocator, &catalogs.food, food, rng, &mut objects)?;
        scatter(&mut self.allocator, &catalogs.enemy, enemies, rng, &mut objects)?;
        self.allocator.release();

        let exit = Placement {
            layer: Layer::Exit,
            variant: 0,
            cell: grid.exit_cell(),
        };

        debug!(
            "generated level {}: {walls} walls, {food} food, {enemies} enemies",
            level.get()
        );

        Ok(LevelLayout::new(level, grid, ground, objects, exit))
    }

    fn ensure_minimum_fits(&self, enemies: u32) -> Result<(), LayoutError> {
        let demand = u64::from(self.config.wall_count.minimum())
            + u64::from(self.config.food_count.minimum())
            + u64::from(enemies);
        let capacity = self.config.grid.interior_capacity();
        if demand > capacity as u64 {
            return Err(LayoutError::LayoutOverflow { demand, capacity });
        }
        Ok(())
    }
}

fn lay_ground<R: Rng + ?Sized>(
    grid: GridSize,
    catalogs: &Catalogs,
    rng: &mut R,
) -> Vec<Placement> {
    grid.framed_cells()
        .map(|cell| {
            let floor = catalogs.floor.choose(rng);
            if grid.is_outer_ring(cell) {
                Placement {
                    layer: Layer::OuterWall,
                    variant: catalogs.outer_wall.choose(rng),
                    cell,
                }
            } else {
                Placement {
                    layer: Layer::Floor,
                    variant: floor,
                    cell,
                }
            }
        })
        .collect()
}

fn scatter<T, R: Rng + ?Sized>(
    allocator: &mut GridAllocator,
    catalog: &Catalog<T>,
    count: u32,
    rng: &mut R,
    out: &mut Vec<Placement>,
) -> Result<(), LayoutError> {
    let available = allocator.remaining();
    if count as usize > available {
        return Err(LayoutError::LayoutOverflow {
            demand: out.len() as u64 + u64::from(count),
            capacity: out.len() + available,
        });
    }

    for _ in 0..count {
        let cell = allocator.draw_random(rng)?;
        out.push(Placement {
            layer: catalog.layer(),
            variant: catalog.choose(rng),
            cell,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn generator(
        columns: u32,
        rows: u32,
        walls: (u32, u32),
        food: (u32, u32),
    ) -> LevelLayoutGenerator {
        LevelLayoutGenerator::new(LayoutConfig::new(
            GridSize::new(columns, rows).expect("grid"),
            QuantityRange::new(walls.0, walls.1).expect("walls"),
            QuantityRange::new(food.0, food.1).expect("food"),
            Catalogs::tutorial(),
        ))
    }

    #[test]
    fn unavoidable_overflow_is_reported_before_drawing() {
        let mut generator = generator(4, 4, (3, 3), (2, 2));
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let untouched = rng.clone();

        let result = generator.generate(LevelNumber::FIRST, &mut rng);

        assert_eq!(
            result,
            Err(LayoutError::LayoutOverflow {
                demand: 5,
                capacity: 4
            })
        );
        assert_eq!(rng, untouched, "failed pass must not consume randomness");
    }

    #[test]
    fn configs_that_only_overflow_at_their_maximum_still_generate() {
        let mut generator = generator(5, 5, (0, 9), (0, 9));
        let mut generated = 0;
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            match generator.generate(LevelNumber::FIRST, &mut rng) {
                Ok(layout) => {
                    assert!(layout.objects().len() <= 9);
                    generated += 1;
                }
                Err(LayoutError::LayoutOverflow { demand, capacity }) => {
                    assert_eq!(capacity, 9);
                    assert!(demand > 9, "seed {seed}: demand {demand}");
                }
                Err(other) => panic!("seed {seed}: unexpected {other:?}"),
            }
        }
        assert!(generated > 0, "no seed produced a layout");
    }

    #[test]
    fn sampled_overflow_reports_total_demand() {
        let mut generator = generator(4, 4, (0, 4), (0, 4));
        let mut overflowed = false;
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let Err(error) = generator.generate(LevelNumber::FIRST, &mut rng) {
                let LayoutError::LayoutOverflow { demand, capacity } = error else {
                    panic!("seed {seed}: unexpected {error:?}");
                };
                assert_eq!(capacity, 4);
                assert!((5..=8).contains(&demand), "seed {seed}: demand {demand}");
                overflowed = true;
            }
        }
        assert!(overflowed, "no seed overflowed the interior");
    }

    #[test]
    fn exact_fit_fills_every_interior_cell() {
        let mut generator = generator(5, 5, (5, 5), (4, 4));
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let layout = generator
            .generate(LevelNumber::FIRST, &mut rng)
            .expect("layout fits");
        let mut cells: Vec<_> = layout
            .objects()
            .iter()
            .map(|placement| placement.cell)
            .collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 9);
        assert!(cells.iter().all(|cell| layout.grid().is_interior(*cell)));
    }

    #[test]
    fn scatter_refuses_counts_beyond_the_pool() {
        let mut allocator = GridAllocator::for_dimensions(3, 3).expect("allocator");
        let catalog = Catalogs::tutorial().wall;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = Vec::new();

        let result = scatter(&mut allocator, &catalog, 2, &mut rng, &mut out);

        assert_eq!(
            result,
            Err(LayoutError::LayoutOverflow {
                demand: 2,
                capacity: 1
            })
        );
        assert!(out.is_empty());
        assert_eq!(allocator.remaining(), 1);
    }
}
