//! Free-cell pool consumed by a single generation pass.

use rand::Rng;
use scavenger_core::{Cell, ConfigurationError, GridSize, LayoutError};

/// Interior cells that have not received an entity during the current pass.
///
/// A drawn cell leaves the pool immediately, so no two placements made
/// between two calls to [`GridAllocator::initialize`] can share a cell.
#[derive(Clone, Debug, Default)]
pub struct GridAllocator {
    free: Vec<Cell>,
}

impl GridAllocator {
    /// Creates an empty allocator. Call [`GridAllocator::initialize`] before drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator primed for raw board dimensions.
    pub fn for_dimensions(columns: u32, rows: u32) -> Result<Self, ConfigurationError> {
        let grid = GridSize::new(columns, rows)?;
        let mut allocator = Self::new();
        allocator.initialize(grid);
        Ok(allocator)
    }

    /// Clears the pool and refills it with every interior cell of the grid.
    pub fn initialize(&mut self, grid: GridSize) {
        self.free.clear();
        self.free.reserve(grid.interior_capacity());
        self.free.extend(grid.interior_cells());
    }

    /// Number of cells still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.free.len()
    }

    /// Removes and returns a uniformly random free cell.
    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Cell, LayoutError> {
        if self.free.is_empty() {
            return Err(LayoutError::PoolExhausted);
        }

        let index = rng.gen_range(0..self.free.len());
        Ok(self.free.swap_remove(index))
    }

    /// Discards whatever the pass left unused.
    pub fn release(&mut self) {
        self.free.clear();
    }
}
