//! Occupancy of the playable board for a single level.

use std::collections::{BTreeMap, HashMap};

use scavenger_core::{Cell, Event, GridSize, Obstacle};

/// Static and moving contents of the board.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    grid: GridSize,
    exit: Cell,
    walls: BTreeMap<Cell, u32>,
    food: BTreeMap<Cell, u32>,
    occupants: HashMap<Cell, Obstacle>,
}

impl Board {
    /// Creates an empty board with the exit at the provided cell.
    pub(crate) fn new(grid: GridSize, exit: Cell) -> Self {
        Self {
            grid,
            exit,
            walls: BTreeMap::new(),
            food: BTreeMap::new(),
            occupants: HashMap::new(),
        }
    }

    pub(crate) const fn exit(&self) -> Cell {
        self.exit
    }

    pub(crate) fn add_wall(&mut self, cell: Cell, hit_points: u32) {
        let _ = self.walls.insert(cell, hit_points);
    }

    pub(crate) fn add_food(&mut self, cell: Cell, points: u32) {
        let _ = self.food.insert(cell, points);
    }

    pub(crate) fn occupy(&mut self, cell: Cell, occupant: Obstacle) {
        let _ = self.occupants.insert(cell, occupant);
    }

    pub(crate) fn vacate(&mut self, cell: Cell) {
        let _ = self.occupants.remove(&cell);
    }

    /// Moves whoever occupies `from` into `to`.
    pub(crate) fn relocate(&mut self, from: Cell, to: Cell) {
        if let Some(occupant) = self.occupants.remove(&from) {
            let _ = self.occupants.insert(to, occupant);
        }
    }

    /// Returns what would stop a mover from entering the cell.
    ///
    /// Food and the exit never block.
    pub(crate) fn obstacle_at(&self, cell: Cell) -> Option<Obstacle> {
        if !self.grid.contains(cell) {
            return Some(Obstacle::OuterWall);
        }
        if self.walls.contains_key(&cell) {
            return Some(Obstacle::Wall);
        }
        self.occupants.get(&cell).copied()
    }

    pub(crate) fn wall_at(&self, cell: Cell) -> Option<u32> {
        self.walls.get(&cell).copied()
    }

    pub(crate) fn food_at(&self, cell: Cell) -> Option<u32> {
        self.food.get(&cell).copied()
    }

    /// Removes the food item at the cell, returning its points.
    pub(crate) fn take_food(&mut self, cell: Cell) -> Option<u32> {
        self.food.remove(&cell)
    }

    /// Applies damage to the wall at the cell, knocking it down at zero.
    pub(crate) fn damage_wall(&mut self, cell: Cell, amount: u32, out_events: &mut Vec<Event>) {
        let Some(hit_points) = self.walls.get_mut(&cell) else {
            return;
        };
        *hit_points = hit_points.saturating_sub(amount);
        let remaining = *hit_points;
        out_events.push(Event::WallDamaged { cell, remaining });

        if remaining == 0 {
            let _ = self.walls.remove(&cell);
            out_events.push(Event::WallDestroyed { cell });
        }
    }
}

#[cfg(test)]
mod tests {
    use scavenger_core::ActorId;

    use super::*;

    fn board() -> Board {
        let grid = GridSize::new(5, 5).expect("grid");
        Board::new(grid, grid.exit_cell())
    }

    #[test]
    fn cells_outside_the_board_are_outer_wall() {
        let board = board();
        assert_eq!(board.obstacle_at(Cell::new(-1, 0)), Some(Obstacle::OuterWall));
        assert_eq!(board.obstacle_at(Cell::new(2, 5)), Some(Obstacle::OuterWall));
        assert_eq!(board.obstacle_at(Cell::new(4, 4)), None);
    }

    #[test]
    fn food_does_not_block() {
        let mut board = board();
        board.add_food(Cell::new(2, 2), 10);
        assert_eq!(board.obstacle_at(Cell::new(2, 2)), None);
        assert_eq!(board.take_food(Cell::new(2, 2)), Some(10));
        assert_eq!(board.take_food(Cell::new(2, 2)), None);
    }

    #[test]
    fn walls_fall_after_enough_damage() {
        let mut board = board();
        let cell = Cell::new(1, 1);
        board.add_wall(cell, 2);
        let mut events = Vec::new();

        board.damage_wall(cell, 1, &mut events);
        assert_eq!(board.obstacle_at(cell), Some(Obstacle::Wall));
        board.damage_wall(cell, 1, &mut events);
        assert_eq!(board.obstacle_at(cell), None);

        assert_eq!(
            events,
            vec![
                Event::WallDamaged { cell, remaining: 1 },
                Event::WallDamaged { cell, remaining: 0 },
                Event::WallDestroyed { cell },
            ]
        );
    }

    #[test]
    fn relocate_moves_occupant() {
        let mut board = board();
        let enemy = Obstacle::Enemy(ActorId::new(4));
        board.occupy(Cell::new(1, 2), enemy);
        board.relocate(Cell::new(1, 2), Cell::new(1, 3));
        assert_eq!(board.obstacle_at(Cell::new(1, 2)), None);
        assert_eq!(board.obstacle_at(Cell::new(1, 3)), Some(enemy));
    }
}
