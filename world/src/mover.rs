//! Movement capability shared by the player and enemies.

use scavenger_core::{ActorId, Cell, Event, FoodPoints, Obstacle, Participant, StepInput};

use crate::board::Board;

/// Consequence of bumping into an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reaction {
    /// Nothing happens beyond losing the move.
    Nothing,
    /// The wall in the target cell takes damage.
    DamageWall(u32),
    /// The player loses food.
    DamagePlayer(u32),
}

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// The mover declined to move this turn.
    Declined,
    /// The mover entered the target cell.
    Moved(Cell),
    /// The target cell was occupied.
    Blocked {
        /// Cell the mover tried to enter.
        target: Cell,
        /// How the mover reacted to the obstacle.
        reaction: Reaction,
    },
}

/// Anything that moves one cell at a time on the board.
pub(crate) trait Mover {
    fn participant(&self) -> Participant;

    fn cell(&self) -> Cell;

    fn set_cell(&mut self, cell: Cell);

    /// Decides whether a move is attempted this turn.
    fn can_attempt(&mut self, input: StepInput) -> bool;

    fn on_blocked(&mut self, obstacle: Obstacle) -> Reaction;
}

/// Moves the mover one step, or reports what blocked it.
pub(crate) fn attempt_move<M: Mover>(
    board: &mut Board,
    mover: &mut M,
    input: StepInput,
    out_events: &mut Vec<Event>,
) -> MoveOutcome {
    if !mover.can_attempt(input) {
        return MoveOutcome::Declined;
    }

    let from = mover.cell();
    let target = from.offset(input);
    if let Some(obstacle) = board.obstacle_at(target) {
        out_events.push(Event::ActorBlocked {
            participant: mover.participant(),
            obstacle,
            target,
        });
        return MoveOutcome::Blocked {
            target,
            reaction: mover.on_blocked(obstacle),
        };
    }

    board.relocate(from, target);
    mover.set_cell(target);
    out_events.push(Event::ActorMoved {
        participant: mover.participant(),
        from,
        to: target,
    });
    MoveOutcome::Moved(target)
}

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) cell: Cell,
    pub(crate) food: FoodPoints,
    wall_damage: u32,
}

impl Player {
    pub(crate) fn new(cell: Cell, food: FoodPoints, wall_damage: u32) -> Self {
        Self {
            cell,
            food,
            wall_damage,
        }
    }
}

impl Mover for Player {
    fn participant(&self) -> Participant {
        Participant::Player
    }

    fn cell(&self) -> Cell {
        self.cell
    }

    fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    fn can_attempt(&mut self, input: StepInput) -> bool {
        !input.is_null()
    }

    fn on_blocked(&mut self, obstacle: Obstacle) -> Reaction {
        match obstacle {
            Obstacle::Wall => Reaction::DamageWall(self.wall_damage),
            Obstacle::OuterWall | Obstacle::Player | Obstacle::Enemy(_) => Reaction::Nothing,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: ActorId,
    cell: Cell,
    damage: u32,
    resting: bool,
}

impl Enemy {
    pub(crate) fn new(id: ActorId, cell: Cell, damage: u32) -> Self {
        Self {
            id,
            cell,
            damage,
            resting: false,
        }
    }

    /// Direction of the next step toward the target. Sharing a column means
    /// a vertical step, anything else a horizontal one.
    pub(crate) fn heading(&self, target: Cell) -> StepInput {
        if target.x() == self.cell.x() {
            if target.y() > self.cell.y() {
                StepInput::UP
            } else {
                StepInput::DOWN
            }
        } else if target.x() > self.cell.x() {
            StepInput::RIGHT
        } else {
            StepInput::LEFT
        }
    }
}

impl Mover for Enemy {
    fn participant(&self) -> Participant {
        Participant::Enemy(self.id)
    }

    fn cell(&self) -> Cell {
        self.cell
    }

    fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    /// Enemies alternate between moving and resting.
    fn can_attempt(&mut self, _input: StepInput) -> bool {
        if self.resting {
            self.resting = false;
            return false;
        }
        self.resting = true;
        true
    }

    fn on_blocked(&mut self, obstacle: Obstacle) -> Reaction {
        match obstacle {
            Obstacle::Player => Reaction::DamagePlayer(self.damage),
            Obstacle::OuterWall | Obstacle::Wall | Obstacle::Enemy(_) => Reaction::Nothing,
        }
    }
}
