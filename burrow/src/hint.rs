//! Next-move suggestions built on the A* pathfinder.

use burrow_core::{Cell, Coord};
use burrow_paths::{PathError, Planner, find_path};

use crate::command::Command;
use crate::game::GameState;

impl GameState {
    /// Shortest walkable path from the rabbit to `target`, excluding the
    /// rabbit's own cell.
    pub fn path_to(&self, target: Coord) -> Result<Vec<Coord>, PathError> {
        find_path(self.board(), self.rabbit(), target)
    }

    /// Whether the rabbit can walk to `target` without crossing a carrot.
    pub fn reachable(&self, target: Coord) -> bool {
        self.path_to(target).is_ok()
    }

    /// Suggest the next command.
    ///
    /// With empty paws next to a carrot that is [`Command::PickUp`]. While
    /// carrying, it is the first step towards the nearest hole; otherwise the
    /// first step towards the nearest cell beside a carrot. Returns `None`
    /// once the game is over or when no goal is reachable.
    pub fn hint(&self) -> Option<Command> {
        if self.status().is_terminal() {
            return None;
        }
        if !self.holding_carrot() && self.can_pick_carrot() {
            return Some(Command::PickUp);
        }

        let board = self.board();
        let goals: Vec<Coord> = if self.holding_carrot() {
            board.find_all(Cell::RabbitHole)
        } else {
            let mut beside: Vec<Coord> = board
                .find_all(Cell::Carrot)
                .into_iter()
                .flat_map(|carrot| board.neighbors(carrot))
                .filter_map(|(c, cell)| cell.passable().then_some(c))
                .collect();
            beside.sort();
            beside.dedup();
            beside
        };

        let mut planner = Planner::new();
        let best = goals
            .into_iter()
            .filter_map(|goal| planner.route(board, self.rabbit(), goal).ok())
            .min_by_key(|path| path.len())?;
        let next = *best.first()?;
        log::trace!("hint: {} -> {next} ({} steps)", self.rabbit(), best.len());
        Command::toward(self.rabbit(), next)
    }
}
