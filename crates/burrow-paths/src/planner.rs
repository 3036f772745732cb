use std::cmp::Ordering;
use std::collections::BinaryHeap;

use burrow_core::{Board, Coord};

use crate::board::PathError;
use crate::distance::manhattan;

const NO_PARENT: u32 = u32::MAX;

/// Bookkeeping for one board cell. A slot whose `stamp` differs from the
/// planner's current stamp has not been reached by the running search.
#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    stamp: u32,
    steps: u32,
    parent: u32,
    closed: bool,
}

/// Frontier entry. The heap pops the lowest `steps + remaining` first and,
/// among equals, the entry closest to the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frontier {
    cell: u32,
    steps: u32,
    remaining: u32,
}

impl Frontier {
    fn priority(self) -> u32 {
        self.steps + self.remaining
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority()
            .cmp(&self.priority())
            .then_with(|| other.remaining.cmp(&self.remaining))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable A* search over a [`Board`].
///
/// Slots are sized to the last board searched and reset lazily: each search
/// bumps a stamp instead of clearing the array. A planner follows a board
/// that changes size between queries.
#[derive(Debug, Default)]
pub struct Planner {
    side: i32,
    stamp: u32,
    slots: Vec<Slot>,
    frontier: BinaryHeap<Frontier>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest walkable route from `start` to `end`, excluding `start`.
    ///
    /// See [`find_path`](crate::find_path) for the rules.
    pub fn route(
        &mut self,
        board: &Board,
        start: Coord,
        end: Coord,
    ) -> Result<Vec<Coord>, PathError> {
        let not_found = PathError::NotFound { start, end };
        if start == end || !board.contains(start) || !board.contains(end) {
            return Err(not_found);
        }
        self.begin(board.size());

        let origin = self.index(start);
        let goal = self.index(end);
        self.slots[origin] = Slot {
            stamp: self.stamp,
            steps: 0,
            parent: NO_PARENT,
            closed: false,
        };
        self.frontier.push(Frontier {
            cell: origin as u32,
            steps: 0,
            remaining: manhattan(start, end) as u32,
        });

        while let Some(top) = self.frontier.pop() {
            let at = top.cell as usize;
            let slot = self.slots[at];
            // Superseded by a cheaper entry for the same cell.
            if slot.closed || top.steps > slot.steps {
                continue;
            }
            if at == goal {
                self.frontier.clear();
                let path = self.trace(goal);
                log::trace!("path {start} -> {end}: {} steps", path.len());
                return Ok(path);
            }
            self.slots[at].closed = true;

            let steps = top.steps + 1;
            for (next, cell) in board.neighbors(self.coord(at)) {
                if !cell.passable() {
                    continue;
                }
                let ni = self.index(next);
                let seen = self.slots[ni];
                if seen.stamp == self.stamp && (seen.closed || seen.steps <= steps) {
                    continue;
                }
                self.slots[ni] = Slot {
                    stamp: self.stamp,
                    steps,
                    parent: at as u32,
                    closed: false,
                };
                self.frontier.push(Frontier {
                    cell: ni as u32,
                    steps,
                    remaining: manhattan(next, end) as u32,
                });
            }
        }

        log::debug!("no path {start} -> {end}");
        Err(not_found)
    }

    /// Size the slots for a `side`×`side` board and open a new stamp.
    fn begin(&mut self, side: i32) {
        self.frontier.clear();
        if side != self.side {
            self.side = side;
            self.stamp = 0;
            self.slots.clear();
            self.slots.resize((side * side) as usize, Slot::default());
        }
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.slots.fill(Slot::default());
            self.stamp = 1;
        }
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        (c.row * self.side + c.col) as usize
    }

    #[inline]
    fn coord(&self, idx: usize) -> Coord {
        let idx = idx as i32;
        Coord::new(idx / self.side, idx % self.side)
    }

    fn trace(&self, goal: usize) -> Vec<Coord> {
        let mut path = Vec::with_capacity(self.slots[goal].steps as usize);
        let mut at = goal;
        while self.slots[at].parent != NO_PARENT {
            path.push(self.coord(at));
            at = self.slots[at].parent as usize;
        }
        path.reverse();
        path
    }
}
