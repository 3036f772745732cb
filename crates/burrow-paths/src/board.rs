//! Board-level entry point and error type.

use std::fmt;

use burrow_core::{Board, Coord};

use crate::planner::Planner;

/// Shortest walkable path from `start` to `end` on `board`.
///
/// Neighbours are the four orthogonal cells; off-board cells and carrots are
/// never entered, every step costs one and Manhattan distance guides the
/// search. The returned path excludes `start` and ends with `end`, so its
/// length is the number of steps. `start == end`, off-board endpoints and
/// unreachable (or carrot) targets all yield [`PathError::NotFound`].
pub fn find_path(board: &Board, start: Coord, end: Coord) -> Result<Vec<Coord>, PathError> {
    Planner::new().route(board, start, end)
}

/// Errors reported by the board pathfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// No walkable path connects the two coordinates.
    NotFound { start: Coord, end: Coord },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { start, end } => write!(f, "no path from {start} to {end}"),
        }
    }
}

impl std::error::Error for PathError {}
