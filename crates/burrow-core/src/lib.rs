//! **burrow-core**: core types for the burrow grid puzzle.
//!
//! This crate provides the foundational types shared by the pathfinder and
//! the game: `(row, col)` geometry, the closed [`Cell`] enumeration, and the
//! owned square [`Board`].

pub mod board;
pub mod cell;
pub mod geom;

pub use board::{Board, BoardIter, ParseBoardError};
pub use cell::Cell;
pub use geom::{Coord, Range, RangeIter};
