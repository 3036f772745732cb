//! A* pathfinding for burrow boards.
//!
//! [`find_path`] answers a single query. A [`Planner`] keeps its per-cell
//! bookkeeping between queries, so a caller asking several questions about
//! the same board (the hint search, for instance) allocates once.
//!
//! Movement rules are the game's: four-way steps of cost one, carrots are
//! never entered, holes and pathways are. Searches only borrow the board;
//! clone it to search while play continues.

mod board;
mod distance;
mod planner;

pub use board::{PathError, find_path};
pub use distance::manhattan;
pub use planner::Planner;
