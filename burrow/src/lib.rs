//! Burrow: help Mr. Bunny carry carrots into rabbit holes.
//!
//! [`GameState`] owns the board and applies one [`Command`] per turn;
//! [`GameState::hint`] asks the A* pathfinder for a next step. Everything
//! about terminals lives in the binary.

pub mod command;
pub mod config;
pub mod game;
pub mod hint;
pub mod messages;
pub mod setup;

pub use command::{Command, Direction, ParseCommandError};
pub use config::{GameConfig, MAX_SIZE, SetupError};
pub use game::{Event, GameState, MoveError, Status, is_valid_move};
pub use messages::{LogEntry, LogStyle, MessageLog};
pub use setup::initialize;
