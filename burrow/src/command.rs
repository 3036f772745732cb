//! Player commands and key parsing.

use std::fmt;
use std::str::FromStr;

use burrow_core::Coord;

/// One of the four orthogonal step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The `(row, col)` offset of one step.
    pub const fn delta(self) -> Coord {
        match self {
            Direction::Left => Coord::new(0, -1),
            Direction::Right => Coord::new(0, 1),
            Direction::Up => Coord::new(-1, 0),
            Direction::Down => Coord::new(1, 0),
        }
    }

    /// The direction whose single step is `delta`, if any.
    pub fn from_delta(delta: Coord) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// A discrete command submitted once per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PickUp,
    Jump,
    Quit,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveUp,
        Command::MoveDown,
        Command::PickUp,
        Command::Jump,
        Command::Quit,
    ];

    /// The keyboard key bound to this command.
    pub const fn key(self) -> char {
        match self {
            Command::MoveLeft => 'a',
            Command::MoveRight => 'd',
            Command::MoveUp => 'w',
            Command::MoveDown => 's',
            Command::PickUp => 'p',
            Command::Jump => 'j',
            Command::Quit => 'q',
        }
    }

    /// Map a key to its command, ignoring case.
    pub fn from_key(ch: char) -> Option<Command> {
        let ch = ch.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == ch)
    }

    /// The step direction of a move command.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::PickUp | Command::Jump | Command::Quit => None,
        }
    }

    /// The move command that steps from `from` to the adjacent `to`.
    pub fn toward(from: Coord, to: Coord) -> Option<Command> {
        Direction::from_delta(to - from).map(Command::from)
    }

    const fn name(self) -> &'static str {
        match self {
            Command::MoveLeft => "MoveLeft",
            Command::MoveRight => "MoveRight",
            Command::MoveUp => "MoveUp",
            Command::MoveDown => "MoveDown",
            Command::PickUp => "PickUp",
            Command::Jump => "Jump",
            Command::Quit => "Quit",
        }
    }
}

impl From<Direction> for Command {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a single key (`"a"`, `"P"`) or a command name (`"MoveLeft"`,
/// `"jump"`), case-insensitively and with surrounding whitespace trimmed.
impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(cmd) = Command::from_key(ch) {
                return Ok(cmd);
            }
        }
        Command::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| ParseCommandError::UnrecognizedCommand(t.to_string()))
    }
}

/// Raised for input that names no command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCommand(s) => {
                write!(f, "unrecognized command \u{201c}{s}\u{201d}; use a/d/w/s/p/j/q")
            }
        }
    }
}

impl std::error::Error for ParseCommandError {}
