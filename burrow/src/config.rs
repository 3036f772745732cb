//! Game setup parameters.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Largest accepted board side.
pub const MAX_SIZE: u32 = 1024;

/// Parameters for a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Board side length.
    pub size: u32,
    /// Number of carrots to place.
    pub carrots: u32,
    /// Number of rabbit holes to place; the game is won when all are filled.
    pub holes: u32,
    /// Fixed RNG seed for reproducible boards. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 5,
            carrots: 2,
            holes: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check that a board with these parameters can be generated.
    pub fn validate(&self) -> Result<(), SetupError> {
        check_capacity(self.size, self.carrots, self.holes)
    }

    /// The random number generator described by `seed`.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Reject parameters for which placement cannot succeed: an empty board, or
/// more items (carrots, holes and the rabbit) than cells.
pub fn check_capacity(size: u32, carrots: u32, holes: u32) -> Result<(), SetupError> {
    if size > MAX_SIZE {
        log::warn!("board size {size} exceeds {MAX_SIZE}");
        return Err(SetupError::BoardTooLarge {
            size,
            max: MAX_SIZE,
        });
    }
    let cells = u64::from(size) * u64::from(size);
    let needed = u64::from(carrots) + u64::from(holes) + 1;
    if size == 0 || needed > cells {
        log::warn!("cannot place {carrots} carrots and {holes} holes on a {size}x{size} board");
        return Err(SetupError::InitializationImpossible {
            size,
            carrots,
            holes,
        });
    }
    Ok(())
}

/// Errors raised before play starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The rabbit, holes and carrots do not fit on the board.
    InitializationImpossible { size: u32, carrots: u32, holes: u32 },
    /// The requested side exceeds [`MAX_SIZE`].
    BoardTooLarge { size: u32, max: u32 },
    /// A prepared board does not hold exactly one rabbit.
    RabbitCount(usize),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitializationImpossible {
                size,
                carrots,
                holes,
            } => write!(
                f,
                "cannot fit a rabbit, {carrots} carrots and {holes} holes on a {size}x{size} board"
            ),
            Self::BoardTooLarge { size, max } => {
                write!(f, "board size {size} exceeds the maximum of {max}")
            }
            Self::RabbitCount(n) => write!(f, "board must hold exactly one rabbit, found {n}"),
        }
    }
}

impl std::error::Error for SetupError {}
