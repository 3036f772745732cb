//! The [`Cell`] type: the content of one board position.

use std::fmt;

/// What occupies a single board position.
///
/// Exactly one cell on an active board holds the rabbit, as either
/// [`Cell::RabbitPlain`] or [`Cell::RabbitCarrying`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Pathway,
    Carrot,
    RabbitHole,
    RabbitPlain,
    RabbitCarrying,
}

impl Cell {
    /// All cell kinds, in declaration order.
    pub const ALL: [Cell; 5] = [
        Cell::Pathway,
        Cell::Carrot,
        Cell::RabbitHole,
        Cell::RabbitPlain,
        Cell::RabbitCarrying,
    ];

    /// Single-character symbol used by the text board.
    pub const fn symbol(self) -> char {
        match self {
            Cell::Pathway => '-',
            Cell::Carrot => 'c',
            Cell::RabbitHole => 'O',
            Cell::RabbitPlain => 'r',
            Cell::RabbitCarrying => 'R',
        }
    }

    /// Inverse of [`symbol`](Cell::symbol).
    pub const fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '-' => Some(Cell::Pathway),
            'c' => Some(Cell::Carrot),
            'O' => Some(Cell::RabbitHole),
            'r' => Some(Cell::RabbitPlain),
            'R' => Some(Cell::RabbitCarrying),
            _ => None,
        }
    }

    /// The rabbit cell tag for the given carrying flag.
    #[inline]
    pub const fn rabbit(carrying: bool) -> Cell {
        if carrying {
            Cell::RabbitCarrying
        } else {
            Cell::RabbitPlain
        }
    }

    /// Whether this cell holds the rabbit.
    #[inline]
    pub const fn is_rabbit(self) -> bool {
        matches!(self, Cell::RabbitPlain | Cell::RabbitCarrying)
    }

    /// Whether a path may go through this cell. Carrots block paths.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, Cell::Carrot)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
