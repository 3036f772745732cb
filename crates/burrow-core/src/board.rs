//! The [`Board`] type: a square grid of [`Cell`]s.
//!
//! Unlike a shared-buffer grid view, a `Board` owns its storage outright.
//! Cloning yields an independent snapshot, so a search running over one
//! snapshot never observes later moves made on another.

use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::geom::{Coord, Range};

/// A square grid of cells stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: i32,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a `size`×`size` board filled with [`Cell::Pathway`].
    ///
    /// Negative sizes are clamped to zero.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            cells: vec![Cell::Pathway; (size as usize) * (size as usize)],
        }
    }

    /// Build a board from text rows of cell symbols. Whitespace between
    /// symbols is ignored, so both `"r-c"` and `"r - c"` are accepted.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ParseBoardError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let mut width = 0;
            for (col, ch) in line.as_ref().chars().filter(|c| !c.is_whitespace()).enumerate() {
                let cell = Cell::from_symbol(ch).ok_or(ParseBoardError::InvalidSymbol {
                    ch,
                    pos: Coord::new(row as i32, col as i32),
                })?;
                cells.push(cell);
                width += 1;
            }
            if width != size {
                return Err(ParseBoardError::NotSquare {
                    row: row as i32,
                    width,
                    expected: size,
                });
            }
        }
        Ok(Self {
            size: size as i32,
            cells,
        })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The bounding range, `[0, size)` on both axes.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::square(self.size)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies on the board.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds().contains(c)
    }

    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row as usize) * (self.size as usize) + (c.col as usize))
    }

    /// Get the cell at `c`, or `None` if off the board.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<Cell> {
        self.index(c).map(|i| self.cells[i])
    }

    /// Set the cell at `c`. Does nothing if off the board.
    pub fn set(&mut self, c: Coord, cell: Cell) {
        if let Some(i) = self.index(c) {
            self.cells[i] = cell;
        }
    }

    /// Count how many cells equal `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, f: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|&&c| f(c)).count()
    }

    /// Coordinates of every cell equal to `cell`, row-major.
    pub fn find_all(&self, cell: Cell) -> Vec<Coord> {
        self.iter()
            .filter_map(|(c, v)| (v == cell).then_some(c))
            .collect()
    }

    /// The first rabbit cell in row-major order.
    pub fn rabbit(&self) -> Option<Coord> {
        self.iter().find_map(|(c, v)| v.is_rabbit().then_some(c))
    }

    /// Orthogonal neighbours of `c` that lie on the board, with their
    /// contents, in order up, down, left, right.
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        c.neighbors_4()
            .into_iter()
            .filter_map(|n| self.at(n).map(|cell| (n, cell)))
    }

    /// Iterate the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1) as usize)
    }

    /// Row-major iterator over `(Coord, Cell)` pairs.
    pub fn iter(&self) -> BoardIter<'_> {
        BoardIter {
            board: self,
            inner: self.bounds().iter(),
        }
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty()).collect();
        Board::from_rows(&rows)
    }
}

/// One row per line, symbols separated by a single space.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BoardIter
// ---------------------------------------------------------------------------

/// Iterator over `(Coord, Cell)` pairs of a [`Board`].
pub struct BoardIter<'a> {
    board: &'a Board,
    inner: crate::geom::RangeIter,
}

impl Iterator for BoardIter<'_> {
    type Item = (Coord, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        self.board.at(c).map(|cell| (c, cell))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = (Coord, Cell);
    type IntoIter = BoardIter<'a>;

    fn into_iter(self) -> BoardIter<'a> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a text board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// A row does not have as many cells as there are rows.
    NotSquare {
        row: i32,
        width: usize,
        expected: usize,
    },
    /// A character that is not a cell symbol was found.
    InvalidSymbol { ch: char, pos: Coord },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSquare {
                row,
                width,
                expected,
            } => write!(f, "board row {row} has {width} cells, expected {expected}"),
            Self::InvalidSymbol { ch, pos } => {
                write!(f, "board contains invalid symbol \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for ParseBoardError {}
