//! Board decoding.
//!
//! The engine reports its position as a move string: one column digit (`1..=WIDTH`)
//! per move, in play order. Who played a move is never stored; it follows from the
//! move's index (see [`Player::for_move`]). [`decode`] rebuilds the whole grid from
//! that string every time it is called.

use std::{fmt, str::FromStr};

use crate::{Column, HEIGHT, WIDTH};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the player who made the move at `index` (0-based) of a move string.
    ///
    /// Even indices belong to [`Player::One`], odd indices to [`Player::Two`].
    #[must_use]
    pub fn for_move(index: usize) -> Self {
        if index % 2 == 0 { Self::One } else { Self::Two }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

/// Decoded board, `HEIGHT` rows of `WIDTH` cells. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [[Cell; WIDTH]; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; WIDTH]; HEIGHT],
    };

    /// Rows from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[[Cell; WIDTH]; HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: Column) -> Cell {
        self.rows[row][column.index()]
    }

    /// Cells of `column` from the bottom row upward.
    pub fn column_from_bottom(&self, column: Column) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().rev().map(move |row| row[column.index()])
    }

    fn lowest_empty_row(&self, column: Column) -> Option<usize> {
        (0..HEIGHT)
            .rev()
            .find(|&row| self.rows[row][column.index()].is_empty())
    }
}

/// Error returned by [`decode`] for a move string the engine should never produce.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DecodeError {
    #[display("invalid column digit {found:?} at index {index}")]
    InvalidDigit { index: usize, found: char },
    #[display("move at index {index} overflows full column {column}")]
    ColumnFull { index: usize, column: Column },
}

/// Rebuilds the grid described by a move string.
///
/// Each move drops a piece into the lowest empty row of its column. A digit outside
/// `1..=WIDTH` or a move into a full column stops decoding with an error; no partial
/// grid is returned.
pub fn decode(encoded: &str) -> Result<Grid, DecodeError> {
    let mut grid = Grid::EMPTY;
    for (index, found) in encoded.chars().enumerate() {
        let column = Column::from_digit(found).ok_or(DecodeError::InvalidDigit { index, found })?;
        let row = grid
            .lowest_empty_row(column)
            .ok_or(DecodeError::ColumnFull { index, column })?;
        grid.rows[row][column.index()] = Cell::Piece(Player::for_move(index));
    }
    Ok(grid)
}

/// A move string known to decode cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedBoard(String);

impl EncodedBoard {
    pub fn new(encoded: impl Into<String>) -> Result<Self, DecodeError> {
        let encoded = encoded.into();
        decode(&encoded)?;
        Ok(Self(encoded))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of moves played.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn next_player(&self) -> Player {
        Player::for_move(self.moves())
    }

    /// Decodes a fresh grid for rendering.
    #[must_use]
    pub fn grid(&self) -> Grid {
        decode(&self.0).expect("encoded board was validated on construction")
    }
}

impl FromStr for EncodedBoard {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for EncodedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
