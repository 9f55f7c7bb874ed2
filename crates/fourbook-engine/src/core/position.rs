use crate::{PlayError, PositionError};

use super::{CAPACITY, Column, HEIGHT};

const COLUMN_STRIDE: usize = HEIGHT + 1;

/// Bitboard game position.
///
/// Each column occupies `HEIGHT + 1` bits, bottom cell in the lowest bit. The extra
/// bit per column keeps shifted alignment checks from bleeding into the next column.
///
/// ```text
///  6 13 20 27 34 41 48   <- spare row
///  5 12 19 26 33 40 47
///  4 11 18 25 32 39 46
///  3 10 17 24 31 38 45
///  2  9 16 23 30 37 44
///  1  8 15 22 29 36 43
///  0  7 14 21 28 35 42
/// ```
///
/// `mask` marks every occupied cell, `current` marks the cells of the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    current: u64,
    mask: u64,
    moves: usize,
    decided: bool,
}

fn top_mask(column: Column) -> u64 {
    (1 << (HEIGHT - 1)) << (column.index() * COLUMN_STRIDE)
}

fn bottom_mask(column: Column) -> u64 {
    1 << (column.index() * COLUMN_STRIDE)
}

fn column_mask(column: Column) -> u64 {
    ((1 << HEIGHT) - 1) << (column.index() * COLUMN_STRIDE)
}

fn has_alignment(stones: u64) -> bool {
    [1, COLUMN_STRIDE, HEIGHT, HEIGHT + 2].into_iter().any(|shift| {
        let pairs = stones & (stones >> shift);
        pairs & (pairs >> (2 * shift)) != 0
    })
}

impl Position {
    pub const EMPTY: Self = Self {
        current: 0,
        mask: 0,
        moves: 0,
        decided: false,
    };

    /// Replays a move string (one column digit per move) from the empty position.
    pub fn from_moves(moves: &str) -> Result<Self, PositionError> {
        let mut position = Self::EMPTY;
        for (index, found) in moves.chars().enumerate() {
            let column =
                Column::from_digit(found).ok_or(PositionError::InvalidColumn { index, found })?;
            position
                .play(column)
                .map_err(|source| PositionError::IllegalMove { index, source })?;
        }
        Ok(position)
    }

    /// Number of moves played so far.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns `true` once a move has completed four in a row.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.moves == CAPACITY
    }

    #[must_use]
    pub fn can_play(&self, column: Column) -> bool {
        self.mask & top_mask(column) == 0
    }

    /// Returns `true` if the player to move wins by dropping into `column`.
    ///
    /// `column` must be playable.
    #[must_use]
    pub fn is_winning_move(&self, column: Column) -> bool {
        let landing = (self.mask + bottom_mask(column)) & column_mask(column);
        has_alignment(self.current | landing)
    }

    /// Drops a stone for the player to move.
    pub fn play(&mut self, column: Column) -> Result<(), PlayError> {
        if self.decided {
            return Err(PlayError::GameOver);
        }
        if !self.can_play(column) {
            return Err(PlayError::ColumnFull { column });
        }
        let wins = self.is_winning_move(column);
        self.current ^= self.mask;
        self.mask |= self.mask + bottom_mask(column);
        self.moves += 1;
        self.decided = wins;
        Ok(())
    }

    /// Unique key for this position, as stored in opening books.
    #[must_use]
    pub fn key(&self) -> u64 {
        self.current + self.mask
    }
}
