use std::path::Path;

use crate::{BookError, CAPACITY, Column, OpeningBook, PlayError, Position, WIDTH};

/// Per-column scores, `None` where no evaluation is available.
pub type Scores = [Option<i32>; WIDTH];

/// Authoritative game state behind the command protocol.
///
/// Holds the loaded book, the current position, the positions before each move and
/// the move string. Every command the client can issue maps to one method here.
#[derive(Debug, Clone, Default)]
pub struct EngineSession {
    book: OpeningBook,
    position: Position,
    history: Vec<Position>,
    moves: String,
}

impl EngineSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_book(book: OpeningBook) -> Self {
        Self {
            book,
            ..Self::default()
        }
    }

    /// Replaces the loaded book. The current position is kept.
    pub fn open_book(&mut self, path: impl AsRef<Path>) -> Result<(), BookError> {
        self.book = OpeningBook::open(path)?;
        Ok(())
    }

    #[must_use]
    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the move string: one column digit per move, in play order.
    #[must_use]
    pub fn encoded_board(&self) -> &str {
        &self.moves
    }

    /// Scores every column from the point of view of the player to move.
    ///
    /// A column that wins immediately scores `(CAPACITY + 1 - moves) / 2`. Other playable
    /// columns take the negated book score of the resulting position. Full columns, a
    /// decided game and positions missing from the book give `None`.
    #[must_use]
    pub fn columns_score(&self) -> Scores {
        let mut scores = [None; WIDTH];
        if self.position.is_decided() {
            return scores;
        }

        for (column, score) in Column::ALL.into_iter().zip(&mut scores) {
            if !self.position.can_play(column) {
                continue;
            }
            if self.position.is_winning_move(column) {
                *score = i32::try_from((CAPACITY + 1 - self.position.moves()) / 2).ok();
                continue;
            }
            let mut child = self.position;
            if child.play(column).is_ok() {
                *score = self.book.score(&child).map(|s| -s);
            }
        }
        scores
    }

    pub fn play_column(&mut self, column: Column) -> Result<(), PlayError> {
        let previous = self.position;
        self.position.play(column)?;
        self.history.push(previous);
        self.moves.push(column.digit());
        Ok(())
    }

    /// Retracts the last move by restoring the position saved before it.
    ///
    /// Returns `false` (and does nothing) on an empty board.
    pub fn back_move(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.position = previous;
        self.moves.pop();
        true
    }

    pub fn reset_game(&mut self) {
        self.position = Position::EMPTY;
        self.history.clear();
        self.moves.clear();
    }
}
