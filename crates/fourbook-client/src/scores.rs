use crate::{Column, WIDTH};

/// Per-column evaluation reported by the engine.
///
/// `None` marks a column without an evaluation (full column, finished game, or a
/// position the engine cannot score).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnScores([Option<i32>; WIDTH]);

impl ColumnScores {
    pub const ABSENT: Self = Self([None; WIDTH]);

    #[must_use]
    pub fn new(scores: [Option<i32>; WIDTH]) -> Self {
        Self(scores)
    }

    #[must_use]
    pub fn get(&self, column: Column) -> Option<i32> {
        self.0[column.index()]
    }

    /// Scores paired with their column, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (Column, Option<i32>)> + '_ {
        Column::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// The highest-scoring column, leftmost on ties.
    #[must_use]
    pub fn best(&self) -> Option<Column> {
        self.iter()
            .filter_map(|(column, score)| Some((column, score?)))
            .fold(None, |best: Option<(Column, i32)>, (column, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((column, score)),
            })
            .map(|(column, _)| column)
    }
}

impl From<[Option<i32>; WIDTH]> for ColumnScores {
    fn from(scores: [Option<i32>; WIDTH]) -> Self {
        Self(scores)
    }
}
