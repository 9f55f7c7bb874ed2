//! Engine collaborator for the fourbook client.
//!
//! The engine owns the authoritative game state: which moves were played, whether a
//! move is legal, and how each column scores. The client only reaches it through the
//! command-level [`EngineSession`].
//!
//! Column scores come from an [`OpeningBook`] plus immediate-win detection. There is
//! no search: positions the book does not cover score as `None`.

pub use self::{book::*, core::*, session::*};

mod book;
pub mod core;
mod session;

/// Error returned when a move cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    #[display("column {column} is full")]
    ColumnFull { column: Column },
    #[display("game is already decided")]
    GameOver,
}

/// Error returned when a move string cannot be replayed into a [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PositionError {
    #[display("invalid move {found:?} at index {index}")]
    InvalidColumn { index: usize, found: char },
    #[display("illegal move at index {index}: {source}")]
    IllegalMove { index: usize, source: PlayError },
}
