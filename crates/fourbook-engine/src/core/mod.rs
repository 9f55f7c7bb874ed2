pub use self::{column::*, position::*};

mod column;
mod position;

/// Number of columns on the board.
pub const WIDTH: usize = 7;
/// Number of rows on the board.
pub const HEIGHT: usize = 6;
/// Number of cells on the board, which is also the maximum number of moves.
pub const CAPACITY: usize = WIDTH * HEIGHT;
