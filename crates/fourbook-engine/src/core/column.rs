use super::WIDTH;

/// A board column, numbered from 1 (leftmost) to [`WIDTH`] (rightmost).
///
/// The 1-based number is what travels over the command protocol and what appears in
/// encoded boards; [`Column::index`] gives the 0-based offset used for storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct Column(u8);

/// Error returned when a column number is outside `1..=WIDTH`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("column {number} is out of range")]
pub struct ColumnError {
    pub number: usize,
}

impl Column {
    /// All columns from left to right.
    pub const ALL: [Self; WIDTH] = {
        let mut columns = [Column(1); WIDTH];
        let mut i = 0;
        while i < WIDTH {
            #[expect(clippy::cast_possible_truncation)]
            let number = (i + 1) as u8;
            columns[i] = Column(number);
            i += 1;
        }
        columns
    };

    pub fn new(number: usize) -> Result<Self, ColumnError> {
        if !(1..=WIDTH).contains(&number) {
            return Err(ColumnError { number });
        }
        u8::try_from(number)
            .map(Self)
            .map_err(|_| ColumnError { number })
    }

    /// Creates a column from its 0-based storage offset.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses a column from its encoded-board digit (`'1'..='7'`).
    #[must_use]
    pub fn from_digit(ch: char) -> Option<Self> {
        let number = ch.to_digit(10)?;
        Self::new(usize::try_from(number).ok()?).ok()
    }

    /// Returns the 1-based column number.
    #[must_use]
    pub fn number(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the 0-based column offset.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Returns the encoded-board digit for this column.
    #[must_use]
    pub fn digit(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<usize> for Column {
    type Error = ColumnError;

    fn try_from(number: usize) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}
