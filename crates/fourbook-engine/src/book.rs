use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::Position;

const SCORE_SHIFT: i32 = 127;
const KEY_BYTES: usize = 7;
const RECORD_BYTES: usize = KEY_BYTES + 1;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BookError {
    #[display("book I/O error: {_0}")]
    Io(io::Error),
    #[display("book size {len} is not a whole number of records")]
    Truncated { len: usize },
    #[display("score {score} cannot be stored in a book record")]
    ScoreOutOfRange { score: i32 },
}

impl From<io::Error> for BookError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Precomputed position scores.
///
/// On disk a book is a flat sequence of 8-byte records: the low 7 bytes of the
/// position key in little-endian order, then the score offset by 127.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<u64, i32>,
}

impl OpeningBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    pub fn read_from(mut reader: impl Read) -> Result<Self, BookError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        if bytes.len() % RECORD_BYTES != 0 {
            return Err(BookError::Truncated { len: bytes.len() });
        }

        let entries = bytes
            .chunks_exact(RECORD_BYTES)
            .map(|record| {
                let mut key = [0; 8];
                key[..KEY_BYTES].copy_from_slice(&record[..KEY_BYTES]);
                let score = i32::from(record[KEY_BYTES]) - SCORE_SHIFT;
                (u64::from_le_bytes(key), score)
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BookError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to(&self, mut writer: impl Write) -> Result<(), BookError> {
        let mut keys: Vec<_> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        for key in keys {
            let score = self.entries[&key];
            let stored = score
                .checked_add(SCORE_SHIFT)
                .and_then(|stored| u8::try_from(stored).ok())
                .ok_or(BookError::ScoreOutOfRange { score })?;
            writer.write_all(&key.to_le_bytes()[..KEY_BYTES])?;
            writer.write_all(&[stored])?;
        }
        Ok(())
    }

    /// Records the score of `position` from the point of view of the player to move.
    pub fn insert(&mut self, position: &Position, score: i32) {
        self.entries.insert(position.key(), score);
    }

    #[must_use]
    pub fn score(&self, position: &Position) -> Option<i32> {
        self.entries.get(&position.key()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
