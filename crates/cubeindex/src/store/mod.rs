//! Persistence collaborator: the solution index and the builder checkpoint.
//!
//! Contract
//! - `save` commits a whole batch plus the checkpoint atomically.
//! - Inserting an identity that is already present is a no-op; the first
//!   (shortest) solution stays.
//! - Lookups may run on many independent readers, one per worker.

mod memory;
mod sqlite;

use std::collections::HashMap;
use std::fmt;

use crate::canon::CubeId;
use crate::cube::FACE_MOVES;
use crate::movegraph::{Cursor, GraphError};

pub use memory::MemoryIndex;
pub use sqlite::{SqliteIndex, SqliteReader};

/// Longest solution one index row can hold (4 bits per move in a `u64`).
pub const MAX_SOLUTION_LEN: usize = 16;

/// Face-turn string packed one nibble per move, first move in the lowest
/// nibble; nibble 0 terminates. Codes follow `FACE_MOVES` starting at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodedSolution(pub u64);

impl EncodedSolution {
    pub fn pack(moves: &str) -> Result<Self, StoreError> {
        let len = moves.chars().count();
        if len > MAX_SOLUTION_LEN {
            return Err(StoreError::SolutionTooLong { len });
        }
        let mut packed = 0u64;
        for label in moves.chars().rev() {
            let code = FACE_MOVES
                .iter()
                .position(|&m| m == label)
                .ok_or(StoreError::NotAFaceMove { label })?;
            packed = (packed << 4) | (code as u64 + 1);
        }
        Ok(Self(packed))
    }

    pub fn unpack(self) -> String {
        let mut rest = self.0;
        let mut out = String::with_capacity(MAX_SOLUTION_LEN);
        while rest & 0xF != 0 {
            match FACE_MOVES.get((rest & 0xF) as usize - 1) {
                Some(&m) => out.push(m),
                None => break,
            }
            rest >>= 4;
        }
        out
    }

    pub fn len(self) -> usize {
        (0..MAX_SOLUTION_LEN)
            .take_while(|k| (self.0 >> (4 * k)) & 0xF != 0)
            .count()
    }

    pub fn is_empty(self) -> bool {
        self.0 & 0xF == 0
    }
}

/// Where the builder resumes: sequences already emitted and the cursor of
/// the next one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub emitted: u64,
    pub cursor: Cursor,
}

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    SolutionTooLong { len: usize },
    NotAFaceMove { label: char },
    BadCheckpoint(GraphError),
    Poisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(e) => write!(f, "sqlite: {e}"),
            Self::SolutionTooLong { len } => write!(
                f,
                "solution of {len} moves exceeds the {MAX_SOLUTION_LEN}-move row limit"
            ),
            Self::NotAFaceMove { label } => {
                write!(f, "only face turns can be stored, got {label:?}")
            }
            Self::BadCheckpoint(e) => write!(f, "stored checkpoint is unusable: {e}"),
            Self::Poisoned => write!(f, "in-memory index lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sqlite(e) => Some(e),
            Self::BadCheckpoint(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e)
    }
}

/// Read access to stored solutions.
pub trait SolutionLookup {
    fn lookup_solution(&mut self, id: CubeId) -> Result<Option<EncodedSolution>, StoreError>;
}

/// The single writer side of the index.
pub trait IndexStore: SolutionLookup + Send {
    /// Insert-or-ignore every row and replace the checkpoint, all or nothing.
    /// Returns the number of rows that were new.
    fn save(
        &mut self,
        batch: &HashMap<CubeId, EncodedSolution>,
        checkpoint: &Checkpoint,
    ) -> Result<usize, StoreError>;

    /// Last committed checkpoint, or the start of the enumeration.
    fn checkpoint(&mut self) -> Result<Checkpoint, StoreError>;
}

/// Opens independent readers so each lookup worker owns its own handle.
pub trait ReaderFactory {
    type Reader: SolutionLookup + Send;

    fn open_reader(&self) -> Result<Self::Reader, StoreError>;
}

#[cfg(test)]
mod tests;
