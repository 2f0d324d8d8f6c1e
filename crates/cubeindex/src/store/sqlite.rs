//! SQLite-backed index.
//!
//! Schema
//! - `cubes(cube_id_l, cube_id_h, solution)`: identity halves and packed
//!   solution, stored as signed 64-bit integers; primary key on the halves.
//! - `next_transform(id, transform_no, stack)`: one checkpoint row, `id = 1`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};

use crate::canon::CubeId;
use crate::movegraph::Cursor;

use super::{Checkpoint, EncodedSolution, IndexStore, ReaderFactory, SolutionLookup, StoreError};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_SOLUTION: &str = "SELECT solution FROM cubes WHERE cube_id_l = ?1 AND cube_id_h = ?2";

pub struct SqliteIndex {
    conn: Connection,
    path: PathBuf,
}

impl SqliteIndex {
    /// Open (or create) the index at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        // WAL lets lookup connections read while the builder writes.
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cubes (
                 cube_id_l INTEGER NOT NULL,
                 cube_id_h INTEGER NOT NULL,
                 solution  INTEGER,
                 PRIMARY KEY (cube_id_l, cube_id_h)
             );
             CREATE TABLE IF NOT EXISTS next_transform (
                 id           INTEGER NOT NULL PRIMARY KEY,
                 transform_no INTEGER NOT NULL,
                 stack        TEXT NOT NULL
             );",
        )?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored identities.
    pub fn len(&self) -> Result<u64, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cubes", [], |r| r.get(0))?;
        Ok(n as u64)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }
}

fn select_solution(conn: &Connection, id: CubeId) -> Result<Option<EncodedSolution>, StoreError> {
    let mut stmt = conn.prepare_cached(SELECT_SOLUTION)?;
    let found: Option<i64> = stmt
        .query_row(params![id.low() as i64, id.high() as i64], |r| r.get(0))
        .optional()?;
    Ok(found.map(|v| EncodedSolution(v as u64)))
}

impl SolutionLookup for SqliteIndex {
    fn lookup_solution(&mut self, id: CubeId) -> Result<Option<EncodedSolution>, StoreError> {
        select_solution(&self.conn, id)
    }
}

impl IndexStore for SqliteIndex {
    fn save(
        &mut self,
        batch: &HashMap<CubeId, EncodedSolution>,
        checkpoint: &Checkpoint,
    ) -> Result<usize, StoreError> {
        // Dropping `tx` on an early return rolls the whole batch back.
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO cubes (cube_id_l, cube_id_h, solution) VALUES (?1, ?2, ?3)",
            )?;
            for (id, solution) in batch {
                let (low, high) = (id.low() as i64, id.high() as i64);
                inserted += stmt.execute(params![low, high, solution.0 as i64])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO next_transform (id, transform_no, stack) VALUES (1, ?1, ?2)",
            params![checkpoint.emitted as i64, checkpoint.cursor.to_string()],
        )?;
        tx.commit()?;
        Ok(inserted)
    }

    fn checkpoint(&mut self) -> Result<Checkpoint, StoreError> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT transform_no, stack FROM next_transform WHERE id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        match row {
            None => Ok(Checkpoint::default()),
            Some((emitted, stack)) => Ok(Checkpoint {
                emitted: emitted as u64,
                cursor: stack.parse::<Cursor>().map_err(StoreError::BadCheckpoint)?,
            }),
        }
    }
}

/// Read-only lookup connection owned by one worker.
pub struct SqliteReader {
    pub(super) conn: Connection,
}

impl SolutionLookup for SqliteReader {
    fn lookup_solution(&mut self, id: CubeId) -> Result<Option<EncodedSolution>, StoreError> {
        select_solution(&self.conn, id)
    }
}

impl ReaderFactory for SqliteIndex {
    type Reader = SqliteReader;

    fn open_reader(&self) -> Result<SqliteReader, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "query_only", true)?;
        Ok(SqliteReader { conn })
    }
}
