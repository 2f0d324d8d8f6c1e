//! In-process index sharing one map between the writer and its readers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::canon::CubeId;

use super::{Checkpoint, EncodedSolution, IndexStore, ReaderFactory, SolutionLookup, StoreError};

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<CubeId, EncodedSolution>,
    checkpoint: Checkpoint,
}

/// Cloning yields another handle onto the same rows.
#[derive(Clone, Debug, Default)]
pub struct MemoryIndex {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Copy of every stored row.
    pub fn rows(&self) -> Result<HashMap<CubeId, EncodedSolution>, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.rows.clone())
    }

    /// Panic on another thread while holding the write lock.
    #[cfg(test)]
    pub(super) fn poison(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.write();
            panic!("writer died holding the lock");
        })
        .join();
    }
}

impl SolutionLookup for MemoryIndex {
    fn lookup_solution(&mut self, id: CubeId) -> Result<Option<EncodedSolution>, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.rows.get(&id).copied())
    }
}

impl IndexStore for MemoryIndex {
    fn save(
        &mut self,
        batch: &HashMap<CubeId, EncodedSolution>,
        checkpoint: &Checkpoint,
    ) -> Result<usize, StoreError> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let mut inserted = 0;
        for (&id, &solution) in batch {
            if let std::collections::hash_map::Entry::Vacant(slot) = guard.rows.entry(id) {
                slot.insert(solution);
                inserted += 1;
            }
        }
        guard.checkpoint = checkpoint.clone();
        Ok(inserted)
    }

    fn checkpoint(&mut self) -> Result<Checkpoint, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.checkpoint.clone())
    }
}

impl ReaderFactory for MemoryIndex {
    type Reader = MemoryIndex;

    fn open_reader(&self) -> Result<MemoryIndex, StoreError> {
        Ok(self.clone())
    }
}
