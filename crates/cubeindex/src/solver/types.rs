use std::fmt;

use crate::canon::CanonError;
use crate::cube::CubeError;
use crate::store::StoreError;

/// Online solver knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverCfg {
    /// Lookup workers, each with its own reader.
    pub workers: usize,
    /// Longest search suffix tried on an index miss.
    pub max_depth: usize,
    /// Bound on candidates queued ahead of the workers.
    pub queue_capacity: usize,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            workers: 6,
            max_depth: 10,
            queue_capacity: 64,
        }
    }
}

impl SolverCfg {
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.workers == 0 {
            return Err(SolveError::Config {
                reason: "workers must be at least 1".into(),
            });
        }
        if self.queue_capacity == 0 {
            return Err(SolveError::Config {
                reason: "queue_capacity must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum SolveError {
    Config { reason: String },
    Cube(CubeError),
    Canon(CanonError),
    Store(StoreError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { reason } => write!(f, "invalid solver config: {reason}"),
            Self::Cube(e) => write!(f, "cube: {e}"),
            Self::Canon(e) => write!(f, "canonical encoding: {e}"),
            Self::Store(e) => write!(f, "index lookup: {e}"),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cube(e) => Some(e),
            Self::Canon(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Config { .. } => None,
        }
    }
}

impl From<CubeError> for SolveError {
    fn from(e: CubeError) -> Self {
        Self::Cube(e)
    }
}

impl From<CanonError> for SolveError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

impl From<StoreError> for SolveError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
