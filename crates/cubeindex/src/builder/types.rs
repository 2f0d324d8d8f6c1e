use std::fmt;
use std::path::PathBuf;

use crate::canon::CanonError;
use crate::cube::CubeError;
use crate::movegraph::GraphError;
use crate::store::{StoreError, MAX_SOLUTION_LEN};

/// Abort the run once free space on `path`'s volume drops below the margin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskGuard {
    pub path: PathBuf,
    pub min_free_bytes: u64,
}

/// Offline builder knobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderCfg {
    /// Last depth to enumerate (inclusive). At most `MAX_SOLUTION_LEN`.
    pub max_depth: usize,
    /// Sequences per committed batch; a batch never spans two depths.
    pub batch_size: usize,
    /// Canonicalisation workers.
    pub workers: usize,
    pub disk_guard: Option<DiskGuard>,
}

impl Default for BuilderCfg {
    fn default() -> Self {
        Self {
            max_depth: MAX_SOLUTION_LEN,
            batch_size: 1000,
            workers: 4,
            disk_guard: None,
        }
    }
}

impl BuilderCfg {
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_depth > MAX_SOLUTION_LEN {
            return Err(BuildError::config(format!(
                "max_depth {} exceeds the {MAX_SOLUTION_LEN}-move row limit",
                self.max_depth
            )));
        }
        if self.batch_size == 0 {
            return Err(BuildError::config("batch_size must be at least 1"));
        }
        if self.workers == 0 {
            return Err(BuildError::config("workers must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every sequence up to `max_depth` has been committed.
    MaxDepth,
    /// The stop flag was raised; the checkpoint marks where to resume.
    Stopped,
}

/// Summary of one builder run (counts cover this run only, except `emitted`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub reason: StopReason,
    /// Sequences emitted since the index was created.
    pub emitted: u64,
    /// New index rows committed by this run.
    pub inserted: u64,
    pub batches: u64,
    /// Sequences whose state could not be canonicalised or packed.
    pub skipped: u64,
    /// Depth of the next sequence to generate.
    pub next_depth: usize,
}

#[derive(Debug)]
pub enum BuildError {
    Config { reason: String },
    Graph(GraphError),
    Store(StoreError),
    LowDiskSpace {
        path: PathBuf,
        available: u64,
        required: u64,
    },
    DiskQuery { path: PathBuf, reason: String },
    /// A worker thread exited before the run finished.
    WorkerLost,
}

impl BuildError {
    fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { reason } => write!(f, "invalid builder config: {reason}"),
            Self::Graph(e) => write!(f, "move graph: {e}"),
            Self::Store(e) => write!(f, "index store: {e}"),
            Self::LowDiskSpace {
                path,
                available,
                required,
            } => write!(
                f,
                "only {available} bytes free at {} (need {required})",
                path.display()
            ),
            Self::DiskQuery { path, reason } => {
                write!(f, "cannot query free space at {}: {reason}", path.display())
            }
            Self::WorkerLost => write!(f, "a builder worker exited early"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for BuildError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl From<StoreError> for BuildError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Why one generated sequence produced no index row.
#[derive(Debug)]
pub enum RecordError {
    Cube(CubeError),
    Canon(CanonError),
    Store(StoreError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cube(e) => e.fmt(f),
            Self::Canon(e) => e.fmt(f),
            Self::Store(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<CubeError> for RecordError {
    fn from(e: CubeError) -> Self {
        Self::Cube(e)
    }
}

impl From<CanonError> for RecordError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

impl From<StoreError> for RecordError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
