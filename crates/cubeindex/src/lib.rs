//! Minimal-move solution index for the 3×3×3 cube.
//!
//! Layers, leaves first
//! - `cube`: facelet permutations, move application, move-string notation.
//! - `canon`: 128-bit identity of a configuration up to whole-cube rotation.
//! - `movegraph`: move-adjacency graphs and the resumable sequence generator.
//! - `store`: solution index persistence (SQLite or in-memory).
//! - `builder`: offline breadth-first index construction.
//! - `solver`: index lookup with a bounded parallel search fallback.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - `api` re-exports the names callers normally need; `prelude` is the
//!   short list for quick imports.

pub mod api;
pub mod builder;
pub mod canon;
pub mod cube;
pub mod movegraph;
pub mod solver;
pub mod store;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of configurations reachable from the solved cube.
pub const REACHABLE_STATES: u128 = 43_252_003_274_489_856_000;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::builder::{build_index, BuilderCfg, StopReason};
    pub use crate::canon::{encode, CubeId};
    pub use crate::cube::CubeState;
    pub use crate::movegraph::{Generator, MoveGraph};
    pub use crate::solver::{solve, SolverCfg};
    pub use crate::store::{MemoryIndex, SqliteIndex};
}
