//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. Breaking changes are allowed and expected.
//! - Prefer these re-exports over deep module paths in binaries and benches.

// State engine and notation
pub use crate::cube::notation::{remove_rotation_transforms, reverse_transform, rotate_transform};
pub use crate::cube::{random_scramble, CubeError, CubeState, FACELETS, FACE_MOVES};
// Canonical identity
pub use crate::canon::{
    distinct_rotations, encode, encode_layout, CanonError, Canonical, CubeId, ROTATION_TAGS,
    SOLVED_ID,
};
// Move graphs and enumeration
pub use crate::movegraph::{Cursor, Generator, GraphError, MoveGraph, NO_EDGE};
// Persistence
pub use crate::store::{
    Checkpoint, EncodedSolution, IndexStore, MemoryIndex, ReaderFactory, SolutionLookup,
    SqliteIndex, StoreError, MAX_SOLUTION_LEN,
};
// Builder and solver
pub use crate::builder::{
    build_index, index_record, BuildError, BuildReport, BuilderCfg, DiskGuard, StopReason,
};
pub use crate::solver::{lookup_state, solve, SolveError, SolverCfg};
pub use crate::REACHABLE_STATES;
