//! Move-adjacency graph and the deterministic move-sequence generator.
//!
//! Purpose
//! - Enumerate every move sequence the graph allows, shortest first and
//!   lexicographic by label within one length, without ever emitting the
//!   redundant combinations the graph leaves out.
//!
//! Design
//! - The graph is an arena of nodes addressed by `NodeId`; node 0 is the
//!   start. Edges carry the move label and the successor id, sorted by label.
//! - The generator's cursor is a stack of chosen edge indices (one per move),
//!   so a checkpoint is just that list of integers. Resuming re-walks the
//!   arena from the root with those indices.
//! - Redundancy pruning lives in the graph's shape (`MoveGraph::pruned`), not
//!   in the generator.

mod build;
mod types;
mod walk;

pub use build::NO_EDGE;
pub use types::{GraphError, MoveGraph, Node, NodeId};
pub use walk::{Cursor, Generator};

#[cfg(test)]
mod tests;
