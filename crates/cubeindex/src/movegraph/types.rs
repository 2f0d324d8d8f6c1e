//! Graph arena types and errors.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// One graph node: the moves legal after reaching it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// Outbound `(label, successor)` pairs sorted by label.
    pub edges: Vec<(String, NodeId)>,
}

impl Node {
    #[inline]
    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(|(l, _)| l.as_str())
    }

    pub fn successor(&self, label: &str) -> Option<NodeId> {
        let (_, to) = self.edges.iter().find(|(l, _)| l == label)?;
        Some(*to)
    }
}

/// Arena of nodes; every node reachable from `ROOT` has at least one edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveGraph {
    pub(super) nodes: Vec<Node>,
}

impl MoveGraph {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    Empty,
    NotSquare {
        row: usize,
        len: usize,
        width: usize,
    },
    DuplicateLabel { node: usize, label: String },
    UnknownLabel { node: usize, label: String },
    DeadEnd { node: usize },
    BadCursor { reason: String },
    Io { path: String, reason: String },
}

impl GraphError {
    pub(super) fn bad_cursor(reason: impl Into<String>) -> Self {
        Self::BadCursor {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "move graph matrix is empty"),
            Self::NotSquare { row, len, width } => write!(
                f,
                "move graph matrix must be square: row {row} has {len} cells, expected {width}"
            ),
            Self::DuplicateLabel { node, label } => {
                write!(f, "node {node} has more than one edge labelled {label:?}")
            }
            Self::UnknownLabel { node, label } => {
                write!(f, "node {node} has non-move edge label {label:?}")
            }
            Self::DeadEnd { node } => {
                write!(f, "node {node} is reachable but has no outbound moves")
            }
            Self::BadCursor { reason } => write!(f, "invalid generator cursor: {reason}"),
            Self::Io { path, reason } => write!(f, "reading move graph {path}: {reason}"),
        }
    }
}

impl std::error::Error for GraphError {}
