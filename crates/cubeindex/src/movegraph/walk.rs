//! Odometer-style enumeration over the move graph.

use std::fmt;
use std::str::FromStr;

use super::types::{GraphError, MoveGraph, NodeId};

/// Position in the enumeration: the chosen edge index at every depth.
///
/// Serialises as a comma-joined list, e.g. `"3,0,7"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor(pub Vec<usize>);

impl Cursor {
    /// First sequence of length one.
    pub fn start() -> Self {
        Self(vec![0])
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for Cursor {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stack = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|e| GraphError::bad_cursor(format!("{part:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(stack))
    }
}

/// Single-owner generator over one graph. Not meant to be shared between
/// threads; hand out the sequences it produces instead.
#[derive(Clone, Debug)]
pub struct Generator<'g> {
    graph: &'g MoveGraph,
    stack: Vec<usize>,
    nodes: Vec<NodeId>,
    emitted: u64,
}

impl<'g> Generator<'g> {
    pub fn new(graph: &'g MoveGraph) -> Self {
        let mut g = Self {
            graph,
            stack: vec![0],
            nodes: vec![MoveGraph::ROOT],
            emitted: 0,
        };
        g.rebuild_from(1);
        g
    }

    /// Continue from a stored cursor; `emitted` restores the sequence counter.
    pub fn resume(graph: &'g MoveGraph, cursor: &Cursor, emitted: u64) -> Result<Self, GraphError> {
        if cursor.0.is_empty() {
            return Err(GraphError::bad_cursor("empty stack"));
        }
        let mut nodes = Vec::with_capacity(cursor.depth());
        let mut at = MoveGraph::ROOT;
        for (level, &choice) in cursor.0.iter().enumerate() {
            nodes.push(at);
            let node = graph.node(at);
            let (_, to) = node.edges.get(choice).ok_or_else(|| {
                GraphError::bad_cursor(format!(
                    "index {choice} at depth {level} exceeds {} outbound moves",
                    node.out_degree()
                ))
            })?;
            at = *to;
        }
        Ok(Self {
            graph,
            stack: cursor.0.clone(),
            nodes,
            emitted,
        })
    }

    /// Move sequence at the cursor.
    pub fn current(&self) -> String {
        self.stack
            .iter()
            .zip(self.nodes.iter())
            .map(|(&choice, &node)| self.label(node, choice))
            .collect()
    }

    fn label(&self, node: NodeId, choice: usize) -> &'g str {
        self.graph.node(node).edges[choice].0.as_str()
    }

    /// Return the sequence at the cursor and advance past it.
    pub fn next_sequence(&mut self) -> String {
        let out = self.current();
        self.emitted += 1;
        self.advance();
        out
    }

    fn advance(&mut self) {
        for level in (0..self.stack.len()).rev() {
            let next = self.stack[level] + 1;
            if next < self.graph.node(self.nodes[level]).out_degree() {
                self.stack[level] = next;
                self.rebuild_from(level + 1);
                return;
            }
        }
        // Every level exhausted: one move longer, back to all zeros.
        self.stack.push(0);
        self.nodes.push(MoveGraph::ROOT);
        self.stack[0] = 0;
        self.rebuild_from(1);
    }

    /// Reset levels `from..` to their first edge, following the chosen path.
    fn rebuild_from(&mut self, from: usize) {
        for level in from.max(1)..self.stack.len() {
            let prev = self.graph.node(self.nodes[level - 1]);
            self.nodes[level] = prev.edges[self.stack[level - 1]].1;
            self.stack[level] = 0;
        }
    }

    /// Length of the sequence `next_sequence` will return.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of sequences emitted so far (including those before a resume).
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn cursor(&self) -> Cursor {
        Cursor(self.stack.clone())
    }

    /// Fraction of the current length already emitted, read off the cursor
    /// as a mixed-radix number. Exact when every branch is equally deep.
    pub fn layer_progress(&self) -> f64 {
        let mut scale = 1.0;
        let mut progress = 0.0;
        for (&choice, &node) in self.stack.iter().zip(self.nodes.iter()) {
            scale /= self.graph.node(node).out_degree() as f64;
            progress += choice as f64 * scale;
        }
        progress
    }
}

impl Iterator for Generator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_sequence())
    }
}
