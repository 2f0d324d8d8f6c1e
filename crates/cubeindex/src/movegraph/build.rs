//! Graph sources: the square label matrix, CSV text, and the built-in graphs.
//!
//! Matrix cell `[i][j]` holds the move label that leads from node `i` to
//! node `j`, or `NO_EDGE`.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::cube::{is_face_move, FACE_MOVES};

use super::types::{GraphError, MoveGraph, Node, NodeId};

/// Matrix cell marking "no edge".
pub const NO_EDGE: &str = "_";

impl MoveGraph {
    /// Build the arena from a square label matrix.
    pub fn from_matrix(rows: &[Vec<String>]) -> Result<Self, GraphError> {
        let n = rows.len();
        if n == 0 {
            return Err(GraphError::Empty);
        }
        let mut nodes = Vec::with_capacity(n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(GraphError::NotSquare {
                    row: i,
                    len: row.len(),
                    width: n,
                });
            }
            let mut edges: Vec<(String, NodeId)> = row
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.as_str() != NO_EDGE && !cell.is_empty())
                .map(|(j, cell)| (cell.clone(), NodeId(j)))
                .collect();
            if let Some((label, _)) = edges.iter().find(|(l, _)| !is_move_label(l)) {
                return Err(GraphError::UnknownLabel {
                    node: i,
                    label: label.clone(),
                });
            }
            edges.sort();
            if let Some(w) = edges.windows(2).find(|w| w[0].0 == w[1].0) {
                return Err(GraphError::DuplicateLabel {
                    node: i,
                    label: w[0].0.clone(),
                });
            }
            nodes.push(Node {
                id: NodeId(i),
                edges,
            });
        }
        let graph = Self { nodes };
        graph.check_no_dead_ends()?;
        Ok(graph)
    }

    fn check_no_dead_ends(&self) -> Result<(), GraphError> {
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([Self::ROOT]);
        seen[Self::ROOT.0] = true;
        while let Some(id) = queue.pop_front() {
            let node = self.node(id);
            if node.edges.is_empty() {
                return Err(GraphError::DeadEnd { node: id.0 });
            }
            for &(_, to) in node.edges.iter() {
                if !std::mem::replace(&mut seen[to.0], true) {
                    queue.push_back(to);
                }
            }
        }
        Ok(())
    }

    /// Parse comma-separated matrix text, one row per line.
    pub fn from_csv_str(text: &str) -> Result<Self, GraphError> {
        let rows: Vec<Vec<String>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(split_cells)
            .collect();
        Self::from_matrix(&rows)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_csv_str(&text)
    }

    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        let n = self.nodes.len();
        self.nodes
            .iter()
            .map(|node| {
                let mut row = vec![NO_EDGE.to_string(); n];
                for (label, to) in node.edges.iter() {
                    row[to.0] = label.clone();
                }
                row
            })
            .collect()
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in self.to_matrix() {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// Every face turn after every node; no redundancy removed.
    ///
    /// Node 0 is the start, node `k + 1` is "last move was `FACE_MOVES[k]`".
    pub fn unpruned() -> Self {
        let n = FACE_MOVES.len() + 1;
        let rows: Vec<Vec<String>> = (0..n)
            .map(|_| {
                let mut row = vec![NO_EDGE.to_string(); n];
                for (k, m) in FACE_MOVES.iter().enumerate() {
                    row[k + 1] = m.to_string();
                }
                row
            })
            .collect();
        Self::build_trusted(&rows)
    }

    /// Face turns with the known redundant combinations removed.
    ///
    /// Excluded: a turn followed by its own inverse, two inverse turns of
    /// one face (use two clockwise turns), three turns of one face, and the
    /// `B`/`R`/`D` side of an opposite-face pair followed by its partner
    /// (those commute, so only the `F`/`L`/`U`-first order is kept).
    ///
    /// Nodes: 0 is the start, `1..=12` are "last move was `FACE_MOVES[k]`
    /// once", `13..=18` are "last two moves were the same clockwise turn".
    pub fn pruned() -> Self {
        let clockwise: Vec<char> = FACE_MOVES
            .iter()
            .copied()
            .filter(char::is_ascii_uppercase)
            .collect();
        let single = |m: char| {
            let k = FACE_MOVES.iter().position(|&f| f == m).unwrap_or(0);
            1 + k
        };
        let double = |m: char| {
            let k = clockwise.iter().position(|&f| f == m).unwrap_or(0);
            1 + FACE_MOVES.len() + k
        };
        let n = 1 + FACE_MOVES.len() + clockwise.len();

        // (last move, doubled) per node; None for the start.
        let mut last: Vec<Option<(char, bool)>> = vec![None];
        last.extend(FACE_MOVES.iter().map(|&m| Some((m, false))));
        last.extend(clockwise.iter().map(|&m| Some((m, true))));

        let rows: Vec<Vec<String>> = last
            .iter()
            .map(|state| {
                let mut row = vec![NO_EDGE.to_string(); n];
                for &m in FACE_MOVES.iter() {
                    let face = m.to_ascii_uppercase();
                    match *state {
                        None => row[single(m)] = m.to_string(),
                        Some((prev, doubled)) => {
                            let prev_face = prev.to_ascii_uppercase();
                            if prev_face == face {
                                if m == prev && !doubled && m.is_ascii_uppercase() {
                                    row[double(m)] = m.to_string();
                                }
                            } else if opposite_second(prev_face) != Some(face) {
                                row[single(m)] = m.to_string();
                            }
                        }
                    }
                }
                row
            })
            .collect();
        Self::build_trusted(&rows)
    }

    /// Built-in matrices are square with no dead ends by construction.
    fn build_trusted(rows: &[Vec<String>]) -> Self {
        let nodes = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut edges: Vec<(String, NodeId)> = row
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.as_str() != NO_EDGE)
                    .map(|(j, cell)| (cell.clone(), NodeId(j)))
                    .collect();
                edges.sort();
                Node {
                    id: NodeId(i),
                    edges,
                }
            })
            .collect();
        Self { nodes }
    }

    /// Number of sequences of each length `1..=max_depth` the graph allows.
    pub fn layer_sizes(&self, max_depth: usize) -> Vec<u128> {
        let mut counts = vec![0u128; self.nodes.len()];
        counts[Self::ROOT.0] = 1;
        let mut layers = Vec::with_capacity(max_depth);
        for _ in 0..max_depth {
            let mut next = vec![0u128; self.nodes.len()];
            for (from, node) in self.nodes.iter().enumerate() {
                for &(_, to) in node.edges.iter() {
                    next[to.0] = next[to.0].saturating_add(counts[from]);
                }
            }
            let total = next.iter().fold(0u128, |a, &b| a.saturating_add(b));
            layers.push(total);
            counts = next;
        }
        layers
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|c| c.trim().to_string()).collect()
}

/// A graph edge is a single face turn; rotations are not edges.
fn is_move_label(label: &str) -> bool {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_face_move(c),
        _ => false,
    }
}

/// For the `B`/`R`/`D` face of an opposite pair, the face that may not follow it.
fn opposite_second(face: char) -> Option<char> {
    match face {
        'B' => Some('F'),
        'R' => Some('L'),
        'D' => Some('U'),
        _ => None,
    }
}
