//! Canonical identity of a cube configuration under the 24 rotations.
//!
//! Purpose
//! - Map every physical configuration to one 128-bit number regardless of
//!   how the cube is held, so that the solution index stores one row per
//!   equivalence class.
//!
//! Encoding
//! - For each rotation, read the 48 non-centre facelets of the rotated cube
//!   in position order and relabel each colour by the face centre that now
//!   carries it (centres are the only fixed reference). The 48 base-6 digits
//!   pack into a `u128`; the canonical identity is the smallest of the 24.
//! - The rotation achieving the minimum is reported as an "undo" tag: the
//!   lower-cased rotation string, which maps moves expressed in the
//!   canonical frame back into the caller's frame (see `rotate_transform`).

mod id;
mod rotations;

use std::fmt;

use crate::cube::{CubeState, FACELETS, FACE_CENTRES};

pub use id::CubeId;
pub use rotations::{rotation_source, ROTATION_TAGS, UNDO_TAGS};

/// Data-integrity failures while relabelling colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    UnmappedColour { colour: u8, position: usize },
}

impl fmt::Display for CanonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedColour { colour, position } => write!(
                f,
                "colour {colour} at position {position} matches no face centre"
            ),
        }
    }
}

impl std::error::Error for CanonError {}

/// Canonical identity plus the tag that undoes the canonicalising rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canonical {
    pub id: CubeId,
    pub undo: &'static str,
}

const fn is_centre(position: usize) -> bool {
    let mut k = 0;
    while k < FACE_CENTRES.len() {
        if FACE_CENTRES[k] == position {
            return true;
        }
        k += 1;
    }
    false
}

/// The identity of the solved cube (every rotation reads the same digits).
pub const SOLVED_ID: CubeId = {
    let layout = CubeState::SOLVED_LAYOUT;
    let mut id: u128 = 0;
    let mut k = 0;
    while k < FACELETS {
        if !is_centre(k) {
            id = id * 6 + layout[k] as u128;
        }
        k += 1;
    }
    CubeId(id)
};

fn rotated_id(layout: &[u8; FACELETS], source: &[u8; FACELETS]) -> Result<CubeId, CanonError> {
    const UNMAPPED: u8 = u8::MAX;
    let mut relabel = [UNMAPPED; 256];
    for (digit, &c) in FACE_CENTRES.iter().enumerate() {
        relabel[layout[source[c] as usize] as usize] = digit as u8;
    }
    let mut id: u128 = 0;
    for (position, &from) in source.iter().enumerate() {
        if is_centre(position) {
            continue;
        }
        let colour = layout[from as usize];
        let digit = relabel[colour as usize];
        if digit == UNMAPPED {
            return Err(CanonError::UnmappedColour { colour, position });
        }
        id = id * 6 + digit as u128;
    }
    Ok(CubeId(id))
}

/// Encode a raw layout without assuming it passed `CubeState` validation.
pub fn encode_layout(layout: &[u8; FACELETS]) -> Result<Canonical, CanonError> {
    let mut best = CubeId(u128::MAX);
    let mut best_rotation = 0;
    for r in 0..ROTATION_TAGS.len() {
        let id = rotated_id(layout, rotation_source(r))?;
        if id < best {
            best = id;
            best_rotation = r;
        }
    }
    Ok(Canonical {
        id: best,
        undo: UNDO_TAGS[best_rotation],
    })
}

/// Canonical identity of `state` and the rotation tag that undoes it.
pub fn encode(state: &CubeState) -> Result<Canonical, CanonError> {
    encode_layout(state.facelets())
}

/// Rotation tags whose rotated views of `state` give pairwise different ids.
///
/// A solved cube yields one tag; a cube with no rotational symmetry yields 24.
pub fn distinct_rotations(state: &CubeState) -> Result<Vec<&'static str>, CanonError> {
    let mut seen: Vec<CubeId> = Vec::with_capacity(ROTATION_TAGS.len());
    let mut tags = Vec::new();
    for (r, &tag) in ROTATION_TAGS.iter().enumerate() {
        let id = rotated_id(state.facelets(), rotation_source(r))?;
        if !seen.contains(&id) {
            seen.push(id);
            tags.push(tag);
        }
    }
    Ok(tags)
}

impl CubeState {
    /// True when the state matches the solved cube in any orientation.
    pub fn is_solved(&self) -> bool {
        matches!(encode(self), Ok(c) if c.id == SOLVED_ID)
    }
}
