//! State engine: 54-facelet cube states and the moves that permute them.
//!
//! Layout
//! - Facelets are numbered row by row on the unfolded net: `U` occupies
//!   0–8, the three middle bands run 9–20, 21–32 and 33–44 (each band reads
//!   `L`, `F`, `R`, `B` left to right), and `D` occupies 45–53.
//! - Face centres sit at 4, 22, 25, 28, 31 and 49; no face turn moves them.
//!
//! Moves
//! - Face turns `F L U B R D` (clockwise) and their lower-case inverses.
//! - Whole-cube rotations `X Y Z` and their lower-case inverses.
//! - A move string is applied left to right, one label at a time.

pub mod notation;
mod tables;

use rand::Rng;
use std::fmt;

pub use tables::{is_face_move, is_rotation, transform_for, TransformMap, MOVE_LABELS};

/// Number of facelets on the cube surface.
pub const FACELETS: usize = 54;

/// Positions of the six face centres, in colour order of the solved cube.
pub const FACE_CENTRES: [usize; 6] = [4, 22, 25, 28, 31, 49];

/// The twelve face turns, in the order used by the solution encoding.
pub const FACE_MOVES: [char; 12] = ['F', 'f', 'L', 'l', 'U', 'u', 'B', 'b', 'R', 'r', 'D', 'd'];

/// Malformed states or move strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    WrongSize { len: usize },
    ColourOutOfRange { index: usize, colour: u8 },
    ColourCount { colour: u8, count: usize },
    DuplicateCentre { colour: u8 },
    UnknownMoves { labels: String },
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongSize { len } => {
                write!(f, "cube layout has {len} facelets, expected {FACELETS}")
            }
            Self::ColourOutOfRange { index, colour } => {
                write!(f, "facelet {index} has colour {colour}, expected 0..=5")
            }
            Self::ColourCount { colour, count } => {
                write!(f, "colour {colour} appears {count} times, expected 9")
            }
            Self::DuplicateCentre { colour } => {
                write!(f, "colour {colour} sits on more than one face centre")
            }
            Self::UnknownMoves { labels } => write!(f, "unrecognised move labels: {labels:?}"),
        }
    }
}

impl std::error::Error for CubeError {}

/// A cube configuration: one colour code (0–5) per facelet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    facelets: [u8; FACELETS],
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl CubeState {
    /// Colour codes of the solved cube: U=0, L=1, F=2, R=3, B=4, D=5.
    pub const SOLVED_LAYOUT: [u8; FACELETS] = [
        0, 0, 0, 0, 0, 0, 0, 0, 0, //
        1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, //
        1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, //
        1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, //
        5, 5, 5, 5, 5, 5, 5, 5, 5,
    ];

    pub fn solved() -> Self {
        Self {
            facelets: Self::SOLVED_LAYOUT,
        }
    }

    /// Validate and wrap a raw layout (transport boundary input).
    pub fn from_facelets(layout: &[u8]) -> Result<Self, CubeError> {
        let facelets: [u8; FACELETS] = layout
            .try_into()
            .map_err(|_| CubeError::WrongSize { len: layout.len() })?;
        let mut counts = [0usize; 6];
        for (index, &colour) in facelets.iter().enumerate() {
            if colour > 5 {
                return Err(CubeError::ColourOutOfRange { index, colour });
            }
            counts[colour as usize] += 1;
        }
        if let Some((colour, &count)) = counts.iter().enumerate().find(|(_, &c)| c != 9) {
            return Err(CubeError::ColourCount {
                colour: colour as u8,
                count,
            });
        }
        let mut seen = [false; 6];
        for &c in FACE_CENTRES.iter() {
            let colour = facelets[c];
            if std::mem::replace(&mut seen[colour as usize], true) {
                return Err(CubeError::DuplicateCentre { colour });
            }
        }
        Ok(Self { facelets })
    }

    #[inline]
    pub fn facelets(&self) -> &[u8; FACELETS] {
        &self.facelets
    }

    /// Apply one move label. Unknown labels leave the state untouched.
    pub fn turn(&mut self, label: char) -> Result<(), CubeError> {
        let map = transform_for(label).ok_or_else(|| CubeError::UnknownMoves {
            labels: label.to_string(),
        })?;
        self.facelets = map.permute(&self.facelets);
        Ok(())
    }

    /// Apply a move string left to right.
    ///
    /// Every recognised label is applied even when others are not; the
    /// unrecognised ones are collected into the returned error.
    pub fn apply(&mut self, moves: &str) -> Result<(), CubeError> {
        let mut unknown = String::new();
        for label in moves.chars() {
            if self.turn(label).is_err() {
                unknown.push(label);
            }
        }
        if unknown.is_empty() {
            Ok(())
        } else {
            tracing::warn!(labels = %unknown, "skipped unrecognised move labels");
            Err(CubeError::UnknownMoves { labels: unknown })
        }
    }

    /// Copy of `self` with `moves` applied.
    pub fn after(&self, moves: &str) -> Result<Self, CubeError> {
        let mut next = *self;
        next.apply(moves)?;
        Ok(next)
    }
}

/// Draw a random face-turn string of length `len`.
pub fn random_scramble<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| FACE_MOVES[rng.gen_range(0..FACE_MOVES.len())])
        .collect()
}

#[cfg(test)]
mod tests;
