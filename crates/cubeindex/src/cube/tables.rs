//! Facelet permutation tables for face turns and whole-cube rotations.
//!
//! Each generator is written as its 4-cycles: `[a, b, c, d]` sends the facelet
//! at `a` to `b`, `b` to `c`, `c` to `d` and `d` back to `a`. Positions not
//! named are fixed points. Inverses (lower-case labels) are derived once.

use std::sync::LazyLock;

use super::FACELETS;

const F_CYCLES: [[u8; 4]; 5] = [
    [6, 15, 47, 35],
    [7, 27, 46, 23],
    [8, 39, 45, 11],
    [12, 14, 38, 36],
    [13, 26, 37, 24],
];

const L_CYCLES: [[u8; 4]; 5] = [
    [0, 12, 45, 44],
    [3, 24, 48, 32],
    [6, 36, 51, 20],
    [9, 11, 35, 33],
    [10, 23, 34, 21],
];

const U_CYCLES: [[u8; 4]; 5] = [
    [0, 2, 8, 6],
    [1, 5, 7, 3],
    [9, 18, 15, 12],
    [10, 19, 16, 13],
    [11, 20, 17, 14],
];

const B_CYCLES: [[u8; 4]; 5] = [
    [0, 33, 53, 17],
    [1, 21, 52, 29],
    [2, 9, 51, 41],
    [18, 20, 44, 42],
    [19, 32, 43, 30],
];

const R_CYCLES: [[u8; 4]; 5] = [
    [2, 42, 47, 14],
    [5, 30, 50, 26],
    [8, 18, 53, 38],
    [15, 17, 41, 39],
    [16, 29, 40, 27],
];

const D_CYCLES: [[u8; 4]; 5] = [
    [33, 36, 39, 42],
    [34, 37, 40, 43],
    [35, 38, 41, 44],
    [45, 47, 53, 51],
    [46, 50, 52, 48],
];

const X_CYCLES: [[u8; 4]; 13] = [
    [0, 44, 45, 12],
    [1, 43, 46, 13],
    [2, 42, 47, 14],
    [3, 32, 48, 24],
    [4, 31, 49, 25],
    [5, 30, 50, 26],
    [6, 20, 51, 36],
    [7, 19, 52, 37],
    [8, 18, 53, 38],
    [9, 33, 35, 11],
    [10, 21, 34, 23],
    [15, 17, 41, 39],
    [16, 29, 40, 27],
];

const Y_CYCLES: [[u8; 4]; 13] = [
    [0, 2, 8, 6],
    [1, 5, 7, 3],
    [9, 18, 15, 12],
    [10, 19, 16, 13],
    [11, 20, 17, 14],
    [21, 30, 27, 24],
    [22, 31, 28, 25],
    [23, 32, 29, 26],
    [33, 42, 39, 36],
    [34, 43, 40, 37],
    [35, 44, 41, 38],
    [45, 51, 53, 47],
    [46, 48, 52, 50],
];

const Z_CYCLES: [[u8; 4]; 13] = [
    [0, 17, 53, 33],
    [1, 29, 52, 21],
    [2, 41, 51, 9],
    [3, 16, 50, 34],
    [4, 28, 49, 22],
    [5, 40, 48, 10],
    [6, 15, 47, 35],
    [7, 27, 46, 23],
    [8, 39, 45, 11],
    [12, 14, 38, 36],
    [13, 26, 37, 24],
    [18, 42, 44, 20],
    [19, 30, 43, 32],
];

/// Every label the state engine understands, in table order.
///
/// The first twelve are the face turns (upper case clockwise, lower case
/// counter-clockwise); the last six are whole-cube rotations.
pub const MOVE_LABELS: [char; 18] = [
    'F', 'f', 'L', 'l', 'U', 'u', 'B', 'b', 'R', 'r', 'D', 'd', 'X', 'x', 'Y', 'y', 'Z', 'z',
];

/// Permutation of the 54 facelet positions: `dest[i]` is where the facelet
/// currently at `i` ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformMap {
    dest: [u8; FACELETS],
}

impl TransformMap {
    pub fn identity() -> Self {
        let mut dest = [0u8; FACELETS];
        for (i, d) in dest.iter_mut().enumerate() {
            *d = i as u8;
        }
        Self { dest }
    }

    fn from_cycles(cycles: &[[u8; 4]]) -> Self {
        let mut map = Self::identity();
        for cycle in cycles {
            for k in 0..4 {
                map.dest[cycle[k] as usize] = cycle[(k + 1) % 4];
            }
        }
        map
    }

    pub fn inverse(&self) -> Self {
        let mut dest = [0u8; FACELETS];
        for (from, &to) in self.dest.iter().enumerate() {
            dest[to as usize] = from as u8;
        }
        Self { dest }
    }

    /// Move every entry of `src` to its destination in a fresh buffer.
    #[inline]
    pub fn permute<T: Copy + Default>(&self, src: &[T; FACELETS]) -> [T; FACELETS] {
        let mut out = [T::default(); FACELETS];
        for (i, &v) in src.iter().enumerate() {
            out[self.dest[i] as usize] = v;
        }
        out
    }
}

static TABLES: LazyLock<[TransformMap; 18]> = LazyLock::new(|| {
    let generators: [&[[u8; 4]]; 9] = [
        &F_CYCLES, &L_CYCLES, &U_CYCLES, &B_CYCLES, &R_CYCLES, &D_CYCLES, &X_CYCLES, &Y_CYCLES,
        &Z_CYCLES,
    ];
    let mut tables = [TransformMap::identity(); 18];
    for (k, cycles) in generators.iter().enumerate() {
        let fwd = TransformMap::from_cycles(cycles);
        tables[2 * k] = fwd;
        tables[2 * k + 1] = fwd.inverse();
    }
    tables
});

/// Look up the permutation for a single move label.
pub fn transform_for(label: char) -> Option<&'static TransformMap> {
    MOVE_LABELS
        .iter()
        .position(|&l| l == label)
        .map(|k| &TABLES[k])
}

pub fn is_face_move(label: char) -> bool {
    let face = label.to_ascii_uppercase();
    matches!(face, 'F' | 'L' | 'U' | 'B' | 'R' | 'D')
}

pub fn is_rotation(label: char) -> bool {
    let axis = label.to_ascii_uppercase();
    matches!(axis, 'X' | 'Y' | 'Z')
}
