//! The 24 proper orientations of the whole cube.
//!
//! Each orientation is a short word over the rotation generators. Its
//! position table is derived once by applying that word to an indexed
//! layout, so `source[k]` names the facelet that lands on position `k`.

use std::sync::LazyLock;

use crate::cube::{transform_for, FACELETS};

pub const ROTATION_TAGS: [&str; 24] = [
    "", "Z", "ZZ", "ZZZ", "Y", "YZ", "YZZ", "YZZZ", "YY", "YYZ", "YYZZ", "YYZZZ", "YYY", "YYYZ",
    "YYYZZ", "YYYZZZ", "X", "XZ", "XZZ", "XZZZ", "XXX", "XXXZ", "XXXZZ", "XXXZZZ",
];

/// Lower-cased `ROTATION_TAGS`, as handed back by the encoder.
pub const UNDO_TAGS: [&str; 24] = [
    "", "z", "zz", "zzz", "y", "yz", "yzz", "yzzz", "yy", "yyz", "yyzz", "yyzzz", "yyy", "yyyz",
    "yyyzz", "yyyzzz", "x", "xz", "xzz", "xzzz", "xxx", "xxxz", "xxxzz", "xxxzzz",
];

static SOURCES: LazyLock<[[u8; FACELETS]; 24]> = LazyLock::new(|| {
    let mut indexed = [0u8; FACELETS];
    for (i, v) in indexed.iter_mut().enumerate() {
        *v = i as u8;
    }
    let mut out = [indexed; 24];
    for (table, tag) in out.iter_mut().zip(ROTATION_TAGS) {
        for label in tag.chars() {
            if let Some(map) = transform_for(label) {
                *table = map.permute(table);
            }
        }
    }
    out
});

#[inline]
pub fn rotation_source(rotation: usize) -> &'static [u8; FACELETS] {
    &SOURCES[rotation]
}
