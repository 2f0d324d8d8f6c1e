//! Move-string rewriting: inversion and whole-cube rotation folding.
//!
//! A rotation relabels faces: after `X` the face that was in front is on
//! top, so a later `U` turns what used to be `F`. These helpers carry that
//! relabeling through a string without touching any cube state.

const FACES: [char; 6] = ['F', 'L', 'U', 'B', 'R', 'D'];

type FaceMap = [char; 6];

const IDENTITY: FaceMap = FACES;
// Entry k is the face that face FACES[k] is read as after the rotation.
const X_MAP: FaceMap = ['U', 'L', 'B', 'D', 'R', 'F'];
const Y_MAP: FaceMap = ['L', 'B', 'U', 'R', 'F', 'D'];
const Z_MAP: FaceMap = ['F', 'U', 'R', 'B', 'D', 'L'];

#[inline]
fn face_index(face: char) -> Option<usize> {
    FACES.iter().position(|&f| f == face)
}

fn invert(map: &FaceMap) -> FaceMap {
    let mut out = IDENTITY;
    for (k, &to) in map.iter().enumerate() {
        if let Some(j) = face_index(to) {
            out[j] = FACES[k];
        }
    }
    out
}

fn rotation_map(label: char) -> Option<FaceMap> {
    match label {
        'X' => Some(X_MAP),
        'x' => Some(invert(&X_MAP)),
        'Y' => Some(Y_MAP),
        'y' => Some(invert(&Y_MAP)),
        'Z' => Some(Z_MAP),
        'z' => Some(invert(&Z_MAP)),
        _ => None,
    }
}

#[inline]
fn compose(current: &FaceMap, step: &FaceMap) -> FaceMap {
    let mut out = IDENTITY;
    for (k, &via) in step.iter().enumerate() {
        if let Some(j) = face_index(via) {
            out[k] = current[j];
        }
    }
    out
}

/// Relabel a single move through `map`, keeping its direction (case).
/// Labels that are not face turns pass through unchanged.
fn relabel(map: &FaceMap, label: char) -> char {
    match face_index(label.to_ascii_uppercase()) {
        Some(k) if label.is_ascii_uppercase() => map[k],
        Some(k) => map[k].to_ascii_lowercase(),
        None => label,
    }
}

/// Re-express `moves` as seen after the whole-cube rotations in `rotation`.
///
/// Characters of `rotation` that are not rotations are ignored.
pub fn rotate_transform(rotation: &str, moves: &str) -> String {
    let mut map = IDENTITY;
    for label in rotation.chars() {
        if let Some(step) = rotation_map(label) {
            map = compose(&map, &step);
        }
    }
    moves.chars().map(|c| relabel(&map, c)).collect()
}

/// The inverse move string: reversed order, every direction flipped.
pub fn reverse_transform(moves: &str) -> String {
    moves
        .chars()
        .rev()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

/// Fold whole-cube rotations into the face turns that follow them.
///
/// The result contains face turns only and has the same effect on a cube as
/// `moves`, up to the orientation of the whole cube.
pub fn remove_rotation_transforms(moves: &str) -> String {
    let mut map = IDENTITY;
    let mut out = String::with_capacity(moves.len());
    for label in moves.chars() {
        let flipped = if label.is_ascii_uppercase() {
            label.to_ascii_lowercase()
        } else {
            label.to_ascii_uppercase()
        };
        match rotation_map(flipped) {
            Some(step) => map = compose(&map, &step),
            None => out.push(relabel(&map, label)),
        }
    }
    out
}
