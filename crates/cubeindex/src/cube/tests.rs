use super::notation::{remove_rotation_transforms, reverse_transform, rotate_transform};
use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// Every facelet carries its own index, so any misplaced sticker shows up.
fn indexed() -> [u8; FACELETS] {
    let mut out = [0u8; FACELETS];
    for (i, v) in out.iter_mut().enumerate() {
        *v = i as u8;
    }
    out
}

fn permute_indexed(moves: &str) -> [u8; FACELETS] {
    let mut layout = indexed();
    for label in moves.chars() {
        layout = transform_for(label).unwrap().permute(&layout);
    }
    layout
}

#[test]
fn solved_layout_matches_centres() {
    let c = CubeState::solved();
    for (colour, &pos) in FACE_CENTRES.iter().enumerate() {
        assert_eq!(c.facelets()[pos], colour as u8);
    }
    assert_eq!(CubeState::from_facelets(c.facelets()).unwrap(), c);
}

#[test]
fn move_then_inverse_is_identity() {
    let identities = [
        "Ff", "Ll", "Rr", "Bb", "Uu", "Dd", "Xx", "Yy", "Zz", //
        "fF", "lL", "rR", "bB", "uU", "dD", "xX", "yY", "zZ", //
        "FFFF", "LLLL", "RRRR", "BBBB", "UUUU", "DDDD", "XXXX", "YYYY", "ZZZZ", //
        "ffff", "llll", "rrrr", "bbbb", "uuuu", "dddd", "xxxx", "yyyy", "zzzz",
    ];
    for moves in identities {
        assert_eq!(permute_indexed(moves), indexed(), "{moves}");
    }
}

#[test]
fn rotations_commute_with_relabelled_turns() {
    let identities = [
        "XRXRXRXR", "xRxRxRxR", "YUYUYUYU", "yUyUyUyU", "ZFZFZFZF", "zFzFzFzF", "lxlxlxlx",
        "lXlXlXlX", "dydydydy", "dYdYdYdY", "bzbzbzbz", "bZbZbZbZ", "FXux", "yLYb", "ZDzr",
    ];
    for moves in identities {
        assert_eq!(permute_indexed(moves), indexed(), "{moves}");
    }
}

#[test]
fn face_turns_fix_centres() {
    let base = indexed();
    for label in FACE_MOVES {
        let after = transform_for(label).unwrap().permute(&base);
        for &c in FACE_CENTRES.iter() {
            assert_eq!(after[c], c as u8, "{label} moved centre {c}");
        }
    }
}

#[test]
fn string_apply_matches_single_turns() {
    let moves = "FzBudXRbLryUru";
    let mut whole = CubeState::solved();
    whole.apply(moves).unwrap();
    let mut stepwise = CubeState::solved();
    for label in moves.chars() {
        stepwise.turn(label).unwrap();
    }
    assert_eq!(whole, stepwise);
}

#[test]
fn unknown_labels_are_reported_and_skipped() {
    let mut c = CubeState::solved();
    let err = c.apply("FQ2f").unwrap_err();
    assert_eq!(
        err,
        CubeError::UnknownMoves {
            labels: "Q2".to_string()
        }
    );
    // F and f still applied, and they cancel.
    assert_eq!(c, CubeState::solved());

    let mut d = CubeState::solved();
    assert!(d.turn('?').is_err());
    assert_eq!(d, CubeState::solved());
}

#[test]
fn from_facelets_rejects_malformed_layouts() {
    let solved = *CubeState::solved().facelets();
    assert_eq!(
        CubeState::from_facelets(&solved[..53]),
        Err(CubeError::WrongSize { len: 53 })
    );

    let mut bad_colour = solved;
    bad_colour[0] = 9;
    assert!(matches!(
        CubeState::from_facelets(&bad_colour),
        Err(CubeError::ColourOutOfRange {
            index: 0,
            colour: 9,
        })
    ));

    let mut bad_count = solved;
    bad_count[0] = 1;
    assert!(matches!(
        CubeState::from_facelets(&bad_count),
        Err(CubeError::ColourCount { .. })
    ));

    // Swap two centres' neighbours so counts stay at nine but centres repeat.
    let mut dup = solved;
    dup[22] = 2;
    dup[12] = 1;
    assert_eq!(
        CubeState::from_facelets(&dup),
        Err(CubeError::DuplicateCentre { colour: 2 })
    );
}

#[test]
fn random_scramble_uses_face_turns_only() {
    let mut rng = StdRng::seed_from_u64(7);
    let s = random_scramble(&mut rng, 40);
    assert_eq!(s.len(), 40);
    assert!(s.chars().all(is_face_move));
}

#[test]
fn rotate_transform_relabels_faces() {
    let cases = [
        ("X", "FfLlRrBbUuDd", "UuLlRrDdBbFf"),
        ("x", "FfLlRrBbUuDd", "DdLlRrUuFfBb"),
        ("Y", "FfLlRrBbUuDd", "LlBbFfRrUuDd"),
        ("y", "FfLlRrBbUuDd", "RrFfBbLlUuDd"),
        ("Z", "FfLlRrBbUuDd", "FfUuDdBbRrLl"),
        ("z", "FfLlRrBbUuDd", "FfDdUuBbLlRr"),
    ];
    for (rotation, moves, expected) in cases {
        assert_eq!(rotate_transform(rotation, moves), expected, "{rotation}");
    }
    assert_eq!(rotate_transform("", "FuR"), "FuR");
}

#[test]
fn reverse_transform_inverts() {
    assert_eq!(reverse_transform("FuRb"), "BrUf");
    assert_eq!(reverse_transform(""), "");
}

#[test]
fn remove_rotation_transforms_fixed_table() {
    let cases = [
        ("XFXFXFXF", "DBUF"),
        ("xFxFxFxF", "UBDF"),
        ("XXFXXF", "BF"),
        ("YYFYYF", "BF"),
        ("ZZFZZF", "FF"),
    ];
    for (before, after) in cases {
        assert_eq!(remove_rotation_transforms(before), after, "{before}");
    }
}

proptest! {
    #[test]
    fn prop_reverse_restores_state(seed in any::<u64>(), len in 0usize..30) {
        let mut rng = StdRng::seed_from_u64(seed);
        let moves = random_scramble(&mut rng, len);
        let mut c = CubeState::solved();
        c.apply(&moves).unwrap();
        c.apply(&reverse_transform(&moves)).unwrap();
        prop_assert_eq!(c, CubeState::solved());
    }

    #[test]
    fn prop_inverse_label_undoes_turn(k in 0usize..18, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut c = CubeState::solved();
        c.apply(&random_scramble(&mut rng, 12)).unwrap();
        let before = c;
        let label = MOVE_LABELS[k];
        c.turn(label).unwrap();
        c.turn(reverse_transform(&label.to_string()).chars().next().unwrap()).unwrap();
        prop_assert_eq!(c, before);
    }
}
