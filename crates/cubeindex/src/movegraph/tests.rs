use super::*;
use crate::cube::FACE_MOVES;
use std::collections::HashSet;

/// True when `moves` contains a pattern the pruned graph must never emit.
fn is_redundant(moves: &str) -> bool {
    let m: Vec<char> = moves.chars().collect();
    let opposite_first = |a: char, b: char| {
        matches!(
            (a.to_ascii_uppercase(), b.to_ascii_uppercase()),
            ('B', 'F') | ('R', 'L') | ('D', 'U')
        )
    };
    for w in m.windows(2) {
        let same_face = w[0].eq_ignore_ascii_case(&w[1]);
        if same_face && (w[0] != w[1] || w[0].is_ascii_lowercase()) {
            return true;
        }
        if opposite_first(w[0], w[1]) {
            return true;
        }
    }
    m.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn all_strings(len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    for _ in 0..len {
        let mut longer = Vec::with_capacity(out.len() * FACE_MOVES.len());
        for prefix in &out {
            longer.extend(FACE_MOVES.iter().map(|m| format!("{prefix}{m}")));
        }
        out = longer;
    }
    out
}

fn emitted_up_to(graph: &MoveGraph, max_len: usize) -> Vec<String> {
    Generator::new(graph)
        .take_while(|s| s.len() <= max_len)
        .collect()
}

#[test]
fn pruned_graph_emits_exactly_the_non_redundant_strings() {
    let g = MoveGraph::pruned();
    let emitted = emitted_up_to(&g, 4);
    let set: HashSet<&String> = emitted.iter().collect();
    assert_eq!(set.len(), emitted.len(), "duplicates emitted");

    let expected: HashSet<String> = (1..=4)
        .flat_map(all_strings)
        .filter(|s| !is_redundant(s))
        .collect();
    assert_eq!(emitted.len(), expected.len());
    for s in &emitted {
        assert!(expected.contains(s), "{s} should have been pruned");
    }
}

#[test]
fn generator_order_is_by_length_then_label() {
    let g = MoveGraph::pruned();
    let emitted = emitted_up_to(&g, 2);
    assert_eq!(&emitted[..3], &["B", "D", "F"]);
    assert_eq!(emitted[12], "BB");
    for w in emitted.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        assert!(a.len() < b.len() || a < b, "{a} then {b}");
    }
}

#[test]
fn never_emits_a_move_followed_by_its_inverse() {
    let g = MoveGraph::pruned();
    let mut gen = Generator::new(&g);
    for _ in 0..20_000 {
        let s = gen.next_sequence();
        let m: Vec<char> = s.chars().collect();
        for w in m.windows(2) {
            assert!(!(w[0] != w[1] && w[0].eq_ignore_ascii_case(&w[1])), "{s}");
        }
    }
}

#[test]
fn layer_sizes_match_enumeration() {
    let g = MoveGraph::pruned();
    assert_eq!(g.layer_sizes(4), vec![12, 114, 1068, 10011]);
    let full = MoveGraph::unpruned();
    assert_eq!(full.layer_sizes(3), vec![12, 144, 1728]);
    assert_eq!(emitted_up_to(&full, 2).len(), 12 + 144);
}

#[test]
fn resume_from_cursor_continues_identically() {
    let g = MoveGraph::pruned();
    let mut gen = Generator::new(&g);
    for _ in 0..777 {
        gen.next_sequence();
    }
    let encoded = gen.cursor().to_string();
    let emitted = gen.emitted();
    let cursor: Cursor = encoded.parse().unwrap();
    let mut resumed = Generator::resume(&g, &cursor, emitted).unwrap();
    assert_eq!(resumed.depth(), gen.depth());
    for _ in 0..2_000 {
        assert_eq!(resumed.next_sequence(), gen.next_sequence());
    }
    assert_eq!(resumed.emitted(), gen.emitted());
}

#[test]
fn depth_increments_after_layer_exhausted() {
    let g = MoveGraph::pruned();
    let mut gen = Generator::new(&g);
    assert_eq!(gen.depth(), 1);
    assert_eq!(gen.cursor(), Cursor::start());
    for _ in 0..12 {
        gen.next_sequence();
    }
    assert_eq!(gen.depth(), 2);
    assert_eq!(gen.cursor().to_string(), "0,0");
    assert_eq!(gen.layer_progress(), 0.0);
}

#[test]
fn layer_progress_grows_within_a_layer() {
    let g = MoveGraph::unpruned();
    let mut gen = Generator::new(&g);
    for _ in 0..12 + 72 {
        gen.next_sequence();
    }
    assert!((gen.layer_progress() - 0.5).abs() < 1e-12);
}

#[test]
fn bad_cursors_are_rejected() {
    let g = MoveGraph::pruned();
    assert!("".parse::<Cursor>().is_err());
    assert!("1,x".parse::<Cursor>().is_err());
    assert!(Generator::resume(&g, &Cursor(vec![]), 0).is_err());
    assert!(Generator::resume(&g, &Cursor(vec![12]), 0).is_err());
    // After B only 9 moves are legal.
    assert!(Generator::resume(&g, &Cursor(vec![0, 9]), 0).is_err());
    assert!(Generator::resume(&g, &Cursor(vec![0, 8]), 0).is_ok());
}

#[test]
fn csv_round_trip_preserves_graph() {
    let g = MoveGraph::pruned();
    let text = g.to_csv();
    let back = MoveGraph::from_csv_str(&text).unwrap();
    assert_eq!(back, g);
    assert_eq!(back.len(), 19);
}

#[test]
fn matrix_validation() {
    fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }
    assert_eq!(MoveGraph::from_matrix(&[]), Err(GraphError::Empty));
    assert!(matches!(
        MoveGraph::from_matrix(&cells(&[&["F", "_"], &["_"]])),
        Err(GraphError::NotSquare { row: 1, .. })
    ));
    assert!(matches!(
        MoveGraph::from_matrix(&cells(&[&["F", "F"], &["F", "_"]])),
        Err(GraphError::DuplicateLabel { node: 0, .. })
    ));
    assert_eq!(
        MoveGraph::from_matrix(&cells(&[&["_", "F"], &["_", "_"]])),
        Err(GraphError::DeadEnd { node: 1 })
    );
    // Unreachable dead ends are harmless.
    let rows = cells(&[&["F", "_"], &["_", "_"]]);
    let ok = MoveGraph::from_matrix(&rows).unwrap();
    let root = ok.node(MoveGraph::ROOT);
    assert_eq!(root.successor("F"), Some(MoveGraph::ROOT));
}

#[test]
fn labels_must_be_single_face_turns() {
    let csv = |cell: &str| format!("{cell},_\n_,_\n");
    for bad in ["Q", "X", "FF", "f2"] {
        assert_eq!(
            MoveGraph::from_csv_str(&csv(bad)),
            Err(GraphError::UnknownLabel {
                node: 0,
                label: bad.to_string(),
            }),
            "{bad}"
        );
    }
    for good in ["F", "f", "D", "d"] {
        assert!(MoveGraph::from_csv_str(&csv(good)).is_ok(), "{good}");
    }
}

#[test]
fn load_reports_missing_file() {
    assert!(matches!(
        MoveGraph::load("/definitely/not/here.csv"),
        Err(GraphError::Io { .. })
    ));
}
