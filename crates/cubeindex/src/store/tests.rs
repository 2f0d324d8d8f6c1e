use super::*;
use crate::canon::{CubeId, SOLVED_ID};
use crate::movegraph::Cursor;
use proptest::prelude::*;

fn batch(rows: &[(u128, &str)]) -> HashMap<CubeId, EncodedSolution> {
    let mut out = HashMap::new();
    for &(id, moves) in rows {
        out.insert(CubeId(id), EncodedSolution::pack(moves).unwrap());
    }
    out
}

fn stored<L: SolutionLookup>(reader: &mut L, id: u128) -> Option<String> {
    reader
        .lookup_solution(CubeId(id))
        .unwrap()
        .map(EncodedSolution::unpack)
}

#[test]
fn pack_puts_first_move_in_lowest_nibble() {
    assert_eq!(EncodedSolution::pack("F").unwrap().0, 0x1);
    assert_eq!(EncodedSolution::pack("Fd").unwrap().0, 0xC1);
    assert_eq!(EncodedSolution::pack("dF").unwrap().0, 0x1C);
    assert_eq!(EncodedSolution::pack("").unwrap(), EncodedSolution(0));
}

#[test]
fn pack_rejects_rotations_and_long_strings() {
    assert!(matches!(
        EncodedSolution::pack("FX"),
        Err(StoreError::NotAFaceMove { label: 'X' })
    ));
    let seventeen = "F".repeat(17);
    assert!(matches!(
        EncodedSolution::pack(&seventeen),
        Err(StoreError::SolutionTooLong { len: 17 })
    ));
    let sixteen = "d".repeat(16);
    let packed = EncodedSolution::pack(&sixteen).unwrap();
    assert_eq!(packed.len(), 16);
    assert_eq!(packed.unpack(), sixteen);
}

#[test]
fn len_and_empty_follow_the_terminator() {
    let s = EncodedSolution::pack("RuB").unwrap();
    assert_eq!(s.len(), 3);
    assert!(!s.is_empty());
    assert!(EncodedSolution::default().is_empty());
}

proptest! {
    #[test]
    fn unpack_inverts_pack(codes in prop::collection::vec(0usize..12, 0..=16)) {
        let moves: String = codes.iter().map(|&c| FACE_MOVES[c]).collect();
        let packed = EncodedSolution::pack(&moves).unwrap();
        prop_assert_eq!(packed.unpack(), moves);
        prop_assert_eq!(packed.len(), codes.len());
    }
}

#[test]
fn memory_index_keeps_first_solution() {
    let mut index = MemoryIndex::new();
    let cp = Checkpoint {
        emitted: 3,
        cursor: Cursor(vec![2]),
    };
    let first = batch(&[(7, "F"), (9, "LL")]);
    assert_eq!(index.save(&first, &cp).unwrap(), 2);
    let cp2 = Checkpoint {
        emitted: 5,
        cursor: Cursor(vec![0, 1]),
    };
    let second = batch(&[(7, "RRR"), (11, "u")]);
    assert_eq!(index.save(&second, &cp2).unwrap(), 1);

    assert_eq!(index.len().unwrap(), 3);
    assert!(!index.is_empty().unwrap());
    assert_eq!(stored(&mut index, 7).as_deref(), Some("F"));
    assert_eq!(stored(&mut index, 8), None);
    assert_eq!(index.checkpoint().unwrap(), cp2);
}

#[test]
fn memory_readers_see_writer_rows() {
    let mut index = MemoryIndex::new();
    let mut reader = index.open_reader().unwrap();
    assert_eq!(stored(&mut reader, 1), None);
    index.save(&batch(&[(1, "b")]), &Checkpoint::default()).unwrap();
    assert_eq!(stored(&mut reader, 1).as_deref(), Some("b"));
}

#[test]
fn poisoned_memory_index_reports_errors() {
    let mut index = MemoryIndex::new();
    index.poison();
    assert!(matches!(index.len(), Err(StoreError::Poisoned)));
    assert!(matches!(index.is_empty(), Err(StoreError::Poisoned)));
    assert!(matches!(index.rows(), Err(StoreError::Poisoned)));
    let found = index.lookup_solution(CubeId(1));
    assert!(matches!(found, Err(StoreError::Poisoned)));
}

#[test]
fn fresh_stores_start_at_the_root() {
    let mut memory = MemoryIndex::new();
    assert_eq!(memory.checkpoint().unwrap(), Checkpoint::default());
    assert!(memory.is_empty().unwrap());
    let dir = tempfile::tempdir().unwrap();
    let mut index = SqliteIndex::open(dir.path().join("fresh.db")).unwrap();
    let cp = index.checkpoint().unwrap();
    assert_eq!(cp.emitted, 0);
    assert_eq!(cp.cursor, Cursor::start());
    assert!(index.is_empty().unwrap());
}

#[test]
fn sqlite_round_trips_full_width_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.db");
    // Both halves above i64::MAX exercise the signed-column casts.
    let wide = CubeId::from_halves(u64::MAX - 1, 1 << 63);
    let mut rows = batch(&[(SOLVED_ID.0 ^ 1, "FRU")]);
    rows.insert(wide, EncodedSolution::pack(&"d".repeat(16)).unwrap());
    let cp = Checkpoint {
        emitted: 42,
        cursor: Cursor(vec![3, 1, 4]),
    };

    {
        let mut index = SqliteIndex::open(&path).unwrap();
        assert_eq!(index.save(&rows, &cp).unwrap(), 2);
        // Re-saving is a no-op for rows, but the checkpoint moves.
        let cp2 = Checkpoint {
            emitted: 43,
            cursor: Cursor(vec![3, 1, 5]),
        };
        assert_eq!(index.save(&rows, &cp2).unwrap(), 0);
        index.close().unwrap();
    }

    let mut index = SqliteIndex::open(&path).unwrap();
    assert_eq!(index.len().unwrap(), 2);
    let resumed = index.checkpoint().unwrap();
    assert_eq!(resumed.emitted, 43);
    assert_eq!(resumed.cursor, Cursor(vec![3, 1, 5]));
    assert_eq!(stored(&mut index, wide.0), Some("d".repeat(16)));

    let mut reader = index.open_reader().unwrap();
    assert_eq!(stored(&mut reader, SOLVED_ID.0 ^ 1).as_deref(), Some("FRU"));
    assert_eq!(stored(&mut reader, 5), None);
}

#[test]
fn sqlite_keeps_first_solution() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = SqliteIndex::open(dir.path().join("dups.db")).unwrap();
    index.save(&batch(&[(1, "F")]), &Checkpoint::default()).unwrap();
    index.save(&batch(&[(1, "LLL")]), &Checkpoint::default()).unwrap();
    assert_eq!(stored(&mut index, 1).as_deref(), Some("F"));
}

#[test]
fn readers_cannot_write() {
    let dir = tempfile::tempdir().unwrap();
    let index = SqliteIndex::open(dir.path().join("ro.db")).unwrap();
    let reader = index.open_reader().unwrap();
    let sql = "INSERT INTO cubes (cube_id_l, cube_id_h, solution) VALUES (1, 1, 1)";
    assert!(reader.conn.execute(sql, []).is_err());
}
