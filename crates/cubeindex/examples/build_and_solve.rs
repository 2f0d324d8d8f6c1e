//! Build a shallow in-memory index and solve a few random scrambles.
//!
//! Run: `cargo run -p cubeindex --example build_and_solve --release`

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use cubeindex::api::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pruned = MoveGraph::pruned();
    let unpruned = MoveGraph::unpruned();
    let mut index = MemoryIndex::new();

    let t0 = Instant::now();
    let cfg = BuilderCfg {
        max_depth: 4,
        ..BuilderCfg::default()
    };
    let report = build_index(&mut index, &pruned, &cfg, &AtomicBool::new(false))?;
    println!(
        "indexed {} sequences into {} rows in {:.2?}",
        report.emitted,
        index.len()?,
        t0.elapsed()
    );

    let mut rng = StdRng::seed_from_u64(7);
    let solver = SolverCfg {
        max_depth: 3,
        ..SolverCfg::default()
    };
    let depth = solver.max_depth;
    for _ in 0..5 {
        let scramble = random_scramble(&mut rng, 7);
        let state = CubeState::solved().after(&scramble)?;
        let t = Instant::now();
        match solve(&index, &pruned, &unpruned, &state, &solver)? {
            Some(moves) => println!("{scramble:>8} -> {moves:<8} ({:.2?})", t.elapsed()),
            None => println!("{scramble:>8} -> no solution within depth {depth}"),
        }
    }
    Ok(())
}
