use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cubeindex::api::*;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod report;
mod transport;

use transport::{CubeLayout, CubeSolution};

#[derive(Parser)]
#[command(name = "cubeindex")]
#[command(about = "Build and query the minimal-move cube solution index")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

/// Where the input cube comes from; at most one source is used.
#[derive(Args)]
struct CubeInput {
    /// `solved` or 54 comma-separated colour codes
    #[arg(long, conflicts_with = "request")]
    layout: Option<String>,
    /// JSON `{"cube_layout": [...], "transformation": "..."}` file, or `-` for stdin
    #[arg(long)]
    request: Option<String>,
}

#[derive(Subcommand)]
enum Action {
    /// Apply moves to a cube and print the resulting layout as JSON
    Apply {
        #[command(flatten)]
        cube: CubeInput,
        /// Move string applied after the request's own transformation
        #[arg(long, default_value = "")]
        moves: String,
    },
    /// Solve a cube against an index; prints `{"success", "transform"}`
    Solve {
        #[arg(long)]
        db: PathBuf,
        #[command(flatten)]
        cube: CubeInput,
        /// Moves applied to the input cube before solving
        #[arg(long, default_value = "")]
        scramble: String,
        /// Append a random face-turn scramble of this length
        #[arg(long)]
        scramble_len: Option<usize>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = SolverCfg::default().workers)]
        workers: usize,
        #[arg(long, default_value_t = SolverCfg::default().max_depth)]
        max_depth: usize,
        /// Optional move-graph CSV used when searching from one rotation
        #[arg(long)]
        graph: Option<PathBuf>,
    },
    /// Build or extend an index; type a line on stdin to stop gracefully
    Build {
        #[arg(long)]
        db: PathBuf,
        /// Move-graph CSV (defaults to the built-in pruned graph)
        #[arg(long)]
        graph: Option<PathBuf>,
        #[arg(long, default_value_t = BuilderCfg::default().max_depth)]
        max_depth: usize,
        #[arg(long, default_value_t = BuilderCfg::default().batch_size)]
        batch_size: usize,
        #[arg(long, default_value_t = BuilderCfg::default().workers)]
        workers: usize,
        /// Abort when free space next to the database drops below this many MiB
        #[arg(long, default_value_t = 1024)]
        min_free_mb: u64,
    },
    /// Write a built-in move graph as a CSV matrix
    Graph {
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        unpruned: bool,
    },
    /// Per-depth sequence counts (CSV or parquet) with a provenance sidecar
    Count {
        #[arg(long)]
        graph: Option<PathBuf>,
        #[arg(long, default_value_t = 12)]
        max_depth: usize,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Apply { cube, moves } => apply(cube, &moves),
        Action::Solve {
            db,
            cube,
            scramble,
            scramble_len,
            seed,
            workers,
            max_depth,
            graph,
        } => {
            let cfg = SolverCfg {
                workers,
                max_depth,
                ..SolverCfg::default()
            };
            let mut state = read_cube(&cube)?.after(&scramble)?;
            if let Some(len) = scramble_len {
                let extra = random_scramble(&mut StdRng::seed_from_u64(seed), len);
                tracing::info!(scramble = %extra, "random scramble");
                state = state.after(&extra)?;
            }
            solve_cmd(&db, graph.as_deref(), &state, &cfg)
        }
        Action::Build {
            db,
            graph,
            max_depth,
            batch_size,
            workers,
            min_free_mb,
        } => {
            let guard_dir = db
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let cfg = BuilderCfg {
                max_depth,
                batch_size,
                workers,
                disk_guard: Some(DiskGuard {
                    path: guard_dir,
                    min_free_bytes: min_free_mb.saturating_mul(1024 * 1024),
                }),
            };
            build(&db, graph.as_deref(), &cfg)
        }
        Action::Graph { out, unpruned } => {
            let graph = if unpruned {
                MoveGraph::unpruned()
            } else {
                MoveGraph::pruned()
            };
            std::fs::write(&out, graph.to_csv())
                .with_context(|| format!("writing {}", out.display()))?;
            tracing::info!(nodes = graph.len(), out = %out.display(), "graph written");
            Ok(())
        }
        Action::Count {
            graph,
            max_depth,
            out,
        } => count(graph.as_deref(), max_depth, &out),
    }
}

fn read_cube(input: &CubeInput) -> Result<CubeState> {
    match (&input.layout, &input.request) {
        (Some(layout), _) => transport::parse_layout(layout),
        (None, Some(path)) => transport::read_request(path)?.state(),
        (None, None) => Ok(CubeState::solved()),
    }
}

fn load_graph(path: Option<&Path>) -> Result<(MoveGraph, String)> {
    match path {
        Some(p) => {
            let graph =
                MoveGraph::load(p).with_context(|| format!("loading graph {}", p.display()))?;
            Ok((graph, p.display().to_string()))
        }
        None => Ok((MoveGraph::pruned(), "builtin:pruned".to_string())),
    }
}

fn apply(input: CubeInput, moves: &str) -> Result<()> {
    let state = read_cube(&input)?.after(moves)?;
    println!("{}", serde_json::to_string(&CubeLayout::from(&state))?);
    Ok(())
}

fn solve_cmd(db: &Path, graph: Option<&Path>, state: &CubeState, cfg: &SolverCfg) -> Result<()> {
    if !db.exists() {
        bail!("index {} does not exist; run `build` first", db.display());
    }
    let index = SqliteIndex::open(db).with_context(|| format!("opening {}", db.display()))?;
    let (pruned, _) = load_graph(graph)?;
    let found = solve(&index, &pruned, &MoveGraph::unpruned(), state, cfg)?;
    println!("{}", serde_json::to_string(&CubeSolution::from(found))?);
    Ok(())
}

fn build(db: &Path, graph: Option<&Path>, cfg: &BuilderCfg) -> Result<()> {
    let (graph, source) = load_graph(graph)?;
    let mut index = SqliteIndex::open(db).with_context(|| format!("opening {}", db.display()))?;
    tracing::info!(db = %db.display(), graph = %source, rows = index.len()?, "index opened");

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        // Never joined: the process exits while this thread waits on stdin.
        std::thread::spawn(move || {
            let mut line = String::new();
            if let Ok(n) = std::io::stdin().lock().read_line(&mut line) {
                if n > 0 {
                    tracing::info!("stop requested");
                    stop.store(true, Ordering::Relaxed);
                }
            }
        });
    }

    let report = build_index(&mut index, &graph, cfg, &stop)?;
    let rows = index.len()?;
    index.close()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "reason": format!("{:?}", report.reason),
            "emitted": report.emitted,
            "inserted": report.inserted,
            "skipped": report.skipped,
            "next_depth": report.next_depth,
            "rows": rows,
        }))?
    );
    Ok(())
}

fn count(graph: Option<&Path>, max_depth: usize, out: &Path) -> Result<()> {
    let (graph, source) = load_graph(graph)?;
    let mut df = report::count_frame(&graph, max_depth)?;
    report::write_frame(&mut df, out)?;
    tracing::info!(rows = df.height(), out = %out.display(), "count report written");
    let payload = provenance::Payload::new(
        json!({
            "max_depth": max_depth,
            "reachable_states": REACHABLE_STATES.to_string(),
        }),
        source,
    );
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(sidecar = %sidecar.display(), "provenance written");
    Ok(())
}
