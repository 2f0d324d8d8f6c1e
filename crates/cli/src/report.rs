//! Per-depth sequence counts as a polars table.

use anyhow::{Context, Result};
use cubeindex::api::{MoveGraph, REACHABLE_STATES};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// One row per depth: sequences of that length, running total, and the
/// running total as a fraction of all reachable states (an upper bound on
/// index coverage, since sequences are not deduplicated by symmetry).
pub fn count_frame(graph: &MoveGraph, max_depth: usize) -> Result<DataFrame> {
    let sizes = graph.layer_sizes(max_depth);
    let mut running: u128 = 0;
    let mut depth = Vec::with_capacity(sizes.len());
    let mut sequences = Vec::with_capacity(sizes.len());
    let mut cumulative = Vec::with_capacity(sizes.len());
    let mut coverage = Vec::with_capacity(sizes.len());
    for (k, &n) in sizes.iter().enumerate() {
        running = running.saturating_add(n);
        depth.push(k as u32 + 1);
        sequences.push(u64::try_from(n).unwrap_or(u64::MAX));
        cumulative.push(u64::try_from(running).unwrap_or(u64::MAX));
        coverage.push(running as f64 / REACHABLE_STATES as f64);
    }
    let df = polars::df!(
        "depth" => depth,
        "sequences" => sequences,
        "cumulative" => cumulative,
        "coverage_bound" => coverage,
    )?;
    Ok(df)
}

/// Write as parquet for `.parquet` paths, CSV otherwise.
pub fn write_frame(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(file).finish(df)?;
        }
        _ => {
            CsvWriter::new(file).finish(df)?;
        }
    }
    Ok(())
}
