//! Offline index builder: breadth-first enumeration into the solution index.
//!
//! Pipeline
//! - The calling thread owns the generator and feeds numbered sequences into
//!   a bounded request channel, at most `batch_size` at a time and never
//!   across a depth boundary.
//! - Canonicalisation workers turn each sequence into `(CubeId, solution)`,
//!   where the solution is the reversed sequence re-expressed in the
//!   canonical frame.
//! - The collector keeps, per identity, the row of the lowest sequence number
//!   and hands the batch to the persistence worker, which commits rows and
//!   checkpoint in one transaction. The next batch is generated only after
//!   the commit is acknowledged.
//!
//! Invariants
//! - Generation is single-threaded and non-decreasing in depth, so with
//!   insert-or-ignore the first stored row for an identity is a shortest one.
//! - The solved identity is never stored.
//! - Every worker is joined before `build_index` returns, on success or error.

mod types;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{debug, info, warn};

use crate::canon::{encode, CubeId, SOLVED_ID};
use crate::cube::notation::{reverse_transform, rotate_transform};
use crate::cube::CubeState;
use crate::movegraph::{Generator, MoveGraph};
use crate::store::{Checkpoint, EncodedSolution, IndexStore, StoreError};

pub use types::{BuildError, BuildReport, BuilderCfg, DiskGuard, RecordError, StopReason};

type Request = (u64, String);
type Record = (u64, Option<(CubeId, EncodedSolution)>);
type SaveJob = (HashMap<CubeId, EncodedSolution>, Checkpoint);

/// Index row for the state reached from solved by `moves`.
///
/// The stored solution undoes `moves` and is expressed in the canonical
/// frame, so a lookup re-expresses it with the caller's undo tag.
pub fn index_record(moves: &str) -> Result<(CubeId, EncodedSolution), RecordError> {
    let state = CubeState::solved().after(moves)?;
    let canonical = encode(&state)?;
    let solution = rotate_transform(
        &reverse_transform(canonical.undo),
        &reverse_transform(moves),
    );
    Ok((canonical.id, EncodedSolution::pack(&solution)?))
}

/// Run the builder until `cfg.max_depth` is exhausted or `stop` is raised.
///
/// Resumes from the store's checkpoint. `stop` is polled after every
/// committed batch.
pub fn build_index<S: IndexStore>(
    store: &mut S,
    graph: &MoveGraph,
    cfg: &BuilderCfg,
    stop: &AtomicBool,
) -> Result<BuildReport, BuildError> {
    cfg.validate()?;
    let checkpoint = store.checkpoint()?;
    let mut generator = Generator::resume(graph, &checkpoint.cursor, checkpoint.emitted)?;
    info!(
        emitted = checkpoint.emitted,
        cursor = %checkpoint.cursor,
        depth = generator.depth(),
        max_depth = cfg.max_depth,
        workers = cfg.workers,
        "builder starting"
    );

    let (request_tx, request_rx) = sync_channel::<Request>(cfg.batch_size);
    let request_rx = Arc::new(Mutex::new(request_rx));
    let (record_tx, record_rx) = sync_channel::<Record>(cfg.batch_size);
    let (save_tx, save_rx) = sync_channel::<SaveJob>(1);
    let (ack_tx, ack_rx) = sync_channel::<Result<usize, StoreError>>(1);

    let report = thread::scope(|s| {
        for _ in 0..cfg.workers {
            let rx = Arc::clone(&request_rx);
            let tx = record_tx.clone();
            s.spawn(move || canonicalise_worker(&rx, &tx));
        }
        drop(record_tx);
        s.spawn(move || persistence_worker(store, save_rx, ack_tx));

        let channels = Channels {
            requests: request_tx,
            records: record_rx,
            saves: save_tx,
            acks: ack_rx,
        };
        // Dropping `channels` closes every queue, which ends the workers.
        drive(&mut generator, channels, cfg, stop)
    })?;

    info!(
        reason = ?report.reason,
        emitted = report.emitted,
        inserted = report.inserted,
        skipped = report.skipped,
        "builder finished"
    );
    Ok(report)
}

struct Channels {
    requests: SyncSender<Request>,
    records: Receiver<Record>,
    saves: SyncSender<SaveJob>,
    acks: Receiver<Result<usize, StoreError>>,
}

fn drive(
    generator: &mut Generator<'_>,
    channels: Channels,
    cfg: &BuilderCfg,
    stop: &AtomicBool,
) -> Result<BuildReport, BuildError> {
    let mut report = BuildReport {
        reason: StopReason::MaxDepth,
        emitted: generator.emitted(),
        inserted: 0,
        batches: 0,
        skipped: 0,
        next_depth: generator.depth(),
    };

    loop {
        let depth = generator.depth();
        report.next_depth = depth;
        if depth > cfg.max_depth {
            report.reason = StopReason::MaxDepth;
            break;
        }
        if stop.load(Ordering::Relaxed) {
            report.reason = StopReason::Stopped;
            break;
        }
        check_disk(cfg)?;

        let mut sent = 0;
        while sent < cfg.batch_size && generator.depth() == depth {
            let number = generator.emitted();
            let moves = generator.next_sequence();
            channels
                .requests
                .send((number, moves))
                .map_err(|_| BuildError::WorkerLost)?;
            sent += 1;
        }

        let mut batch: HashMap<CubeId, (u64, EncodedSolution)> = HashMap::with_capacity(sent);
        for _ in 0..sent {
            let (number, record) = channels
                .records
                .recv()
                .map_err(|_| BuildError::WorkerLost)?;
            let Some((id, solution)) = record else {
                report.skipped += 1;
                continue;
            };
            if id == SOLVED_ID {
                continue;
            }
            batch
                .entry(id)
                .and_modify(|kept| {
                    if number < kept.0 {
                        *kept = (number, solution);
                    }
                })
                .or_insert((number, solution));
        }

        let rows: HashMap<CubeId, EncodedSolution> =
            batch.into_iter().map(|(id, (_, s))| (id, s)).collect();
        let checkpoint = Checkpoint {
            emitted: generator.emitted(),
            cursor: generator.cursor(),
        };
        channels
            .saves
            .send((rows, checkpoint))
            .map_err(|_| BuildError::WorkerLost)?;
        let acked = channels.acks.recv();
        let inserted = acked.map_err(|_| BuildError::WorkerLost)??;

        report.inserted += inserted as u64;
        report.batches += 1;
        report.emitted = generator.emitted();
        debug!(
            depth,
            sent,
            inserted,
            progress = generator.layer_progress(),
            "batch committed"
        );
        if generator.depth() != depth {
            info!(depth, emitted = report.emitted, "layer complete");
        }
    }
    Ok(report)
}

fn check_disk(cfg: &BuilderCfg) -> Result<(), BuildError> {
    let Some(guard) = &cfg.disk_guard else {
        return Ok(());
    };
    let available = fs2::available_space(&guard.path).map_err(|e| BuildError::DiskQuery {
        path: guard.path.clone(),
        reason: e.to_string(),
    })?;
    if available < guard.min_free_bytes {
        warn!(
            available,
            required = guard.min_free_bytes,
            "free space below margin"
        );
        return Err(BuildError::LowDiskSpace {
            path: guard.path.clone(),
            available,
            required: guard.min_free_bytes,
        });
    }
    Ok(())
}

fn canonicalise_worker(requests: &Mutex<Receiver<Request>>, records: &SyncSender<Record>) {
    loop {
        let next = match requests.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => return,
        };
        let Ok((number, moves)) = next else {
            return;
        };
        let record = match index_record(&moves) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(moves = %moves, error = %e, "sequence skipped");
                None
            }
        };
        if records.send((number, record)).is_err() {
            return;
        }
    }
}

fn persistence_worker<S: IndexStore>(
    store: &mut S,
    jobs: Receiver<SaveJob>,
    acks: SyncSender<Result<usize, StoreError>>,
) {
    for (rows, checkpoint) in jobs {
        if acks.send(store.save(&rows, &checkpoint)).is_err() {
            return;
        }
    }
}
