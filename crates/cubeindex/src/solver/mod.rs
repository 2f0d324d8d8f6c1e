//! Online solver: direct index lookup, then a bounded parallel search.
//!
//! Search
//! - A state with fewer than 24 distinct rotations is searched from every
//!   distinct rotation over the unpruned graph; otherwise only from the
//!   identity rotation over the pruned graph.
//! - Candidates (`base rotation + generated suffix`) go through a bounded
//!   channel to lookup workers that each own a reader. The first hit raises
//!   the cancel flag; workers then discard queued candidates until the
//!   channel closes, and every worker is joined before `solve` returns.
//! - The answer is `candidate + stored solution` with whole-cube rotations
//!   folded into face letters.

mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{debug, info};

use crate::canon::{distinct_rotations, encode, ROTATION_TAGS, SOLVED_ID};
use crate::cube::notation::{remove_rotation_transforms, rotate_transform};
use crate::cube::CubeState;
use crate::movegraph::{Generator, MoveGraph};
use crate::store::{ReaderFactory, SolutionLookup};

pub use types::{SolveError, SolverCfg};

/// Moves that solve `state` according to the index, without searching.
///
/// The solved state is a hit with the empty solution.
pub fn lookup_state<L: SolutionLookup + ?Sized>(
    reader: &mut L,
    state: &CubeState,
) -> Result<Option<String>, SolveError> {
    let canonical = encode(state)?;
    if canonical.id == SOLVED_ID {
        return Ok(Some(String::new()));
    }
    let Some(stored) = reader.lookup_solution(canonical.id)? else {
        return Ok(None);
    };
    Ok(Some(rotate_transform(canonical.undo, &stored.unpack())))
}

/// Face-turn sequence solving `state`, or `None` when neither the index nor
/// a search up to `cfg.max_depth` finds one.
pub fn solve<F: ReaderFactory>(
    factory: &F,
    pruned: &MoveGraph,
    unpruned: &MoveGraph,
    state: &CubeState,
    cfg: &SolverCfg,
) -> Result<Option<String>, SolveError> {
    cfg.validate()?;
    let mut reader = factory.open_reader()?;
    if let Some(direct) = lookup_state(&mut reader, state)? {
        debug!(moves = %direct, "direct index hit");
        return Ok(Some(direct));
    }

    match search(factory, reader, pruned, unpruned, state, cfg)? {
        Some(hit) => {
            let answer = remove_rotation_transforms(&hit.moves());
            info!(moves = %answer, base = hit.candidate.base, "search hit");
            Ok(Some(answer))
        }
        None => {
            info!(max_depth = cfg.max_depth, "search exhausted");
            Ok(None)
        }
    }
}

/// One search candidate: a base rotation followed by a generated suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Candidate {
    base: &'static str,
    suffix: String,
}

impl Candidate {
    fn moves(&self) -> String {
        format!("{}{}", self.base, self.suffix)
    }
}

/// A candidate that reached an indexed state, before rotations are folded.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Hit {
    candidate: Candidate,
    /// Stored solution of the state the candidate reached.
    rest: String,
}

impl Hit {
    fn moves(&self) -> String {
        self.candidate.moves() + &self.rest
    }
}

/// Bounded parallel search past an index miss; `first` is the reader that
/// served the direct lookup.
fn search<F: ReaderFactory>(
    factory: &F,
    first: F::Reader,
    pruned: &MoveGraph,
    unpruned: &MoveGraph,
    state: &CubeState,
    cfg: &SolverCfg,
) -> Result<Option<Hit>, SolveError> {
    let rotations = distinct_rotations(state)?;
    let (bases, graph) = if rotations.len() < ROTATION_TAGS.len() {
        (rotations, unpruned)
    } else {
        (vec![""], pruned)
    };
    info!(
        bases = bases.len(),
        max_depth = cfg.max_depth,
        workers = cfg.workers,
        "index miss, searching"
    );

    let mut readers = vec![first];
    while readers.len() < cfg.workers {
        readers.push(factory.open_reader()?);
    }

    let cancel = AtomicBool::new(false);
    let (candidate_tx, candidate_rx) = sync_channel::<Candidate>(cfg.queue_capacity);
    let candidate_rx = Arc::new(Mutex::new(candidate_rx));
    // Each worker reports at most once, so this never blocks.
    let (reply_tx, reply_rx) = sync_channel::<Result<Hit, SolveError>>(cfg.workers);

    let replies: Vec<Result<Hit, SolveError>> = thread::scope(|s| {
        for reader in readers {
            let rx = Arc::clone(&candidate_rx);
            let tx = reply_tx.clone();
            let cancel = &cancel;
            s.spawn(move || lookup_worker(reader, state, &rx, &tx, cancel));
        }
        drop(reply_tx);
        feed(graph, &bases, cfg.max_depth, candidate_tx, &cancel);
        reply_rx.iter().collect()
    });

    let mut failure = None;
    for reply in replies {
        match reply {
            Ok(hit) => return Ok(Some(hit)),
            Err(e) => failure = Some(e),
        }
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(None),
    }
}

/// Queue every `base + suffix` up to `max_depth` until a worker reports.
/// Returning drops the sender, which lets idle workers exit.
fn feed(
    graph: &MoveGraph,
    bases: &[&'static str],
    max_depth: usize,
    candidates: SyncSender<Candidate>,
    cancel: &AtomicBool,
) {
    let mut generator = Generator::new(graph);
    let mut depth = 0;
    while generator.depth() <= max_depth {
        if generator.depth() != depth {
            depth = generator.depth();
            debug!(depth, "search depth");
        }
        let suffix = generator.next_sequence();
        for &base in bases {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let candidate = Candidate {
                base,
                suffix: suffix.clone(),
            };
            if candidates.send(candidate).is_err() {
                return;
            }
        }
    }
}

fn lookup_worker<R: SolutionLookup>(
    mut reader: R,
    state: &CubeState,
    candidates: &Mutex<Receiver<Candidate>>,
    replies: &SyncSender<Result<Hit, SolveError>>,
    cancel: &AtomicBool,
) {
    loop {
        let next = match candidates.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => return,
        };
        let Ok(candidate) = next else {
            return;
        };
        if cancel.load(Ordering::Relaxed) {
            continue;
        }
        let outcome = state
            .after(&candidate.moves())
            .map_err(SolveError::from)
            .and_then(|moved| lookup_state(&mut reader, &moved));
        let reply = match outcome {
            Ok(None) => continue,
            Ok(Some(rest)) => Ok(Hit { candidate, rest }),
            Err(e) => Err(e),
        };
        cancel.store(true, Ordering::Relaxed);
        let _ = replies.send(reply);
    }
}
