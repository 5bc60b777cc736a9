//! Two-worker bidirectional search with race-to-first-match completion.
//!
//! One worker scans the top half of the haystack downward, the other scans
//! the bottom half upward. The first worker to find a placement publishes it
//! on the completion channel. A worker that exhausts its half only bumps the
//! shared failure counter; whichever worker fails second publishes "no
//! match". The initiator receives exactly one message.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;

use crate::search::rows::{match_at_row, scan_rows, NeedleRows, ScanDirection};
use crate::search::Match;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::MonoMask;

/// How a single directional scan ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A placement was accepted.
    Found(Match),
    /// Every row in the scanner's range was rejected.
    Exhausted,
    /// The sibling worker already published a match.
    Cancelled,
}

/// Walks one half of the haystack and applies the two-row rule per row.
///
/// `cancelled` is polled between rows; pass `None` to always run to the end.
pub fn scan_direction(
    haystack: &MonoMask,
    needle: &NeedleRows,
    direction: ScanDirection,
    cancelled: Option<&AtomicBool>,
) -> ScanOutcome {
    let _span = trace_span!("row_scan", direction = direction.as_str()).entered();
    let mut visited = 0usize;
    for row in scan_rows(direction, haystack.height()) {
        if cancelled.is_some_and(|flag| flag.load(Ordering::Acquire)) {
            return ScanOutcome::Cancelled;
        }
        visited += 1;
        if let Some(offset) = match_at_row(haystack, needle, row) {
            let found = Match::centered(offset, row, needle);
            trace_event!(
                "match_found",
                direction = direction.as_str(),
                row = row,
                x = found.x,
                y = found.y
            );
            return ScanOutcome::Found(found);
        }
    }
    trace_event!(
        "scan_exhausted",
        direction = direction.as_str(),
        rows = visited
    );
    ScanOutcome::Exhausted
}

/// State shared by both workers of one search.
struct RaceState {
    failures: AtomicUsize,
    cancelled: AtomicBool,
    cancel_on_match: bool,
}

struct RowWorker {
    haystack: Arc<MonoMask>,
    needle: Arc<NeedleRows>,
    direction: ScanDirection,
    state: Arc<RaceState>,
    completion: Sender<Option<Match>>,
}

impl RowWorker {
    fn run(self) {
        let outcome = scan_direction(
            &self.haystack,
            &self.needle,
            self.direction,
            Some(&self.state.cancelled),
        );
        // Send errors mean the initiator already has its answer.
        match outcome {
            ScanOutcome::Found(found) => {
                if self.state.cancel_on_match {
                    self.state.cancelled.store(true, Ordering::Release);
                }
                let _ = self.completion.send(Some(found));
            }
            ScanOutcome::Exhausted => {
                if self.state.failures.fetch_add(1, Ordering::AcqRel) == 1 {
                    let _ = self.completion.send(None);
                }
            }
            ScanOutcome::Cancelled => {}
        }
    }
}

#[cfg(feature = "rayon")]
fn dispatch<F: FnOnce() + Send + 'static>(job: F) {
    // The initiator blocks in `recv`; if it is itself a pool thread, jobs
    // queued on that pool may never be picked up.
    if rayon::current_thread_index().is_some() {
        std::thread::spawn(job);
    } else {
        rayon::spawn(job);
    }
}

#[cfg(not(feature = "rayon"))]
fn dispatch<F: FnOnce() + Send + 'static>(job: F) {
    std::thread::spawn(job);
}

/// A prepared search of one haystack for one needle.
///
/// Both inputs are shared read-only with the workers; the haystack buffer is
/// released once the caller and both workers have dropped their handles.
pub struct BidirectionalRowSearch {
    haystack: Arc<MonoMask>,
    needle: Arc<NeedleRows>,
}

impl BidirectionalRowSearch {
    /// Prepares a search; returns `None` when the needle cannot fit.
    pub fn new(haystack: Arc<MonoMask>, needle: Arc<NeedleRows>) -> Option<Self> {
        if !needle.fits_in(&haystack) {
            trace_event!(
                "guard_rejected",
                reason = "needle does not fit haystack",
                needle_width = needle.width(),
                needle_height = needle.height(),
                hay_width = haystack.width(),
                hay_height = haystack.height()
            );
            return None;
        }
        Some(Self { haystack, needle })
    }

    /// Runs both workers in parallel and blocks for the single result.
    pub fn run(&self, cancel_on_match: bool) -> Option<Match> {
        let (completion, signal) = mpsc::channel();
        let state = Arc::new(RaceState {
            failures: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            cancel_on_match,
        });

        for direction in [ScanDirection::Forward, ScanDirection::Backward] {
            let worker = RowWorker {
                haystack: Arc::clone(&self.haystack),
                needle: Arc::clone(&self.needle),
                direction,
                state: Arc::clone(&state),
                completion: completion.clone(),
            };
            dispatch(move || worker.run());
        }
        drop(completion);

        match signal.recv() {
            Ok(result) => result,
            Err(_) => {
                trace_warn!("worker_lost");
                None
            }
        }
    }

    /// Runs the forward then the backward scan on the calling thread.
    pub fn run_sequential(&self) -> Option<Match> {
        [ScanDirection::Forward, ScanDirection::Backward]
            .into_iter()
            .find_map(|direction| {
                match scan_direction(&self.haystack, &self.needle, direction, None) {
                    ScanOutcome::Found(found) => Some(found),
                    ScanOutcome::Exhausted | ScanOutcome::Cancelled => None,
                }
            })
    }
}
