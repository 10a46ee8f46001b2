//! The solve supervisor: runs a solver on a worker thread and reports
//! back over an ordered channel.
//!
//! One run at a time per engine.  A run delivers zero or more progress
//! reports, then one terminal report — solved or no-solution — unless
//! it is cancelled, in which case the stream simply ends.  The fast
//! path also has a wall-clock budget: a watcher announces the probable
//! failure once and asks the run to stop, though a solve that wins the
//! race may still land afterwards (the last report is the one to
//! believe).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::core::*;
use crate::hint;
use crate::random;
use crate::solve::backtrack::Backtracker;
use crate::solve::fast::FastSolver;
use crate::solve::CancelToken;
use crate::validate;

/// How often the timeout watcher looks at the clock.
const WATCH_TICK: Duration = Duration::from_millis(10);

/// Pass-through configuration for one solve run.  The host owns these
/// settings; the engine never reads them from anywhere else.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolveOptions {
  /// Replay the solution placement by placement.
  pub animate: bool,
  /// Pause between animated placements.
  pub step_time: Duration,
  /// Wall-clock budget for the fast path before the watcher reports a
  /// probable failure.
  pub budget: Duration,
}

impl Default for SolveOptions {
  fn default() -> Self {
    SolveOptions {
      animate: false,
      step_time: Duration::from_millis(100),
      budget: Duration::from_millis(1000),
    }
  }
}

/// One report from a running solve.
#[derive(Clone, Debug)]
pub enum Report {
  /// An animated placement snapshot.
  Progress(CellGrid),
  /// The fast path ran out of budget; probably unsolvable, but the
  /// search is still being stopped and may yet deliver `Solved`.
  TimedOut,
  /// Terminal: the completed grid.
  Solved(CellGrid),
  /// Terminal: no completion exists.
  NoSolution,
}

/// Ways the engine can refuse a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
  /// A solve is already running; cancel it or wait it out.
  SolveInProgress,
  /// The grid has no solution to draw on (hints only).
  NoSolution,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::SolveInProgress => write!(f, "a solve is already in progress"),
      Error::NoSolution => write!(f, "this Sudoku has no solution"),
    }
  }
}

impl std::error::Error for Error {}

/// A handle on one running solve.
pub struct Subscription {
  reports: Receiver<Report>,
  cancel: CancelToken,
  original: CellGrid,
}

impl Subscription {
  /// The report stream.  Reports arrive in placement order; a terminal
  /// report is the worker's last.
  pub fn reports(&self) -> &Receiver<Report> {
    &self.reports
  }

  /// The grid as it was when the solve started.  Hosts restore this on
  /// a no-solution outcome.
  pub fn original(&self) -> &CellGrid {
    &self.original
  }

  /// Asks the run to stop.  Once this returns, no report from this run
  /// can be observed again.
  pub fn cancel(self) {
    // Dropping does the work: the token flips and the receiver closes.
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    self.cancel.cancel();
  }
}

/// Supervises solve runs and answers synchronous requests.
pub struct Engine {
  running: Option<Arc<AtomicBool>>,
  rng: random::Pcg,
}

impl Engine {
  /// Makes an engine with an entropy-seeded hint generator.
  pub fn new() -> Engine {
    Engine::with_rng(random::new_rng())
  }

  /// Makes an engine with the given hint generator.
  pub fn with_rng(rng: random::Pcg) -> Engine {
    Engine { running: None, rng }
  }

  /// Tells whether a previously started solve is still running.
  pub fn is_active(&self) -> bool {
    match &self.running {
      Some(done) => !done.load(Ordering::SeqCst),
      None => false,
    }
  }

  /// Starts a solve of the given grid on a worker thread.
  ///
  /// While a run is active, further solves are refused rather than
  /// queued or implicitly cancelled; the working grid belongs to one
  /// run at a time.
  pub fn solve(&mut self, cells: &CellGrid, opts: SolveOptions) -> Result<Subscription, Error> {
    if self.is_active() {
      return Err(Error::SolveInProgress);
    }
    let original = *cells;
    let cancel = CancelToken::new();
    let done = Arc::new(AtomicBool::new(false));
    let (tx, rx) = channel();

    {
      let tx = tx.clone();
      let cancel = cancel.clone();
      let done = Arc::clone(&done);
      thread::spawn(move || run_solve(original, opts, tx, cancel, done));
    }
    if !opts.animate {
      let cancel = cancel.clone();
      let done = Arc::clone(&done);
      thread::spawn(move || watch_budget(opts.budget, tx, cancel, done));
    }

    self.running = Some(done);
    Ok(Subscription {
      reports: rx,
      cancel,
      original,
    })
  }

  /// Synchronous validation: rewrites the grid's error flags and tells
  /// whether it is error free.  Cheap enough for every keystroke.
  pub fn check(&self, cells: &mut CellGrid) -> bool {
    validate::check(&cells.values()).apply_to(cells)
  }

  /// Solves the grid and reveals one cell of the solution, preferring
  /// the selected cell.  Synchronous; refused while a run is active.
  pub fn hint(&mut self, cells: &CellGrid, selected: Option<Loc>) -> Result<CellGrid, Error> {
    if self.is_active() {
      return Err(Error::SolveInProgress);
    }
    let original = cells.values();
    if !validate::check(&original).is_error_free() {
      return Err(Error::NoSolution);
    }
    let solver = FastSolver::new(&original).map_err(|_| Error::NoSolution)?;
    let solved = solver
      .solve(&CancelToken::new())
      .ok_or(Error::NoSolution)?;
    let hint = hint::reveal(&solved, &original, selected, &mut self.rng);
    let mut revealed = *cells;
    if let Some(asgmt) = hint.revealed {
      revealed.reveal_hint(asgmt.loc, asgmt.num);
    }
    Ok(revealed)
  }
}

impl Default for Engine {
  fn default() -> Self {
    Self::new()
  }
}

/// The worker: validates, solves, and delivers the terminal report.
fn run_solve(
  original: CellGrid,
  opts: SolveOptions,
  tx: Sender<Report>,
  cancel: CancelToken,
  done: Arc<AtomicBool>,
) {
  let input = original.values();

  // A grid that already breaks the rules gets the no-solution outcome
  // without a search.
  if !validate::check(&input).is_error_free() {
    let _ = tx.send(Report::NoSolution);
    done.store(true, Ordering::SeqCst);
    return;
  }

  let outcome = if opts.animate {
    let mut observer = |working: &Grid| {
      let mut snapshot = original;
      snapshot.absorb_step(working);
      let _ = tx.send(Report::Progress(snapshot));
    };
    Backtracker::new(&input, &cancel)
      .observed(&mut observer, Some(opts.step_time))
      .run()
  } else {
    match FastSolver::new(&input) {
      Ok(solver) => solver.solve(&cancel),
      Err(Invalid) => None,
    }
  };

  match outcome {
    Some(solved) => {
      let mut cells = original;
      cells.absorb_solution(&solved);
      let _ = tx.send(Report::Solved(cells));
    }
    // A cancelled run ends silently; cancellation is not an error.
    None if cancel.is_cancelled() => {}
    None => {
      let _ = tx.send(Report::NoSolution);
    }
  }
  done.store(true, Ordering::SeqCst);
}

/// The fast path's timeout watcher.  Polls the clock off the solver
/// thread; on expiry it reports once and asks the run to stop.
fn watch_budget(budget: Duration, tx: Sender<Report>, cancel: CancelToken, done: Arc<AtomicBool>) {
  let deadline = Instant::now() + budget;
  loop {
    if done.load(Ordering::SeqCst) {
      return;
    }
    let now = Instant::now();
    if now >= deadline {
      let _ = tx.send(Report::TimedOut);
      cancel.cancel();
      return;
    }
    thread::sleep(WATCH_TICK.min(deadline - now));
  }
}
