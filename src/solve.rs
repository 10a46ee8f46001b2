//! The two solving algorithms and the control types they share.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::*;

pub mod backtrack;
pub mod fast;

/// What a recursive search frame tells its caller.
///
/// `Found` and `Cancelled` short-circuit: every outer frame passes them
/// straight up without trying further numerals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
  /// Keep searching: this branch was exhausted without a solution.
  Continue,
  /// A complete solution is on the board; unwind without disturbing it.
  Found,
  /// The run was cancelled; unwind without placing anything further.
  Cancelled,
}

/// Cooperative cancellation flag shared between a running solve and its
/// owner.  Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
  /// Makes a new, uncancelled token.
  pub fn new() -> CancelToken {
    CancelToken::default()
  }

  /// Requests cancellation.  Irrevocable.
  pub fn cancel(&self) {
    self.0.store(true, Ordering::SeqCst);
  }

  /// Tells whether cancellation has been requested.
  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::SeqCst)
  }
}

/// Solves the given puzzle with the fast solver, if it has a solution.
///
/// Contradictory clues count as having no solution.
pub fn solve(clues: &Grid) -> Option<SolvedGrid> {
  fast::FastSolver::new(clues).ok()?.solve(&CancelToken::new())
}
