//! The naive backtracking solver.
//!
//! Visits locations in row-major order, trying numerals 1 through 9 at
//! each empty cell.  It is the engine's reference algorithm, and the one
//! used for animated solves: it can report every tentative placement to
//! an observer and pace itself between placements.  Its worst case is
//! unbounded, so interactive fast solves go through `fast` instead.

use std::thread;
use std::time::Duration;

use super::{CancelToken, Flow};
use crate::core::*;
use crate::validate;

/// Called with the whole working grid after each tentative placement.
pub type StepObserver<'a> = &'a mut dyn FnMut(&Grid);

/// One backtracking run over a copy of the caller's grid.
pub struct Backtracker<'a> {
  grid: Grid,
  cancel: &'a CancelToken,
  observer: Option<StepObserver<'a>>,
  step_time: Option<Duration>,
}

impl<'a> Backtracker<'a> {
  /// Makes a solver for the given clues.  The clues are copied; the
  /// caller's grid is never touched.
  pub fn new(clues: &Grid, cancel: &'a CancelToken) -> Self {
    Backtracker {
      grid: *clues,
      cancel,
      observer: None,
      step_time: None,
    }
  }

  /// Attaches a placement observer, with an optional pause after each
  /// placement.  The pause is purely display pacing, owned by the
  /// caller's configuration.
  pub fn observed(mut self, observer: StepObserver<'a>, step_time: Option<Duration>) -> Self {
    self.observer = Some(observer);
    self.step_time = step_time;
    self
  }

  /// Runs the search.  Returns the solution, or None when the puzzle
  /// has none or the run was cancelled.
  pub fn run(mut self) -> Option<SolvedGrid> {
    // A grid that already breaks the rules has no solution; don't
    // search it.
    if !validate::check(&self.grid).is_error_free() {
      return None;
    }
    match self.search(Some(L11)) {
      Flow::Found => {
        let solved = SolvedGrid::new(&self.grid);
        debug_assert!(solved.is_some(), "search completed an unsolved grid");
        solved
      }
      _ => None,
    }
  }

  /// Tries to complete the grid from the given position onward.  A
  /// position of None means every location is behind us: the grid is
  /// complete, which short-circuits the whole search.
  fn search(&mut self, at: Option<Loc>) -> Flow {
    if self.cancel.is_cancelled() {
      return Flow::Cancelled;
    }
    let Some(loc) = at else {
      return Flow::Found;
    };
    if self.grid[loc].is_some() {
      return self.search(loc.next());
    }
    for num in Num::all() {
      if self.admits(loc, num) {
        self.grid[loc] = Some(num);
        self.step();
        match self.search(loc.next()) {
          Flow::Continue => {} // try the next numeral
          flow => return flow,
        }
      }
    }
    // Every numeral failed here; clear the cell before backtracking.
    self.grid[loc] = None;
    Flow::Continue
  }

  /// Tells whether the numeral can go at the location without repeating
  /// in its row, column, or block.
  fn admits(&self, at: Loc, num: Num) -> bool {
    let open = |locs: &[Loc; 9]| locs.iter().all(|&loc| self.grid[loc] != Some(num));
    open(at.row().locs()) && open(at.col().locs()) && open(at.blk().locs())
  }

  /// Reports the current grid to the observer and pauses, when
  /// configured to.
  fn step(&mut self) {
    if let Some(observer) = &mut self.observer {
      observer(&self.grid);
      if let Some(pause) = self.step_time {
        thread::sleep(pause);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  const PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
  const SOLUTION: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

  #[test]
  fn solves() {
    let clues = Grid::from_str(PUZZLE).unwrap();
    let solved = Backtracker::new(&clues, &CancelToken::new()).run().unwrap();
    assert_eq!(SOLUTION, solved.to_string());
  }

  #[test]
  fn clues_left_untouched() {
    let clues = Grid::from_str(PUZZLE).unwrap();
    let copy = clues;
    Backtracker::new(&clues, &CancelToken::new()).run().unwrap();
    assert_eq!(copy, clues);
  }

  #[test]
  fn rejects_broken_input() {
    let mut clues = Grid::from_str(PUZZLE).unwrap();
    clues[L13] = Some(N5); // duplicates the 5 at L11
    assert!(Backtracker::new(&clues, &CancelToken::new()).run().is_none());
  }

  #[test]
  fn observes_every_placement() {
    // Leave a handful of holes so the animation is short and entirely
    // forced.
    let mut clues = Grid::from_str(SOLUTION).unwrap();
    let holes = [L11, L38, L55, L72, L99];
    for loc in holes {
      clues[loc] = None;
    }

    let mut snapshots: Vec<Grid> = Vec::new();
    let mut observer = |grid: &Grid| snapshots.push(*grid);
    let solved = Backtracker::new(&clues, &CancelToken::new())
      .observed(&mut observer, None)
      .run()
      .unwrap();

    assert_eq!(SOLUTION, solved.to_string());
    // No backtracking happens on a forced grid: one snapshot per hole,
    // each one placement bigger than the last.
    assert_eq!(holes.len(), snapshots.len());
    for (i, snapshot) in snapshots.iter().enumerate() {
      assert_eq!(clues.len() + i + 1, snapshot.len());
    }
    assert_eq!(snapshots.last().unwrap().to_string(), SOLUTION);
  }

  #[test]
  fn failed_placements_stay_visible_until_overwritten() {
    // Row 1 and column 1 both miss exactly {1, 2}, so the top-left
    // block can never hold L11, L12 and L21 at once: every branch dies
    // at L21.  The observer watches 1 sit at L11 through the failure of
    // its subtree before 2 overwrites it.
    let clues = Grid::from_str(
      r"
            . . 3 | 4 5 6 | 7 8 9
            . . . | . . . | . . .
            4 . . | . . . | . . .
            - - - + - - - + - - -
            3 . . | . . . | . . .
            5 . . | . . . | . . .
            6 . . | . . . | . . .
            - - - + - - - + - - -
            7 . . | . . . | . . .
            8 . . | . . . | . . .
            9 . . | . . . | . . .",
    )
    .unwrap();
    let mut seen_at_l11: Vec<Option<Num>> = Vec::new();
    let mut observer = |grid: &Grid| seen_at_l11.push(grid[L11]);
    let outcome = Backtracker::new(&clues, &CancelToken::new())
      .observed(&mut observer, None)
      .run();
    assert_eq!(None, outcome);
    assert_eq!(
      seen_at_l11,
      vec![Some(N1), Some(N1), Some(N2), Some(N2)]
    );
  }

  #[test]
  fn cancelled_mid_run() {
    let token = CancelToken::new();
    let clues = Grid::new();
    let mut steps = 0;
    let cancel_after = 10;
    let mut observer = |_: &Grid| {
      steps += 1;
      if steps == cancel_after {
        token.cancel();
      }
    };
    let inner_token = token.clone();
    let outcome = Backtracker::new(&clues, &inner_token)
      .observed(&mut observer, None)
      .run();
    assert_eq!(None, outcome);
    assert_eq!(cancel_after, steps);
  }
}
