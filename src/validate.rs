//! Duplicate detection: finds every cell that conflicts with a peer.

use std::fmt;
use std::ops::Index;

use crate::core::*;

/// Records, per cell, the duplicated numeral found there, if any.
///
/// A map is built from nothing on every validation pass, so it always
/// reflects exactly the grid it was built from.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct ErrorMap([Option<Num>; 81]);

impl ErrorMap {
  fn new() -> ErrorMap {
    ErrorMap([None; 81])
  }

  fn mark(&mut self, loc: Loc, num: Num) {
    self.0[loc.index()] = Some(num);
  }

  /// Tells whether no cell is marked.
  pub fn is_clear(&self) -> bool {
    self.0.iter().all(|optional| optional.is_none())
  }

  /// Iterates the marked cells as assignments.
  pub fn iter(&self) -> impl Iterator<Item = Asgmt> + '_ {
    Loc::all()
      .zip(self.0)
      .filter_map(|(loc, optional)| optional.map(|num| Asgmt { num, loc }))
  }
}

impl Index<Loc> for ErrorMap {
  type Output = Option<Num>;

  fn index(&self, loc: Loc) -> &Option<Num> {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked(loc.index()) }
  }
}

impl fmt::Debug for ErrorMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

/// The outcome of one validation pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Check {
  errors: ErrorMap,
}

impl Check {
  /// Tells whether the checked grid had no duplicates.
  pub fn is_error_free(&self) -> bool {
    self.errors.is_clear()
  }

  /// The error map built by the pass.
  pub fn errors(&self) -> &ErrorMap {
    &self.errors
  }

  /// Rewrites the error flags of an annotated grid from this check's
  /// map, and tells whether the grid was error free.
  pub fn apply_to(&self, cells: &mut CellGrid) -> bool {
    cells.set_error_flags(|loc| self.errors[loc].is_some());
    self.is_error_free()
  }
}

/// Checks every occupied cell of the grid against its row, column, and
/// block, and maps each cell that duplicates a peer's numeral.
///
/// All three unit scans run for every cell even after one has found a
/// conflict; stopping early would leave later duplicates out of the map
/// the host renders from.  Costs 27 nine-cell scans per occupied cell,
/// which is fine at once per keystroke.
pub fn check(grid: &Grid) -> Check {
  let mut errors = ErrorMap::new();
  for asgmt in grid.iter() {
    let row = scan_unit(grid, &mut errors, asgmt, asgmt.loc.row().locs());
    let col = scan_unit(grid, &mut errors, asgmt, asgmt.loc.col().locs());
    let blk = scan_unit(grid, &mut errors, asgmt, asgmt.loc.blk().locs());
    if row || col || blk {
      errors.mark(asgmt.loc, asgmt.num);
    }
  }
  Check { errors }
}

/// Marks every other cell of the unit holding the assignment's numeral.
/// Tells whether any did.
fn scan_unit(grid: &Grid, errors: &mut ErrorMap, asgmt: Asgmt, locs: &[Loc; 9]) -> bool {
  let mut found = false;
  for &loc in locs {
    if loc != asgmt.loc && grid[loc] == Some(asgmt.num) {
      errors.mark(loc, asgmt.num);
      found = true;
    }
  }
  found
}
