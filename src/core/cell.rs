//! Defines the annotated cell grid that hosts render from.
//!
//! Each occupied cell carries its numeral plus independent presentation
//! flags: typed by the user, placed by a solver, revealed as a hint, or
//! currently conflicting.  Solvers operate on plain `Grid`s; the
//! supervisor keeps these flags correct on the way in and out.

use std::fmt;
use std::ops::Index;

use super::*;

/// One occupied cell of the annotated grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CellValue {
  num: Num,
  /// Typed by the user.
  pub is_input: bool,
  /// Placed by a solver.
  pub is_solution: bool,
  /// Revealed as a hint.
  pub is_hint: bool,
  /// Currently conflicting with a peer cell.
  pub is_error: bool,
}

impl CellValue {
  /// Makes a user-typed cell.
  pub fn input(num: Num) -> Self {
    CellValue {
      num,
      is_input: true,
      is_solution: false,
      is_hint: false,
      is_error: false,
    }
  }

  /// Makes a solver-placed cell.
  pub fn solution(num: Num) -> Self {
    CellValue {
      num,
      is_input: false,
      is_solution: true,
      is_hint: false,
      is_error: false,
    }
  }

  /// Makes a hint-revealed cell.
  pub fn hint(num: Num) -> Self {
    CellValue {
      num,
      is_input: false,
      is_solution: false,
      is_hint: true,
      is_error: false,
    }
  }

  /// This cell's numeral.
  pub fn num(self) -> Num {
    self.num
  }
}

/// A 9x9 grid of annotated cells; empty cells hold nothing.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct CellGrid([Option<CellValue>; 81]);

impl CellGrid {
  /// Makes an empty CellGrid.
  pub const fn new() -> CellGrid {
    CellGrid([None; 81])
  }

  /// Makes a CellGrid whose occupied cells are all flagged as user
  /// input.
  pub fn from_input(grid: &Grid) -> CellGrid {
    let mut cells = CellGrid::new();
    for asgmt in grid.iter() {
      cells.0[asgmt.loc.index()] = Some(CellValue::input(asgmt.num));
    }
    cells
  }

  /// Returns the number of occupied cells.
  pub fn len(&self) -> usize {
    self.0.iter().filter(|optional| optional.is_some()).count()
  }

  /// Tells whether no cell is occupied.
  pub fn is_empty(&self) -> bool {
    self.0.iter().all(|optional| optional.is_none())
  }

  /// Projects the numerals into a plain Grid, dropping the flags.
  pub fn values(&self) -> Grid {
    let mut grid = Grid::new();
    for loc in Loc::all() {
      grid[loc] = self[loc].map(CellValue::num);
    }
    grid
  }

  /// Writes or clears a cell on the user's behalf.  A written cell is
  /// flagged as input.
  pub fn set_input(&mut self, loc: Loc, num: Option<Num>) {
    self.0[loc.index()] = num.map(CellValue::input);
  }

  /// Copies a working grid's extra placements in as solution cells, and
  /// drops cells the working grid no longer holds.  Cells occupied here
  /// and in the working grid keep their flags.
  pub fn absorb_step(&mut self, working: &Grid) {
    for loc in Loc::all() {
      match (self[loc], working[loc]) {
        (None, Some(num)) => self.0[loc.index()] = Some(CellValue::solution(num)),
        (Some(_), None) => self.0[loc.index()] = None,
        _ => {}
      }
    }
  }

  /// Fills every empty cell from the solved grid, flagged as solution.
  pub fn absorb_solution(&mut self, solved: &SolvedGrid) {
    self.absorb_step(&solved.grid());
  }

  /// Reveals a single hint cell.
  pub fn reveal_hint(&mut self, loc: Loc, num: Num) {
    self.0[loc.index()] = Some(CellValue::hint(num));
  }

  /// Rewrites every cell's error flag from the given map: flags cleared
  /// first, then set only where the map has an entry.  Never cumulative
  /// across calls.
  pub fn set_error_flags(&mut self, marked: impl Fn(Loc) -> bool) {
    for loc in Loc::all() {
      if let Some(cell) = &mut self.0[loc.index()] {
        cell.is_error = marked(loc);
      }
    }
  }
}

impl Default for CellGrid {
  fn default() -> Self {
    Self::new()
  }
}

impl Index<Loc> for CellGrid {
  type Output = Option<CellValue>;

  /// Allows `CellGrid`s to be indexed by `Loc`s.
  fn index(&self, loc: Loc) -> &Option<CellValue> {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked(loc.index()) }
  }
}

impl fmt::Debug for CellGrid {
  /// Prints the numerals as Ascii art; the flags are elided.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&self.values(), f)
  }
}
