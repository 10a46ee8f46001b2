//! Defines types for the subdivisions of a Sudoku grid: rows, columns,
//! 3x3 blocks, and bands of three parallel lines.

use super::loc::*;
use crate::define_id_types;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

define_id_types! {
    /// Identifies one of the 9 rows in a Sudoku grid.
    ///
    /// Rows are numbered top to bottom.
    Row: i8[9];

    /// Identifies one of the 9 columns in a Sudoku grid.
    ///
    /// Columns are numbered left to right.
    Col: i8[9];

    /// Identifies one of the 9 3x3 blocks in a Sudoku grid.
    ///
    /// Blocks are numbered in row-major order.
    Blk: i8[9];

    /// Identifies a group of three adjacent parallel lines: rows 0-2,
    /// 3-5, and 6-8, or the same for columns.  Each band covers a strip
    /// of three blocks.
    #[derive(Debug)]
    Band: i8[3];
}

impl Row {
  /// The locations this row comprises, left to right.
  pub fn locs(self) -> &'static [Loc; 9] {
    &ROW_LOCS[self.index()]
  }

  /// Tells which band of rows this row inhabits.
  pub const fn band(self) -> Band {
    // Safe because Rows are in 0..9.
    unsafe { Band::new_unchecked(self.0 / 3) }
  }
}

impl Col {
  /// The locations this column comprises, top to bottom.
  pub fn locs(self) -> &'static [Loc; 9] {
    &COL_LOCS[self.index()]
  }

  /// Tells which band of columns this column inhabits.
  pub const fn band(self) -> Band {
    // Safe because Cols are in 0..9.
    unsafe { Band::new_unchecked(self.0 / 3) }
  }
}

impl Blk {
  /// Locates the block containing the intersection of a row and column.
  pub const fn containing(row: Row, col: Col) -> Self {
    Blk(row.get() / 3 * 3 + col.get() / 3)
  }

  /// The locations this block comprises, in row-major order.
  pub fn locs(self) -> &'static [Loc; 9] {
    &BLK_LOCS[self.index()]
  }
}

impl Band {
  /// The three rows of this row-band, top to bottom.
  pub fn rows(self) -> [Row; 3] {
    let first = self.0 * 3;
    // Safe because Bands are in 0..3.
    unsafe {
      [
        Row::new_unchecked(first),
        Row::new_unchecked(first + 1),
        Row::new_unchecked(first + 2),
      ]
    }
  }

  /// The three columns of this column-band, left to right.
  pub fn cols(self) -> [Col; 3] {
    let first = self.0 * 3;
    // Safe because Bands are in 0..3.
    unsafe {
      [
        Col::new_unchecked(first),
        Col::new_unchecked(first + 1),
        Col::new_unchecked(first + 2),
      ]
    }
  }
}

impl fmt::Debug for Row {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "R{}", self.ordinal())
  }
}

impl fmt::Debug for Col {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "C{}", self.ordinal())
  }
}

impl fmt::Debug for Blk {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "B{}", self.ordinal())
  }
}

/// Memoizes each row's locations.
static ROW_LOCS: Lazy<[[Loc; 9]; 9]> = Lazy::new(|| {
  let mut table = [[L11; 9]; 9];
  for loc in Loc::all() {
    table[loc.row().index()][loc.col().index()] = loc;
  }
  table
});

/// Memoizes each column's locations.
static COL_LOCS: Lazy<[[Loc; 9]; 9]> = Lazy::new(|| {
  let mut table = [[L11; 9]; 9];
  for loc in Loc::all() {
    table[loc.col().index()][loc.row().index()] = loc;
  }
  table
});

/// Memoizes each block's locations.
static BLK_LOCS: Lazy<[[Loc; 9]; 9]> = Lazy::new(|| {
  let mut table = [[L11; 9]; 9];
  for loc in Loc::all() {
    let within = loc.row().index() % 3 * 3 + loc.col().index() % 3;
    table[loc.blk().index()][within] = loc;
  }
  table
});
