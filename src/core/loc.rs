//! Defines the Loc type, which identifies the locations (or squares or
//! cells) of a Sudoku grid.

use super::units::*;
use crate::define_id_types;
use once_cell::sync::Lazy;
use paste::paste;
use seq_macro::seq;
use serde::Serialize;
use std::fmt;

define_id_types! {
    /// Identifies one of the 81 locations in a Sudoku grid.
    ///
    /// Sudokus are represented as length-81 arrays in row-major order.
    /// `Loc(0)` is the top left square of the grid, and `Loc(80)` is the
    /// bottom right.
    Loc: i8[81];
}

// Constant Loc values, L11 through L99.
seq!(R in 1..=9 {
    seq!(C in 1..=9 {
        paste! {
            #[allow(clippy::identity_op, clippy::erasing_op, clippy::eq_op)]
            pub const [<L R C>]: Loc = Loc((R - 1) * 9 + (C - 1));
        }
    });
});

impl Loc {
  /// Converts from row/col to Loc.
  pub const fn at(row: Row, col: Col) -> Loc {
    Loc(row.get() * 9 + col.get())
  }

  /// This location's row.
  pub const fn row(self) -> Row {
    // Safe because Locs are in 0..81.
    unsafe { Row::new_unchecked(self.0 / 9) }
  }

  /// This location's column.
  pub const fn col(self) -> Col {
    // Safe because Locs are in 0..81.
    unsafe { Col::new_unchecked(self.0 % 9) }
  }

  /// This location's block.
  pub const fn blk(self) -> Blk {
    Blk::containing(self.row(), self.col())
  }

  /// The location after this one in row-major order, or None from the
  /// bottom right square.
  pub const fn next(self) -> Option<Loc> {
    Loc::new(self.0 + 1)
  }

  /// This location's 20 peers: the other locations that share its row,
  /// column, or block.
  pub fn peers(self) -> &'static [Loc; 20] {
    &PEERS[self.index()]
  }

  /// Tells whether the given location is a peer of this one.
  pub const fn sees(self, other: Loc) -> bool {
    self.0 != other.0
      && (self.row().get() == other.row().get()
        || self.col().get() == other.col().get()
        || self.blk().get() == other.blk().get())
  }
}

impl fmt::Display for Loc {
  /// Prints this location as (r, c), where r and c are the ordinal
  /// numbers of the location's row and column.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.row().ordinal(), self.col().ordinal())
  }
}

impl fmt::Debug for Loc {
  /// Prints this location as Lrc, matching the constant names.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "L{}{}", self.row().ordinal(), self.col().ordinal())
  }
}

/// Memoizes every location's peers.
static PEERS: Lazy<[[Loc; 20]; 81]> = Lazy::new(|| {
  let mut table = [[L11; 20]; 81];
  for loc in Loc::all() {
    let mut n = 0;
    for other in Loc::all() {
      if loc.sees(other) {
        table[loc.index()][n] = other;
        n += 1;
      }
    }
    debug_assert_eq!(n, 20);
  }
  table
});
