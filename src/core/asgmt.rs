//! Defines `Asgmt`, the assignment of a numeral to a location.

use super::loc::*;
use super::num::*;
use std::fmt;

/// An assignment: a numeral written in one location of the grid.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Asgmt {
  pub num: Num,
  pub loc: Loc,
}

impl Asgmt {
  /// Makes a new Asgmt.
  pub fn new(num: Num, loc: Loc) -> Self {
    Asgmt { num, loc }
  }
}

impl fmt::Debug for Asgmt {
  /// Prints this assignment as numeral @ location.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}@{:?}", self.num, self.loc)
  }
}
