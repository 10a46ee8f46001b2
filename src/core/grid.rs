//! Defines the Grid type, representing a Sudoku grid and the assignments
//! of numerals to locations within such a grid.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use super::*;

/// A Sudoku grid: a 9x9 array with each location holding an optional
/// numeral from 1 through 9.  We model this as a map from `Loc` to
/// `Option<Num>`, or as a collection of `Asgmt`s.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Grid([Option<Num>; 81]);

impl Grid {
  /// Makes an empty Grid.
  pub const fn new() -> Grid {
    Grid([None; 81])
  }

  /// Empties the grid.
  pub fn clear(&mut self) {
    self.0.fill(None);
  }

  /// Returns the number of locations that have assigned numerals.
  pub fn len(&self) -> usize {
    self.0.iter().filter(|optional| optional.is_some()).count()
  }

  /// Tells whether no location has an assigned numeral.
  pub fn is_empty(&self) -> bool {
    self.0.iter().all(|optional| optional.is_none())
  }

  /// Tells whether every location has an assigned numeral.
  pub fn is_full(&self) -> bool {
    self.0.iter().all(|optional| optional.is_some())
  }

  /// The first location without an assigned numeral, in row-major order.
  pub fn first_empty(&self) -> Option<Loc> {
    Loc::all().find(|&loc| self[loc].is_none())
  }

  /// Iterates the assignments in this grid.
  pub fn iter(&self) -> impl Iterator<Item = Asgmt> + '_ {
    Loc::all()
      .zip(self.0)
      .filter_map(|(loc, optional)| optional.map(|num| Asgmt { num, loc }))
  }
}

impl Default for Grid {
  fn default() -> Self {
    Self::new()
  }
}

impl Index<Loc> for Grid {
  type Output = Option<Num>;

  /// Allows `Grid`s to be indexed by `Loc`s.
  fn index(&self, loc: Loc) -> &Option<Num> {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked(loc.index()) }
  }
}

impl IndexMut<Loc> for Grid {
  fn index_mut(&mut self, loc: Loc) -> &mut Option<Num> {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked_mut(loc.index()) }
  }
}

impl fmt::Display for Grid {
  /// Prints this grid in row-major order, with `.` for unassigned
  /// squares.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for optional in self.0 {
      match optional {
        Some(num) => write!(f, "{}", num)?,
        None => f.write_str(".")?,
      }
    }
    Ok(())
  }
}

impl fmt::Debug for Grid {
  /// Prints this grid as Ascii art.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in Row::all() {
      if row.get() > 0 {
        f.write_str("\n")?;
        if row.get() % 3 == 0 {
          f.write_str("- - - + - - - + - - -\n")?;
        }
      }
      for (i, &loc) in row.locs().iter().enumerate() {
        if i > 0 {
          f.write_str(if i % 3 == 0 { " | " } else { " " })?;
        }
        match self[loc] {
          Some(num) => write!(f, "{}", num)?,
          None => f.write_str(".")?,
        }
      }
    }
    Ok(())
  }
}

impl FromStr for Grid {
  type Err = String;

  /// Constructs a Grid from a string, which must contain exactly 81
  /// location characters, plus any number of other characters.
  ///
  /// A location character is `1` through `9`, signifying an assignment
  /// of that digit to the corresponding location, or `0` or `.`,
  /// signifying that the location is blank.
  ///
  /// This method ignores all other characters, which means that strings
  /// in both of Grid's Display and Debug forms parse back into the
  /// original grid.
  fn from_str(s: &str) -> Result<Grid, String> {
    let mut grid = Grid::new();
    let mut count = 0;
    for c in s.chars() {
      let num = match c {
        '0' | '.' => None,
        '1'..='9' => Num::new(c as i8 - b'0' as i8),
        _ => continue,
      };
      match Loc::from_index(count) {
        Some(loc) => grid[loc] = num,
        None => return Err(format!("More than 81 locations in {}", s)),
      }
      count += 1;
    }
    if count == Loc::COUNT {
      Ok(grid)
    } else {
      Err(format!("Fewer than 81 locations in {}", s))
    }
  }
}

/// A solved Sudoku grid: a 9x9 array with each location holding a
/// numeral from 1 through 9, and each row, column, and block containing
/// one copy of every numeral.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SolvedGrid([Num; 81]);

impl SolvedGrid {
  /// Makes a SolvedGrid from a Grid, when the grid is complete and obeys
  /// the one-per-unit rule.
  pub fn new(grid: &Grid) -> Option<SolvedGrid> {
    for row in Row::all() {
      Self::unit_nums(grid, row.locs())?;
    }
    for col in Col::all() {
      Self::unit_nums(grid, col.locs())?;
    }
    for blk in Blk::all() {
      Self::unit_nums(grid, blk.locs())?;
    }
    let mut cells = [N1; 81];
    for loc in Loc::all() {
      cells[loc.index()] = grid[loc]?;
    }
    Some(SolvedGrid(cells))
  }

  /// Collects a unit's numerals, or None unless all nine are present.
  fn unit_nums(grid: &Grid, locs: &[Loc; 9]) -> Option<NumSet> {
    let mut seen = NumSet::new();
    for &loc in locs {
      if !seen.insert(grid[loc]?) {
        return None;
      }
    }
    Some(seen)
  }

  /// Converts back to Grid.  This always works.
  pub fn grid(&self) -> Grid {
    let mut grid = Grid::new();
    for loc in Loc::all() {
      grid[loc] = Some(self[loc]);
    }
    grid
  }
}

impl TryFrom<&Grid> for SolvedGrid {
  type Error = &'static str;

  fn try_from(value: &Grid) -> Result<Self, Self::Error> {
    SolvedGrid::new(value).ok_or("Grid is not solved")
  }
}

impl From<&SolvedGrid> for Grid {
  fn from(value: &SolvedGrid) -> Grid {
    value.grid()
  }
}

impl Index<Loc> for SolvedGrid {
  type Output = Num;

  /// Allows `SolvedGrid`s to be indexed by `Loc`s.
  fn index(&self, loc: Loc) -> &Num {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked(loc.index()) }
  }
}

impl fmt::Display for SolvedGrid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.grid(), f)
  }
}

impl fmt::Debug for SolvedGrid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&self.grid(), f)
  }
}
