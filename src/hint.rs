//! Revealing a single cell of the solution.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::core::*;

/// The outcome of a hint request: the grid with at most one more cell
/// filled in, and which assignment was revealed, if any.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hint {
  pub grid: Grid,
  pub revealed: Option<Asgmt>,
}

/// Copies one digit of the solved grid into the original grid.
///
/// Prefers the currently selected cell when it is empty in the
/// original; otherwise picks uniformly among the original's empty
/// cells.  A grid with no empty cells comes back unchanged.  Never
/// reveals more than one cell.
pub fn reveal<R: Rng>(
  solved: &SolvedGrid,
  original: &Grid,
  selected: Option<Loc>,
  rng: &mut R,
) -> Hint {
  let open: Vec<Loc> = Loc::all().filter(|&loc| original[loc].is_none()).collect();
  let choice = selected
    .filter(|&loc| original[loc].is_none())
    .or_else(|| open.choose(rng).copied());
  match choice {
    None => Hint {
      grid: *original,
      revealed: None,
    },
    Some(loc) => {
      let num = solved[loc];
      let mut grid = *original;
      grid[loc] = Some(num);
      Hint {
        grid,
        revealed: Some(Asgmt::new(num, loc)),
      }
    }
  }
}
