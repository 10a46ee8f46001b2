//! The fast solver: candidate-mask elimination with guided brute force.
//!
//! Keeps a `NumSet` of still-admissible numerals per cell, repeatedly
//! applies cheap elimination moves (naked singles, row/column hidden
//! singles, naked pairs, box/line candidate restriction) while they keep
//! paying off, then finishes with a depth-first search guided by the
//! surviving masks.  The eliminations are purely an accelerator; the
//! brute-force phase alone is what guarantees a correct answer.

use itertools::Itertools;
use std::ops::{Index, IndexMut};

use super::CancelToken;
use crate::core::bits::{Bits, Bits3};
use crate::core::*;

/// The candidate masks for the whole grid.  A placed cell's mask is
/// empty; a fresh empty cell's mask is full.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Candidates([NumSet; 81]);

impl Candidates {
  fn new() -> Candidates {
    Candidates([NumSet::all(); 81])
  }
}

impl Index<Loc> for Candidates {
  type Output = NumSet;

  fn index(&self, loc: Loc) -> &NumSet {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked(loc.index()) }
  }
}

impl IndexMut<Loc> for Candidates {
  fn index_mut(&mut self, loc: Loc) -> &mut NumSet {
    // Safe because `loc.index()` is in 0..81.
    unsafe { self.0.get_unchecked_mut(loc.index()) }
  }
}

/// One fast-solver run: the working grid, its candidate masks, and the
/// running count of placed cells.  `Copy`, so brute-force branches can
/// clone the whole state and leave their parent untouched.
#[derive(Clone, Copy)]
pub struct FastSolver {
  grid: Grid,
  cands: Candidates,
  placed: i32,
}

impl FastSolver {
  /// Seeds the masks from the given clues.  Returns `Err(Invalid)` when
  /// a clue contradicts an earlier one.
  pub fn new(clues: &Grid) -> Result<FastSolver, Invalid> {
    let mut solver = FastSolver {
      grid: Grid::new(),
      cands: Candidates::new(),
      placed: 0,
    };
    for asgmt in clues.iter() {
      if !solver.cands[asgmt.loc].contains(asgmt.num) {
        return Err(Invalid);
      }
      solver.place(asgmt.num, asgmt.loc);
    }
    Ok(solver)
  }

  /// Runs the solver to completion.  Returns the solution, or None when
  /// the puzzle has none or the run was cancelled.
  pub fn solve(mut self, cancel: &CancelToken) -> Option<SolvedGrid> {
    if self.search(cancel) {
      let solved = SolvedGrid::new(&self.grid);
      debug_assert!(solved.is_some(), "search completed an unsolved grid");
      solved
    } else {
      None
    }
  }

  /// Writes a numeral into the grid and strikes it from every peer's
  /// mask.
  fn place(&mut self, num: Num, loc: Loc) {
    self.grid[loc] = Some(num);
    self.cands[loc] = NumSet::new();
    for &peer in loc.peers() {
      self.cands[peer].remove(num);
    }
    self.placed += 1;
  }

  /// Eliminates and places until the board is full or a brute-force
  /// branch is needed.  Tells whether all 81 cells got placed.
  fn search(&mut self, cancel: &CancelToken) -> bool {
    self.propagate();
    self.placed == 81 || self.brute_force(cancel)
  }

  /// The elimination loop.  Each round must place more than a handful
  /// of cells to earn another one, and the loop only runs at all while
  /// the placed count sits in the band where elimination is worth more
  /// than searching.  The pair/line strikes join in only on sparse
  /// boards, where they still have something to eliminate.
  fn propagate(&mut self) {
    let mut last = 0;
    while self.placed - last > 3 && self.placed > 10 && self.placed < 68 {
      last = self.placed;
      self.place_naked_singles();
      self.place_hidden_singles();
      self.place_naked_singles();
      if self.placed < 35 {
        self.strike_naked_pairs();
        self.strike_confined_lines();
      }
    }
  }

  /// Places every cell whose mask has exactly one numeral left.
  fn place_naked_singles(&mut self) {
    for loc in Loc::all() {
      if let Some(num) = self.cands[loc].single() {
        self.place(num, loc);
      }
    }
  }

  /// For each numeral, places it wherever it has exactly one admissible
  /// cell left in a row or column.
  fn place_hidden_singles(&mut self) {
    for num in Num::all() {
      for row in Row::all() {
        if let Some(loc) = self.sole_spot(num, row.locs()) {
          self.place(num, loc);
        }
      }
      for col in Col::all() {
        if let Some(loc) = self.sole_spot(num, col.locs()) {
          self.place(num, loc);
        }
      }
    }
  }

  /// The unit's single cell still admitting the numeral, if exactly one
  /// does.
  fn sole_spot(&self, num: Num, locs: &[Loc; 9]) -> Option<Loc> {
    let mut found = None;
    for &loc in locs {
      if self.cands[loc].contains(num) {
        if found.is_some() {
          return None;
        }
        found = Some(loc);
      }
    }
    found
  }

  /// Two cells of a line sharing an identical two-numeral mask claim
  /// those numerals; strike them from the rest of the line.
  fn strike_naked_pairs(&mut self) {
    for row in Row::all() {
      self.strike_pairs_in(row.locs());
    }
    for col in Col::all() {
      self.strike_pairs_in(col.locs());
    }
  }

  fn strike_pairs_in(&mut self, locs: &[Loc; 9]) {
    for (a, b) in locs.iter().copied().tuple_combinations() {
      let pair = self.cands[a];
      if pair.len() == 2 && self.cands[b] == pair {
        for &other in locs {
          if other != a && other != b {
            self.cands[other] -= pair;
          }
        }
      }
    }
  }

  /// Box/line candidate restriction over every band of rows and of
  /// columns.
  fn strike_confined_lines(&mut self) {
    for num in Num::all() {
      for band in Band::all() {
        let [r0, r1, r2] = band.rows();
        self.strike_band(num, [r0.locs(), r1.locs(), r2.locs()]);
        let [c0, c1, c2] = band.cols();
        self.strike_band(num, [c0.locs(), c1.locs(), c2.locs()]);
      }
    }
  }

  /// The restriction within one band of three parallel lines.  Each
  /// line's thirds are box-aligned, so a numeral confined to one third
  /// of a line is claimed by that box: strike it from the matching
  /// third of the band's other lines.  And when two lines share the
  /// same two admissible thirds, those two boxes are spoken for: the
  /// third line loses both thirds.
  fn strike_band(&mut self, num: Num, lines: [&'static [Loc; 9]; 3]) {
    let mut sections = [Bits3::ZERO; 3];
    for (i, line) in lines.iter().enumerate() {
      for (j, &loc) in line.iter().enumerate() {
        if self.cands[loc].contains(num) {
          sections[i].insert(j as i32 / 3);
        }
      }
    }
    for i in 0..3 {
      match sections[i].len() {
        1 => {
          for k in 0..3 {
            if k != i {
              self.strike_sections(num, lines[k], sections[i]);
            }
          }
        }
        2 => {
          for j in i + 1..3 {
            if sections[j] == sections[i] {
              self.strike_sections(num, lines[3 - i - j], sections[i]);
            }
          }
        }
        _ => {}
      }
    }
  }

  /// Strikes the numeral from the given thirds of one line.
  fn strike_sections(&mut self, num: Num, line: &[Loc; 9], sections: Bits3) {
    for (j, &loc) in line.iter().enumerate() {
      if sections.contains(j as i32 / 3) {
        self.cands[loc].remove(num);
      }
    }
  }

  /// The guided search: branches on the first unplaced cell in
  /// row-major order, one clone of the whole state per admissible
  /// numeral.  The masks have usually cut the branching far enough that
  /// fancier cell choice isn't worth its bookkeeping.
  fn brute_force(&mut self, cancel: &CancelToken) -> bool {
    let Some(loc) = self.grid.first_empty() else {
      // Full grid with placed != 81 can't happen; play it safe.
      debug_assert!(false, "brute force on a full grid");
      return false;
    };
    let nums = self.cands[loc];
    for num in nums.iter() {
      if cancel.is_cancelled() {
        return false;
      }
      let mut branch = *self;
      branch.place(num, loc);
      if branch.search(cancel) {
        *self = branch;
        return true;
      }
    }
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::num_set;
  use std::str::FromStr;

  fn solver(clues: &str) -> FastSolver {
    FastSolver::new(&Grid::from_str(clues).unwrap()).unwrap()
  }

  #[test]
  fn seeded_masks() {
    let solver = solver(
      "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
    );
    assert_eq!(30, solver.placed);
    // A placed cell's mask is empty.
    assert_eq!(NumSet::new(), solver.cands[L11]);
    // L13's row holds 5, 3 and 7; its column 8, 9; its block 5, 3, 6, 9.
    assert_eq!(num_set![N1, N2, N4], solver.cands[L13]);
  }

  #[test]
  fn contradictory_clues() {
    let mut clues = Grid::new();
    clues[L11] = Some(N5);
    clues[L19] = Some(N5);
    assert!(FastSolver::new(&clues).is_err());
  }

  #[test]
  fn naked_singles() {
    let mut solver = solver(
      "000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    solver.cands[L11] = num_set![N4];
    solver.place_naked_singles();
    assert_eq!(solver.grid[L11], Some(N4));
    // The placement struck 4 from its peers.
    assert!(!solver.cands[L12].contains(N4));
    assert!(!solver.cands[L91].contains(N4));
    assert!(!solver.cands[L33].contains(N4));
    assert!(solver.cands[L44].contains(N4));
  }

  #[test]
  fn hidden_singles() {
    let mut solver = solver(
      "000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    // Leave row 1 admitting 7 only at L15.
    for &loc in Row::new(0).unwrap().locs() {
      if loc != L15 {
        solver.cands[loc].remove(N7);
      }
    }
    solver.place_hidden_singles();
    assert_eq!(solver.grid[L15], Some(N7));
  }

  #[test]
  fn naked_pairs() {
    let mut solver = solver(
      "000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    solver.cands[L21] = num_set![N3, N8];
    solver.cands[L27] = num_set![N3, N8];
    solver.strike_naked_pairs();
    for &loc in Row::new(1).unwrap().locs() {
      let mask = solver.cands[loc];
      if loc == L21 || loc == L27 {
        assert_eq!(num_set![N3, N8], mask);
      } else {
        assert!(!mask.contains(N3));
        assert!(!mask.contains(N8));
      }
    }
    // Other rows keep their candidates.
    assert!(solver.cands[L31].contains(N3));
  }

  #[test]
  fn confined_line_claims_its_box() {
    let mut solver = solver(
      "000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    // Confine 5 in row 1 to the first third: the top-left box claims 5,
    // so rows 2 and 3 lose it there, and nowhere else.
    for &loc in Row::new(0).unwrap().locs() {
      if loc.col().get() >= 3 {
        solver.cands[loc].remove(N5);
      }
    }
    solver.strike_confined_lines();
    for &loc in Row::new(1).unwrap().locs() {
      assert_eq!(loc.col().get() >= 3, solver.cands[loc].contains(N5));
    }
    for &loc in Row::new(2).unwrap().locs() {
      assert_eq!(loc.col().get() >= 3, solver.cands[loc].contains(N5));
    }
    for &loc in Row::new(3).unwrap().locs() {
      assert!(solver.cands[loc].contains(N5));
    }
  }

  #[test]
  fn two_lines_sharing_two_sections_block_the_third() {
    let mut solver = solver(
      "000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    // Rows 1 and 2 admit 6 only in their first two thirds; those two
    // boxes must hold both 6s, so row 3's first two thirds lose 6.
    for row in [Row::new(0).unwrap(), Row::new(1).unwrap()] {
      for &loc in row.locs() {
        if loc.col().get() >= 6 {
          solver.cands[loc].remove(N6);
        }
      }
    }
    solver.strike_confined_lines();
    for &loc in Row::new(2).unwrap().locs() {
      assert_eq!(loc.col().get() >= 6, solver.cands[loc].contains(N6));
    }
  }

  #[test]
  fn propagation_is_bounded_by_the_band() {
    // Nine clues: below the productive band, so the loop never runs.
    let mut solver = solver(
      "123456789000000000000000000000000000000000000000000000000000000000000000000000000",
    );
    solver.propagate();
    assert_eq!(9, solver.placed);
  }

  #[test]
  fn brute_force_finishes_what_elimination_starts() {
    let clues = Grid::from_str(
      "000000010400000000020000000000050407008000300001090000300400200050100000000806000",
    )
    .unwrap();
    let solved = FastSolver::new(&clues)
      .unwrap()
      .solve(&CancelToken::new())
      .unwrap();
    assert_eq!(
      "693784512487512936125963874932651487568247391741398625319475268856129743274836159",
      solved.to_string()
    );
  }

  #[test]
  fn cancellation_stops_the_search() {
    let clues = Grid::new();
    let token = CancelToken::new();
    token.cancel();
    assert_eq!(None, FastSolver::new(&clues).unwrap().solve(&token));
  }
}
