//! Defines the core presto-doku types.
//!
//! Among these are:
//!
//! - Grid: the 9x9 Sudoku board
//! - Num: the 9 numerals that go in the grid's squares, and NumSet, the
//!   per-cell candidate mask
//! - Loc: the 81 locations of the grid
//! - Row, Col, Blk and Band, the subdivisions of the grid
//! - CellGrid: the annotated per-cell view model rendered by hosts

mod asgmt;
pub mod bits;
mod cell;
mod grid;
mod id_types;
mod loc;
mod num;
mod set;
mod units;

pub use asgmt::*;
pub use cell::*;
pub use grid::*;
pub use loc::*;
pub use num::*;
pub use set::Set;
pub use units::*;

/// Marker error for Sudoku grids that contradict the one-per-unit rule.
#[derive(Debug)]
pub struct Invalid;
