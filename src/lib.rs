//! This crate solves sudoku generalised to any number of dimensions by
//! exhaustive backtracking over a board of `width^dims` cells.

/// The `grid` module holds the board geometry, the constraint topology, the
/// cell visitation orders, and the backtracking search itself.
pub mod grid;

/// The `render` module turns solved sheets into printable text grids.
pub mod render;
