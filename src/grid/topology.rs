//! Enumeration of the constraint topology: every 2-D sheet of the board,
//! together with the lines and blocks it owns.
//!
//! A sheet is a choice of two free axes plus a fixed coordinate on every
//! other axis. For two dimensions there is exactly one sheet and nothing to
//! fix; for more, every unordered axis pair combined with every assignment
//! of the remaining coordinates yields its own sheet, so the board carries
//! `C(dims, 2) * width^(dims - 2)` of them. Each sheet contains the full set
//! of sudoku constraints for its slice: `2 * width` lines (one per row and
//! one per column of the slice) and `width` blocks (the `box_side`-sized
//! tiling of the slice).
//!
//! The topology is built once per run and is read-only afterwards.

use crate::grid::geometry::{Coord, Geometry};
use itertools::Itertools;

/// A run of `width` cells varying along a single axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The axis the cells vary along.
    pub axis: usize,
    /// Resolved cell indices, in ascending coordinate order along `axis`.
    pub cells: Vec<usize>,
}

impl Line {
    fn new(geom: &Geometry, axis: usize, base: &Coord) -> Self {
        let mut coord = base.clone();
        let cells = (0..geom.width)
            .map(|i| {
                coord[axis] = i;
                geom.cell_index(&coord)
            })
            .collect();
        Self { axis, cells }
    }
}

/// A `box_side` x `box_side` tile of cells within a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Resolved cell indices of the tile.
    pub cells: Vec<usize>,
}

impl Block {
    fn new(geom: &Geometry, axis1: usize, corner1: usize, axis2: usize, corner2: usize, base: &Coord) -> Self {
        let mut coord = base.clone();
        let mut cells = Vec::with_capacity(geom.width);
        for x in corner1..corner1 + geom.box_side {
            coord[axis1] = x;
            for y in corner2..corner2 + geom.box_side {
                coord[axis2] = y;
                cells.push(geom.cell_index(&coord));
            }
        }
        Self { cells }
    }
}

/// A 2-D slice of the board with its own full set of sudoku constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub axis1: usize,
    pub axis2: usize,
    /// `(axis, value)` pairs locating this sheet on every other axis.
    /// Empty for two-dimensional boards.
    pub fixed: Vec<(usize, usize)>,
    pub lines: Vec<Line>,
    pub blocks: Vec<Block>,
}

impl Sheet {
    fn new(geom: &Geometry, axis1: usize, axis2: usize, fixed: Vec<(usize, usize)>) -> Self {
        let mut base: Coord = std::iter::repeat_n(0, geom.dims).collect();
        for &(axis, value) in &fixed {
            base[axis] = value;
        }

        let mut lines = Vec::with_capacity(2 * geom.width);
        for i in 0..geom.width {
            let mut row_base = base.clone();
            row_base[axis2] = i;
            lines.push(Line::new(geom, axis1, &row_base));

            let mut col_base = base.clone();
            col_base[axis1] = i;
            lines.push(Line::new(geom, axis2, &col_base));
        }

        let mut blocks = Vec::with_capacity(geom.width);
        for corner1 in (0..geom.width).step_by(geom.box_side) {
            for corner2 in (0..geom.width).step_by(geom.box_side) {
                blocks.push(Block::new(geom, axis1, corner1, axis2, corner2, &base));
            }
        }

        Self {
            axis1,
            axis2,
            fixed,
            lines,
            blocks,
        }
    }

    /// The cell index at `(col, row)` of this sheet, `col` along `axis1` and
    /// `row` along `axis2`.
    #[must_use]
    pub fn cell_at(&self, col: usize, row: usize) -> usize {
        // Lines alternate axis1/axis2; row lines sit at the even offsets.
        self.lines[2 * row].cells[col]
    }
}

/// The full constraint topology for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub sheets: Vec<Sheet>,
}

impl Topology {
    /// Enumerates every sheet of the board.
    ///
    /// # Panics
    ///
    /// Panics if the enumeration produces the wrong number of sheets. A
    /// miscount means the combinatorics are wrong, which is not recoverable.
    #[must_use]
    pub fn build(geom: &Geometry) -> Self {
        let mut sheets = Vec::new();

        if geom.dims == 2 {
            sheets.push(Sheet::new(geom, 0, 1, Vec::new()));
        } else {
            for free in (0..geom.dims).combinations(2) {
                let fixed_axes: Vec<usize> =
                    (0..geom.dims).filter(|a| !free.contains(a)).collect();
                for values in fixed_axes
                    .iter()
                    .map(|_| 0..geom.width)
                    .multi_cartesian_product()
                {
                    let fixed = fixed_axes.iter().copied().zip(values).collect();
                    sheets.push(Sheet::new(geom, free[0], free[1], fixed));
                }
            }
        }

        let expected = expected_sheet_count(geom);
        assert_eq!(
            sheets.len(),
            expected,
            "sheet enumeration produced {} sheets, expected {expected}",
            sheets.len()
        );

        Self { sheets }
    }
}

/// `C(dims, 2) * width^(dims - 2)` sheets, which degenerates to 1 for two
/// dimensions.
fn expected_sheet_count(geom: &Geometry) -> usize {
    let pairs = geom.dims * (geom.dims - 1) / 2;
    pairs * geom.width.pow(u32::try_from(geom.dims - 2).expect("dimension count overflowed u32"))
}
