//! Text rendering of a sheet: a padded grid with `|`, `-` and `+`
//! separators at block boundaries, headed by the axes the sheet spans and
//! the coordinates that locate it.

use crate::grid::board::Board;
use crate::grid::geometry::Geometry;
use crate::grid::topology::Sheet;
use std::fmt::Write;

/// Renders one sheet of the board. Cells the run left blank print as `.`.
#[must_use]
pub fn sheet_to_string(geom: &Geometry, sheet: &Sheet, board: &Board) -> String {
    let pad = geom.width.to_string().len();
    let mut out = header(sheet);
    out.push('\n');

    for row in 0..geom.width {
        if row > 0 && row % geom.box_side == 0 {
            out.push_str(&separator_line(geom, pad));
            out.push('\n');
        }
        for col in 0..geom.width {
            if col > 0 && col % geom.box_side == 0 {
                out.push_str(" |");
            }
            match board.value(sheet.cell_at(col, row)) {
                Some(value) => {
                    let _ = write!(out, " {value:>pad$}");
                }
                None => {
                    let _ = write!(out, " {:>pad$}", ".");
                }
            }
        }
        out.push('\n');
    }
    out
}

fn header(sheet: &Sheet) -> String {
    let mut out = format!("↑{} →{}", sheet.axis1, sheet.axis2);
    for &(axis, value) in &sheet.fixed {
        let _ = write!(out, "  axis {axis} = {value}");
    }
    out
}

fn separator_line(geom: &Geometry, pad: usize) -> String {
    let mut out = String::new();
    for col in 0..geom.width {
        if col > 0 && col % geom.box_side == 0 {
            out.push_str("-+");
        }
        out.push_str(&"-".repeat(1 + pad));
    }
    out
}
