//! The exhaustive backtracking search.
//!
//! The solver walks the cells in the order produced by
//! [`crate::grid::ordering`], held as a stack it pops one cell at a time.
//! At each cell the candidate values are `[0, width)` minus whatever the
//! assigned peers already hold, tried in ascending order. A candidate is
//! written into the board tentatively; if the rest of the stack can be
//! completed the whole search succeeds, otherwise the popped cell is pushed
//! back, the assignment is undone, and the next candidate is tried. A cell
//! that runs out of candidates reports failure to its caller, which is the
//! backtrack.
//!
//! There is no propagation, no look-ahead, and no reordering of candidates:
//! correctness rests entirely on the peer check, so a failed search is a
//! proof that no assignment exists, whatever order the cells were visited
//! in. Recursion depth equals the number of blank cells, which is fine for
//! the board sizes the binary accepts.

use crate::grid::board::Board;
use crate::grid::geometry::Geometry;
use crate::grid::topology::Topology;

/// The result of a run: either a value for every cell, indexed by cell
/// index, or proof that no consistent assignment exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Vec<usize>),
    Exhausted,
}

impl Outcome {
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Counters accumulated over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tentative assignments made.
    pub decisions: usize,
    /// Cells whose candidates were exhausted, forcing the caller to retry.
    pub backtracks: usize,
}

/// One search over one board. Borrows the topology read-only and the board
/// exclusively; all search state lives here rather than in any shared
/// context.
#[derive(Debug)]
pub struct Solver<'a> {
    geom: Geometry,
    topo: &'a Topology,
    board: &'a mut Board,
    stats: SearchStats,
}

impl<'a> Solver<'a> {
    pub fn new(geom: Geometry, topo: &'a Topology, board: &'a mut Board) -> Self {
        Self {
            geom,
            topo,
            board,
            stats: SearchStats::default(),
        }
    }

    /// Runs the search over `order`, mutating the board in place.
    ///
    /// Pre-assigned cells keep their values and are skipped; a board whose
    /// givens already conflict is rejected immediately. On success every
    /// cell holds a value and the full assignment is returned.
    pub fn solve(&mut self, order: &[usize]) -> Outcome {
        if self.board.has_conflict(self.topo) {
            return Outcome::Exhausted;
        }

        // The stack pops the first cell of the visitation order first.
        let mut stack: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&cell| self.board.value(cell).is_none())
            .rev()
            .collect();

        let solved = match stack.pop() {
            None => true,
            Some(first) => self.solve_cell(first, &mut stack),
        };

        if solved {
            let assignment = self
                .board
                .snapshot()
                .expect("search succeeded with a blank cell left on the board");
            Outcome::Solved(assignment)
        } else {
            Outcome::Exhausted
        }
    }

    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Tries every candidate for `cell`, recursing into the rest of the
    /// stack after each tentative assignment. Exactly one element is popped
    /// per level and pushed back before the next candidate, so the stack is
    /// fully restored on every failure path.
    fn solve_cell(&mut self, cell: usize, rest: &mut Vec<usize>) -> bool {
        let taken = self.board.forbidden_values(cell, self.topo);

        for value in 0..self.geom.width {
            if taken[value] {
                continue;
            }
            self.board.assign(cell, value);
            self.stats.decisions += 1;

            match rest.pop() {
                None => return true,
                Some(next) => {
                    if self.solve_cell(next, rest) {
                        return true;
                    }
                    rest.push(next);
                }
            }
        }

        self.board.clear(cell);
        self.stats.backtracks += 1;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ordering::{self, Strategy};

    fn setup(dims: usize, root: usize) -> (Geometry, Topology, Board) {
        let geom = Geometry::new(dims, root);
        let topo = Topology::build(&geom);
        let board = Board::new(&geom);
        (geom, topo, board)
    }

    /// Every line and block of every sheet must hold each value exactly once.
    fn assert_valid(geom: &Geometry, topo: &Topology, assignment: &[usize]) {
        assert_eq!(assignment.len(), geom.cell_count());
        assert!(assignment.iter().all(|&v| v < geom.width));
        for sheet in &topo.sheets {
            for line in &sheet.lines {
                let mut values: Vec<usize> = line.cells.iter().map(|&c| assignment[c]).collect();
                values.sort_unstable();
                assert_eq!(values, (0..geom.width).collect::<Vec<_>>());
            }
            for block in &sheet.blocks {
                let mut values: Vec<usize> = block.cells.iter().map(|&c| assignment[c]).collect();
                values.sort_unstable();
                assert_eq!(values, (0..geom.width).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_solves_a_blank_four_by_four() {
        let (geom, topo, mut board) = setup(2, 2);
        let order = ordering::solve_order(&geom, Strategy::Distance, None);
        let mut solver = Solver::new(geom, &topo, &mut board);
        match solver.solve(&order) {
            Outcome::Solved(assignment) => assert_valid(&geom, &topo, &assignment),
            Outcome::Exhausted => panic!("blank board reported as unsolvable"),
        }
    }

    #[test]
    fn test_solves_a_blank_cube() {
        // Three dimensions, width 4: 64 cells constrained across 12 sheets.
        let (geom, topo, mut board) = setup(3, 2);
        let order = ordering::solve_order(&geom, Strategy::Distance, None);
        let mut solver = Solver::new(geom, &topo, &mut board);
        match solver.solve(&order) {
            Outcome::Solved(assignment) => assert_valid(&geom, &topo, &assignment),
            Outcome::Exhausted => panic!("blank board reported as unsolvable"),
        }
    }

    #[test]
    fn test_solves_with_a_random_order() {
        let (geom, topo, mut board) = setup(2, 2);
        let order = ordering::solve_order(&geom, Strategy::Random, Some(1));
        let mut solver = Solver::new(geom, &topo, &mut board);
        assert!(solver.solve(&order).is_solved());
    }

    #[test]
    fn test_width_one_succeeds_without_branching() {
        let (geom, topo, mut board) = setup(3, 1);
        let order = ordering::solve_order(&geom, Strategy::Distance, None);
        let mut solver = Solver::new(geom, &topo, &mut board);
        assert_eq!(solver.solve(&order), Outcome::Solved(vec![0]));
        assert_eq!(solver.stats().backtracks, 0);
    }

    #[test]
    fn test_givens_survive_the_search() {
        let (geom, topo, mut board) = setup(2, 2);
        board.assign(0, 3);
        board.assign(5, 1);
        let order = ordering::solve_order(&geom, Strategy::Distance, None);
        let mut solver = Solver::new(geom, &topo, &mut board);
        match solver.solve(&order) {
            Outcome::Solved(assignment) => {
                assert_eq!(assignment[0], 3);
                assert_eq!(assignment[5], 1);
                assert_valid(&geom, &topo, &assignment);
            }
            Outcome::Exhausted => panic!("satisfiable givens reported as unsolvable"),
        }
    }

    #[test]
    fn test_conflicting_givens_are_exhausted() {
        // Cells 0 and 1 share the first row, so equal givens cannot stand.
        let (geom, topo, mut board) = setup(2, 2);
        board.assign(0, 2);
        board.assign(1, 2);
        let order = ordering::solve_order(&geom, Strategy::Distance, None);
        let mut solver = Solver::new(geom, &topo, &mut board);
        assert_eq!(solver.solve(&order), Outcome::Exhausted);
    }

    #[test]
    fn test_fully_given_board_is_checked_not_searched() {
        let (geom, topo, mut board) = setup(2, 1);
        board.assign(0, 0);
        let order = ordering::solve_order(&geom, Strategy::Distance, None);
        let mut solver = Solver::new(geom, &topo, &mut board);
        assert_eq!(solver.solve(&order), Outcome::Solved(vec![0]));
        assert_eq!(solver.stats().decisions, 0);
    }
}
