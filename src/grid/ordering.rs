//! Cell visitation orders for the backtracking search.
//!
//! Two strategies are available: a uniformly random permutation of the cell
//! indices, and a deterministic order that starts at the all-zero corner and
//! expands outward in shells of increasing L1 distance. Either way the
//! produced sequence names every cell exactly once; the solver consumes it
//! front to back.

use crate::grid::geometry::{Coord, Geometry};
use bit_vec::BitVec;

/// How the solver walks the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// A uniformly random permutation of all cell indices.
    Random,
    /// Shells of ascending distance from the all-zero corner.
    #[default]
    Distance,
}

/// Produces the visitation sequence for `strategy`. The first element is
/// the first cell the solver assigns.
///
/// # Panics
///
/// Panics if the produced sequence misses or repeats a cell index. That
/// means the shell enumeration is wrong and nothing downstream can be
/// trusted.
#[must_use]
pub fn solve_order(geom: &Geometry, strategy: Strategy, seed: Option<u64>) -> Vec<usize> {
    let order = match strategy {
        Strategy::Random => random_order(geom, seed),
        Strategy::Distance => distance_order(geom),
    };
    assert_permutation(geom, &order);
    order
}

fn random_order(geom: &Geometry, seed: Option<u64>) -> Vec<usize> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let mut order: Vec<usize> = (0..geom.cell_count()).collect();
    rng.shuffle(&mut order);
    order
}

/// Groups cells by the sum of their coordinates, ascending, so the search
/// starts at the origin and works outward one shell at a time. Within a
/// shell cells appear in lexicographic coordinate order, which keeps the
/// sequence reproducible.
fn distance_order(geom: &Geometry) -> Vec<usize> {
    let mut order = Vec::with_capacity(geom.cell_count());
    let max_distance = geom.dims * (geom.width - 1);
    let mut prefix = Coord::with_capacity(geom.dims);
    for distance in 0..=max_distance {
        push_shell(geom, distance, &mut prefix, &mut order);
    }
    order
}

/// Extends `prefix` with every choice for the next axis that can still sum
/// to `remaining`, recursing until all axes are placed.
fn push_shell(geom: &Geometry, remaining: usize, prefix: &mut Coord, out: &mut Vec<usize>) {
    if prefix.len() == geom.dims - 1 {
        if remaining < geom.width {
            prefix.push(remaining);
            out.push(geom.cell_index(prefix));
            prefix.pop();
        }
        return;
    }
    for value in 0..=remaining.min(geom.width - 1) {
        prefix.push(value);
        push_shell(geom, remaining - value, prefix, out);
        prefix.pop();
    }
}

fn assert_permutation(geom: &Geometry, order: &[usize]) {
    let n = geom.cell_count();
    assert_eq!(order.len(), n, "solve order names {} cells, expected {n}", order.len());
    let mut seen = BitVec::from_elem(n, false);
    for &cell in order {
        assert!(!seen[cell], "cell {cell} appears twice in the solve order");
        seen.set(cell, true);
    }
}
