use crate::grid::geometry::Geometry;
use crate::grid::topology::Topology;
use bit_vec::BitVec;
use rustc_hash::FxHashSet;

/// The mutable assignment state of a run: one optional value per cell plus a
/// lazily built cache of peer lists.
///
/// Two distinct cells are peers when they share a line or a block of any
/// sheet. A peer list is computed the first time a cell is examined and is
/// never recomputed; only the subset of cells the search actually visits
/// pays for the scan.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    values: Vec<Option<usize>>,
    peers: Vec<Option<Vec<usize>>>,
    peer_sets_built: usize,
}

impl Board {
    #[must_use]
    pub fn new(geom: &Geometry) -> Self {
        let n = geom.cell_count();
        Self {
            width: geom.width,
            values: vec![None; n],
            peers: vec![None; n],
            peer_sets_built: 0,
        }
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn value(&self, cell: usize) -> Option<usize> {
        self.values[cell]
    }

    /// Sets the value of a cell. No consistency check is made here; the
    /// solver only assigns values it has already tested against the peers.
    pub fn assign(&mut self, cell: usize, value: usize) {
        self.values[cell] = Some(value);
    }

    pub fn clear(&mut self, cell: usize) {
        self.values[cell] = None;
    }

    /// The peers of `cell`, computed on first access and cached for the
    /// lifetime of the board. The list is sorted and duplicate-free.
    pub fn peers(&mut self, cell: usize, topo: &Topology) -> &[usize] {
        if self.peers[cell].is_none() {
            self.peers[cell] = Some(collect_peers(cell, topo));
            self.peer_sets_built += 1;
        }
        self.peers[cell].as_deref().unwrap_or_default()
    }

    /// One bit per value in `[0, width)`, set when some assigned peer of
    /// `cell` already holds that value.
    pub fn forbidden_values(&mut self, cell: usize, topo: &Topology) -> BitVec {
        let mut taken = BitVec::from_elem(self.width, false);
        if self.peers[cell].is_none() {
            self.peers[cell] = Some(collect_peers(cell, topo));
            self.peer_sets_built += 1;
        }
        if let Some(peers) = &self.peers[cell] {
            for &peer in peers {
                if let Some(value) = self.values[peer] {
                    taken.set(value, true);
                }
            }
        }
        taken
    }

    /// Whether any assigned cell shares its value with an assigned peer.
    /// Used to reject pre-filled boards that are already inconsistent.
    pub fn has_conflict(&mut self, topo: &Topology) -> bool {
        for cell in 0..self.cell_count() {
            let Some(value) = self.values[cell] else {
                continue;
            };
            let taken = self.forbidden_values(cell, topo);
            if taken[value] {
                return true;
            }
        }
        false
    }

    /// The full assignment, or `None` while any cell is still blank.
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<usize>> {
        self.values.iter().copied().collect()
    }

    /// How many peer lists have been computed so far.
    #[must_use]
    pub const fn peer_sets_built(&self) -> usize {
        self.peer_sets_built
    }
}

/// Scans every line and block of every sheet containing `cell` and unions
/// the other cells found there.
fn collect_peers(cell: usize, topo: &Topology) -> Vec<usize> {
    let mut set = FxHashSet::default();
    for sheet in &topo.sheets {
        for line in &sheet.lines {
            if line.cells.contains(&cell) {
                set.extend(line.cells.iter().copied());
            }
        }
        for block in &sheet.blocks {
            if block.cells.contains(&cell) {
                set.extend(block.cells.iter().copied());
            }
        }
    }
    set.remove(&cell);
    let mut peers: Vec<usize> = set.into_iter().collect();
    peers.sort_unstable();
    peers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_and_topo(dims: usize, root: usize) -> (Geometry, Topology, Board) {
        let geom = Geometry::new(dims, root);
        let topo = Topology::build(&geom);
        let board = Board::new(&geom);
        (geom, topo, board)
    }

    #[test]
    fn test_assign_and_clear() {
        let (_, _, mut board) = board_and_topo(2, 2);
        assert_eq!(board.value(5), None);
        board.assign(5, 3);
        assert_eq!(board.value(5), Some(3));
        board.clear(5);
        assert_eq!(board.value(5), None);
    }

    #[test]
    fn test_peer_count_classic_grid() {
        // In a flat sudoku every cell sees width-1 row cells, width-1 column
        // cells, and the block adds (box_side - 1)^2 more.
        let (geom, topo, mut board) = board_and_topo(2, 3);
        for cell in 0..geom.cell_count() {
            assert_eq!(board.peers(cell, &topo).len(), 20);
        }
    }

    #[test]
    fn test_peer_relation_is_symmetric() {
        let (geom, topo, mut board) = board_and_topo(3, 2);
        let n = geom.cell_count();
        let peer_lists: Vec<Vec<usize>> = (0..n)
            .map(|cell| board.peers(cell, &topo).to_vec())
            .collect();
        for i in 0..n {
            for &j in &peer_lists[i] {
                assert!(peer_lists[j].contains(&i), "{j} has peer {i} one way only");
            }
        }
    }

    #[test]
    fn test_cells_sharing_a_line_or_block_are_peers() {
        let (_, topo, mut board) = board_and_topo(2, 2);
        for sheet in &topo.sheets {
            for line in &sheet.lines {
                for &a in &line.cells {
                    for &b in &line.cells {
                        if a != b {
                            assert!(board.peers(a, &topo).contains(&b));
                        }
                    }
                }
            }
            for block in &sheet.blocks {
                for &a in &block.cells {
                    for &b in &block.cells {
                        if a != b {
                            assert!(board.peers(a, &topo).contains(&b));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_peer_cache_is_computed_once() {
        let (_, topo, mut board) = board_and_topo(2, 2);
        board.peers(0, &topo);
        board.peers(0, &topo);
        board.peers(1, &topo);
        assert_eq!(board.peer_sets_built(), 2);
    }

    #[test]
    fn test_forbidden_values_reflect_assigned_peers() {
        let (_, topo, mut board) = board_and_topo(2, 2);
        // Cells 0 and 1 share the first row.
        board.assign(1, 2);
        let taken = board.forbidden_values(0, &topo);
        assert!(taken[2]);
        assert!(!taken[0]);
        assert!(!taken[1]);
        assert!(!taken[3]);
    }

    #[test]
    fn test_has_conflict_detects_equal_peers() {
        let (_, topo, mut board) = board_and_topo(2, 2);
        board.assign(0, 1);
        assert!(!board.has_conflict(&topo));
        board.assign(1, 1);
        assert!(board.has_conflict(&topo));
        board.clear(1);
        assert!(!board.has_conflict(&topo));
    }

    #[test]
    fn test_width_one_has_no_peers() {
        let (geom, topo, mut board) = board_and_topo(3, 1);
        assert_eq!(geom.cell_count(), 1);
        assert!(board.peers(0, &topo).is_empty());
    }

    #[test]
    fn test_snapshot_requires_a_full_board() {
        let (geom, _, mut board) = board_and_topo(2, 1);
        assert_eq!(board.snapshot(), None);
        for cell in 0..geom.cell_count() {
            board.assign(cell, 0);
        }
        assert_eq!(board.snapshot(), Some(vec![0]));
    }
}
