use smallvec::SmallVec;

/// A coordinate: one value in `[0, width)` per axis.
pub type Coord = SmallVec<[usize; 4]>;

/// The immutable shape of a run: `dims` axes, each `width` cells long,
/// with `width = box_side * box_side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub dims: usize,
    pub width: usize,
    pub box_side: usize,
}

impl Geometry {
    /// Builds a geometry from the dimension count and the square root of the
    /// board width. Callers validate `dims >= 2` and `root >= 1`.
    #[must_use]
    pub const fn new(dims: usize, root: usize) -> Self {
        Self {
            dims,
            width: root * root,
            box_side: root,
        }
    }

    /// Total number of cells, `width^dims`.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width.pow(u32::try_from(self.dims).expect("dimension count overflowed u32"))
    }

    /// Encodes a coordinate as a linear cell index in mixed-radix base
    /// `width`: axis 0 is the least significant digit.
    #[must_use]
    pub fn cell_index(&self, coord: &[usize]) -> usize {
        debug_assert_eq!(coord.len(), self.dims);
        coord.iter().rev().fold(0, |acc, &c| acc * self.width + c)
    }

    /// Decodes a linear cell index back into a coordinate. Inverse of
    /// [`Self::cell_index`].
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Coord {
        let mut coord = Coord::with_capacity(self.dims);
        let mut rest = index;
        for _ in 0..self.dims {
            coord.push(rest % self.width);
            rest /= self.width;
        }
        coord
    }
}
