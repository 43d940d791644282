//! Region: An inclusive rectangle of canvas cells.

/// A rectangle described by two inclusive corner cells.
///
/// The corners may be given in any order; [`Region::top`],
/// [`Region::left`] and friends always report the normalized edges.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    /// Row of the first corner.
    pub row1: usize,
    /// Column of the first corner.
    pub col1: usize,
    /// Row of the second corner.
    pub row2: usize,
    /// Column of the second corner.
    pub col2: usize,
}

impl Region {
    /// Create a region from two corners.
    #[inline]
    pub const fn new(row1: usize, col1: usize, row2: usize, col2: usize) -> Self {
        Self { row1, col1, row2, col2 }
    }

    /// Create a region covering a whole `num_rows x num_cols` grid.
    ///
    /// Returns `None` for a grid with no cells, which no inclusive
    /// region can describe.
    #[inline]
    pub const fn full(num_rows: usize, num_cols: usize) -> Option<Self> {
        if num_rows == 0 || num_cols == 0 {
            None
        } else {
            Some(Self::new(0, 0, num_rows - 1, num_cols - 1))
        }
    }

    /// Top row (inclusive).
    #[inline]
    pub const fn top(&self) -> usize {
        if self.row1 < self.row2 { self.row1 } else { self.row2 }
    }

    /// Bottom row (inclusive).
    #[inline]
    pub const fn bottom(&self) -> usize {
        if self.row1 > self.row2 { self.row1 } else { self.row2 }
    }

    /// Left column (inclusive).
    #[inline]
    pub const fn left(&self) -> usize {
        if self.col1 < self.col2 { self.col1 } else { self.col2 }
    }

    /// Right column (inclusive).
    #[inline]
    pub const fn right(&self) -> usize {
        if self.col1 > self.col2 { self.col1 } else { self.col2 }
    }

    /// Number of rows covered.
    #[inline]
    pub const fn num_rows(&self) -> usize {
        self.bottom() - self.top() + 1
    }

    /// Number of columns covered.
    #[inline]
    pub const fn num_cols(&self) -> usize {
        self.right() - self.left() + 1
    }

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> usize {
        self.num_rows() * self.num_cols()
    }

    /// The same region with corners ordered top-left, bottom-right.
    #[inline]
    #[must_use]
    pub const fn normalized(&self) -> Self {
        Self::new(self.top(), self.left(), self.bottom(), self.right())
    }

    /// Check if a cell is inside the region.
    #[inline]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.top() && row <= self.bottom() && col >= self.left() && col <= self.right()
    }

    /// Check if the whole region fits inside a `num_rows x num_cols` grid.
    #[inline]
    pub const fn fits_in(&self, num_rows: usize, num_cols: usize) -> bool {
        self.bottom() < num_rows && self.right() < num_cols
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Region(({}, {})..=({}, {}))",
            self.row1, self.col1, self.row2, self.col2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_normalizes_corners() {
        let region = Region::new(2, 3, 0, 1);
        assert_eq!(region.top(), 0);
        assert_eq!(region.bottom(), 2);
        assert_eq!(region.left(), 1);
        assert_eq!(region.right(), 3);
        assert_eq!(region.num_rows(), 3);
        assert_eq!(region.num_cols(), 3);
        assert_eq!(region.normalized(), Region::new(0, 1, 2, 3));
    }

    #[test]
    fn test_region_single_cell() {
        let region = Region::new(4, 4, 4, 4);
        assert_eq!(region.area(), 1);
        assert!(region.contains(4, 4));
        assert!(!region.contains(4, 5));
    }

    #[test]
    fn test_region_full_and_fits() {
        let full = Region::full(3, 2).unwrap();
        assert_eq!(full, Region::new(0, 0, 2, 1));
        assert!(full.fits_in(3, 2));
        assert!(!full.fits_in(2, 2));
        assert!(!full.fits_in(3, 1));
        assert_eq!(Region::full(0, 2), None);
    }

    #[test]
    fn test_region_debug() {
        assert_eq!(format!("{:?}", Region::new(0, 1, 2, 3)), "Region((0, 1)..=(2, 3))");
    }
}
