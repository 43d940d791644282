//! Border trimming.
//!
//! Each selected edge walks inward while its whole line of cells equals
//! the blank byte. Edges are evaluated independently of each other, so
//! an all-blank canvas trimmed from both sides of an axis ends up with
//! zero rows or columns on that axis.

use super::canvas::Canvas;
use bitflags::bitflags;

bitflags! {
    /// Edges a trim is allowed to move.
    ///
    /// # Example
    /// ```
    /// use flywheel_canvas::Edges;
    /// let vertical = Edges::TOP | Edges::BOTTOM;
    /// assert!(!vertical.contains(Edges::LEFT));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Edges: u8 {
        /// Top row edge.
        const TOP = 0b0001;
        /// Bottom row edge.
        const BOTTOM = 0b0010;
        /// Left column edge.
        const LEFT = 0b0100;
        /// Right column edge.
        const RIGHT = 0b1000;
    }
}

impl Edges {
    /// Build an edge set from four independent switches.
    pub fn from_flags(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        let mut edges = Self::empty();
        edges.set(Self::TOP, top);
        edges.set(Self::BOTTOM, bottom);
        edges.set(Self::LEFT, left);
        edges.set(Self::RIGHT, right);
        edges
    }
}

/// Half-open spans a trim keeps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TrimBounds {
    /// First kept row.
    pub top: usize,
    /// One past the last kept row.
    pub bottom: usize,
    /// First kept column.
    pub left: usize,
    /// One past the last kept column.
    pub right: usize,
}

impl TrimBounds {
    /// Rows kept (zero when the row edges crossed).
    pub const fn num_rows(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    /// Columns kept (zero when the column edges crossed).
    pub const fn num_cols(&self) -> usize {
        self.right.saturating_sub(self.left)
    }
}

impl Canvas {
    fn row_is_blank(&self, row: usize, blank: u8) -> bool {
        self.row(row).is_some_and(|cells| cells.iter().all(|&b| b == blank))
    }

    fn col_is_blank(&self, col: usize, blank: u8) -> bool {
        self.rows().all(|cells| cells[col] == blank)
    }

    /// Compute the spans [`Canvas::trim`] would keep.
    pub fn trim_bounds(&self, blank: u8, edges: Edges) -> TrimBounds {
        let (rows, cols) = (self.num_rows(), self.num_cols());

        let mut top = 0;
        if edges.contains(Edges::TOP) {
            while top < rows && self.row_is_blank(top, blank) {
                top += 1;
            }
        }

        let mut bottom = rows;
        if edges.contains(Edges::BOTTOM) {
            while bottom > 0 && self.row_is_blank(bottom - 1, blank) {
                bottom -= 1;
            }
        }

        let mut left = 0;
        if edges.contains(Edges::LEFT) {
            while left < cols && self.col_is_blank(left, blank) {
                left += 1;
            }
        }

        let mut right = cols;
        if edges.contains(Edges::RIGHT) {
            while right > 0 && self.col_is_blank(right - 1, blank) {
                right -= 1;
            }
        }

        TrimBounds { top, bottom, left, right }
    }

    /// Strip blank border rows and columns from the selected edges.
    ///
    /// Returns a new canvas. Trimming everything away on an axis yields
    /// zero rows or columns rather than an error.
    pub fn trim(&self, blank: u8, edges: Edges) -> Self {
        let b = self.trim_bounds(blank, edges);
        self.extract_span(b.top, b.bottom, b.left, b.right)
    }
}
