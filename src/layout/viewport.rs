//! Viewport: A scrolled window over a canvas.
//!
//! The viewport only does geometry. A renderer asks it which canvas cell
//! belongs at each window position and paints the answer however it
//! likes. Window cells that fall past the canvas edge report
//! [`PADDING`].

use crate::canvas::Canvas;

/// Byte reported for window cells beyond the canvas edge.
pub const PADDING: u8 = b'X';

/// A window of `height x width` cells whose top-left corner sits at
/// canvas cell `(row, col)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Viewport {
    /// Canvas row shown in the window's first row.
    pub row: usize,
    /// Canvas column shown in the window's first column.
    pub col: usize,
    /// Window height in rows.
    pub height: usize,
    /// Window width in columns.
    pub width: usize,
}

impl Viewport {
    /// Create a window at the canvas origin.
    pub const fn new(height: usize, width: usize) -> Self {
        Self { row: 0, col: 0, height, width }
    }

    /// Set the scroll origin.
    #[must_use]
    pub const fn with_origin(mut self, row: usize, col: usize) -> Self {
        self.row = row;
        self.col = col;
        self
    }

    /// Change the window size, keeping the origin.
    pub const fn resize(&mut self, height: usize, width: usize) {
        self.height = height;
        self.width = width;
    }

    /// Number of window `(rows, cols)` that show canvas content.
    ///
    /// The rest of the window is padding.
    pub const fn visible_extent(&self, canvas: &Canvas) -> (usize, usize) {
        let rows = canvas.num_rows().saturating_sub(self.row);
        let cols = canvas.num_cols().saturating_sub(self.col);
        (
            if rows < self.height { rows } else { self.height },
            if cols < self.width { cols } else { self.width },
        )
    }

    /// Map a window position to a canvas coordinate.
    ///
    /// Returns `None` outside the window. The result may still lie past
    /// the canvas edge.
    pub const fn to_canvas(&self, win_row: usize, win_col: usize) -> Option<(usize, usize)> {
        if win_row < self.height && win_col < self.width {
            Some((self.row.saturating_add(win_row), self.col.saturating_add(win_col)))
        } else {
            None
        }
    }

    /// The byte to show at a window position.
    ///
    /// Returns `None` outside the window.
    pub fn cell_at(&self, canvas: &Canvas, win_row: usize, win_col: usize) -> Option<u8> {
        let (row, col) = self.to_canvas(win_row, win_col)?;
        Some(canvas.get(row, col).unwrap_or(PADDING))
    }

    /// One full window row, padded to `width`.
    pub fn line(&self, canvas: &Canvas, win_row: usize) -> Option<Vec<u8>> {
        if win_row >= self.height {
            return None;
        }
        let mut line = vec![PADDING; self.width];
        if let Some(src) = canvas.row(self.row.saturating_add(win_row)) {
            let start = self.col.min(src.len());
            let end = self.col.saturating_add(self.width).min(src.len());
            line[..end - start].copy_from_slice(&src[start..end]);
        }
        Some(line)
    }

    /// Move the origin by a signed delta.
    ///
    /// The origin is clamped so the window never starts past the point
    /// where it would show more padding than necessary.
    pub fn scroll_by(&mut self, d_row: isize, d_col: isize, canvas: &Canvas) {
        let max_row = canvas.num_rows().saturating_sub(self.height);
        let max_col = canvas.num_cols().saturating_sub(self.width);
        self.row = self.row.saturating_add_signed(d_row).min(max_row);
        self.col = self.col.saturating_add_signed(d_col).min(max_col);
    }
}
