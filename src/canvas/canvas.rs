//! Canvas: A fixed-size grid of single-byte character cells.
//!
//! Cells live in one contiguous `Vec<u8>` in row-major order, so the
//! flattened index of `(row, col)` is `row * num_cols + col` with no
//! padding between rows. Dimensions are fixed at construction; a
//! different size means a new canvas.

use super::error::{CanvasError, Position, Result};

/// The byte used for blank cells.
pub const BLANK: u8 = b' ';

/// A grid of single-byte character cells.
///
/// Equality (`==`) holds when both dimensions match and every cell at
/// the same coordinate is identical. Canvases of different dimensions
/// are never equal, even if their flat contents coincide. `clone()`
/// produces an independent copy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Canvas {
    /// Contiguous cell storage (row-major order).
    cells: Vec<u8>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl Canvas {
    /// Create a new canvas with every cell set to `0`.
    ///
    /// Either dimension may be zero, in which case the canvas holds no
    /// cells and every bounds check fails.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self::filled(num_rows, num_cols, 0)
    }

    /// Create a new canvas with every cell set to [`BLANK`].
    pub fn blank(num_rows: usize, num_cols: usize) -> Self {
        Self::filled(num_rows, num_cols, BLANK)
    }

    /// Create a new canvas with every cell set to `value`.
    pub fn filled(num_rows: usize, num_cols: usize, value: u8) -> Self {
        Self {
            cells: vec![value; num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Create a zero-filled canvas and load it from `source`.
    ///
    /// See [`Canvas::load_from_sequence`].
    pub fn from_bytes(num_rows: usize, num_cols: usize, source: &[u8]) -> Self {
        let mut canvas = Self::new(num_rows, num_cols);
        canvas.load_from_sequence(source);
        canvas
    }

    /// Get the number of rows.
    #[inline]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Get the number of columns.
    #[inline]
    pub const fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the canvas has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the underlying cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Check if `row` is a valid row.
    #[inline]
    pub fn is_in_bounds_row(&self, row: i64) -> bool {
        usize::try_from(row).is_ok_and(|r| r < self.num_rows)
    }

    /// Check if `col` is a valid column.
    #[inline]
    pub fn is_in_bounds_col(&self, col: i64) -> bool {
        usize::try_from(col).is_ok_and(|c| c < self.num_cols)
    }

    /// Check if `(row, col)` addresses a cell.
    #[inline]
    pub fn is_in_bounds(&self, row: i64, col: i64) -> bool {
        self.is_in_bounds_row(row) && self.is_in_bounds_col(col)
    }

    /// Check if `index` addresses a cell.
    #[inline]
    pub fn is_in_bounds_index(&self, index: i64) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.cells.len())
    }

    /// Convert `(row, col)` to a flattened index.
    ///
    /// Returns `None` if the coordinate is out of bounds.
    #[inline]
    pub const fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.num_rows && col < self.num_cols {
            Some(row * self.num_cols + col)
        } else {
            None
        }
    }

    /// Convert a flattened index to `(row, col)`.
    #[inline]
    pub fn coords_of(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.cells.len() {
            Some((index / self.num_cols, index % self.num_cols))
        } else {
            None
        }
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        self.index_of(row, col).ok_or(CanvasError::OutOfBounds {
            at: Position::Cell { row, col },
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    const fn checked_flat(&self, index: usize) -> Result<usize> {
        if index < self.cells.len() {
            Ok(index)
        } else {
            Err(CanvasError::OutOfBounds {
                at: Position::Index(index),
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            })
        }
    }

    /// Read the cell at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        self.checked_index(row, col).map(|i| self.cells[i])
    }

    /// Read the cell at a flattened index.
    #[inline]
    pub fn get_index(&self, index: usize) -> Result<u8> {
        self.checked_flat(index).map(|i| self.cells[i])
    }

    /// Write the cell at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        let i = self.checked_index(row, col)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Write the cell at a flattened index.
    #[inline]
    pub fn set_index(&mut self, index: usize, value: u8) -> Result<()> {
        let i = self.checked_flat(index)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: u8) {
        self.cells.fill(value);
    }

    /// Load cells from `source` in row-major order, starting at index 0.
    ///
    /// Stops at whichever runs out first, the source or the canvas.
    /// Source bytes past the canvas capacity are dropped. Returns the
    /// number of cells written.
    pub fn load_from_sequence(&mut self, source: &[u8]) -> usize {
        let n = source.len().min(self.cells.len());
        self.cells[..n].copy_from_slice(&source[..n]);
        n
    }

    /// Get one row of cells.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row < self.num_rows {
            let start = row * self.num_cols;
            Some(&self.cells[start..start + self.num_cols])
        } else {
            None
        }
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.num_rows).filter_map(move |r| self.row(r))
    }

    /// Get a mutable row slice. Used by the composition routines.
    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [u8]> {
        if row < self.num_rows {
            let start = row * self.num_cols;
            Some(&mut self.cells[start..start + self.num_cols])
        } else {
            None
        }
    }

    /// Flatten the canvas into exactly `num_rows * num_cols` bytes.
    ///
    /// Row 0 left to right, then row 1, and so on. There is no header and
    /// no row delimiter: consumers must know the dimensions.
    pub fn serialize(&self) -> Vec<u8> {
        self.cells.clone()
    }

    /// Overwrite every cell from `bytes` in row-major order.
    ///
    /// Bytes past `num_rows * num_cols` are ignored. If `bytes` is too
    /// short the canvas is left untouched.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<()> {
        let expected = self.cells.len();
        if bytes.len() < expected {
            return Err(CanvasError::TruncatedInput {
                expected,
                actual: bytes.len(),
            });
        }
        self.cells.copy_from_slice(&bytes[..expected]);
        Ok(())
    }

    /// Render the canvas as text, one line per row.
    ///
    /// Bytes are mapped to chars one to one (Latin-1).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.num_rows);
        for row in self.rows() {
            out.extend(row.iter().map(|&b| char::from(b)));
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("num_rows", &self.num_rows)
            .field("num_cols", &self.num_cols)
            .field("text", &self.to_text())
            .finish()
    }
}
