//! Region extraction and composition.
//!
//! Extraction copies an inclusive rectangle out into a new canvas.
//! Overlay copies a whole canvas into another at an offset, clipping
//! whatever falls past the destination edge. The transparent variant
//! skips source cells equal to a key byte, which lets a sparse update be
//! merged without clobbering the cells it does not touch.

use super::canvas::Canvas;
use super::error::{CanvasError, Position, Result};
use crate::layout::Region;

impl Canvas {
    /// Copy the inclusive rectangle between two corners into a new canvas.
    ///
    /// The corners may be given in any order. Fails with
    /// [`CanvasError::InvalidRegion`] if either corner is outside the
    /// canvas.
    pub fn extract_region(
        &self,
        row1: usize,
        col1: usize,
        row2: usize,
        col2: usize,
    ) -> Result<Self> {
        self.extract(Region::new(row1, col1, row2, col2))
    }

    /// Copy a [`Region`] into a new canvas.
    pub fn extract(&self, region: Region) -> Result<Self> {
        if !region.fits_in(self.num_rows(), self.num_cols()) {
            return Err(CanvasError::InvalidRegion {
                region,
                num_rows: self.num_rows(),
                num_cols: self.num_cols(),
            });
        }
        Ok(self.extract_span(
            region.top(),
            region.bottom() + 1,
            region.left(),
            region.right() + 1,
        ))
    }

    /// Copy rows `top..bottom` and columns `left..right` into a new canvas.
    ///
    /// Empty spans produce a canvas with zero rows or columns. Callers
    /// guarantee the spans are within bounds whenever they are non-empty.
    pub(crate) fn extract_span(
        &self,
        top: usize,
        bottom: usize,
        left: usize,
        right: usize,
    ) -> Self {
        let num_rows = bottom.saturating_sub(top);
        let num_cols = right.saturating_sub(left);
        let mut out = Self::new(num_rows, num_cols);
        if num_rows == 0 || num_cols == 0 {
            return out;
        }
        for (dst, src) in (0..num_rows).zip(top..bottom) {
            if let (Some(src_row), Some(dst_row)) = (self.row(src), out.row_mut(dst)) {
                dst_row.copy_from_slice(&src_row[left..right]);
            }
        }
        out
    }

    /// Copy `source` into this canvas with its top-left at `(row, col)`.
    ///
    /// Source cells landing outside this canvas are clipped. The offset
    /// itself must be a cell of this canvas, otherwise nothing is written
    /// and [`CanvasError::OutOfBounds`] is returned. On success, returns
    /// the number of cells written.
    pub fn overlay(&mut self, source: &Self, row: usize, col: usize) -> Result<usize> {
        self.blit(source, row, col, None)
    }

    /// Like [`Canvas::overlay`], but source cells equal to `skip_value`
    /// are transparent and leave the destination cell as it was.
    pub fn overlay_transparent(
        &mut self,
        source: &Self,
        row: usize,
        col: usize,
        skip_value: u8,
    ) -> Result<usize> {
        self.blit(source, row, col, Some(skip_value))
    }

    fn blit(&mut self, source: &Self, row: usize, col: usize, skip: Option<u8>) -> Result<usize> {
        if self.index_of(row, col).is_none() {
            return Err(CanvasError::OutOfBounds {
                at: Position::Cell { row, col },
                num_rows: self.num_rows(),
                num_cols: self.num_cols(),
            });
        }

        // Effective overlap, in source coordinates.
        let rows = source.num_rows().min(self.num_rows() - row);
        let cols = source.num_cols().min(self.num_cols() - col);

        let mut written = 0;
        for r in 0..rows {
            let (Some(src), Some(dst)) = (source.row(r), self.row_mut(row + r)) else {
                continue;
            };
            let src = &src[..cols];
            let dst = &mut dst[col..col + cols];
            match skip {
                None => {
                    dst.copy_from_slice(src);
                    written += cols;
                }
                Some(key) => {
                    for (d, &s) in dst.iter_mut().zip(src) {
                        if s != key {
                            *d = s;
                            written += 1;
                        }
                    }
                }
            }
        }
        Ok(written)
    }
}
