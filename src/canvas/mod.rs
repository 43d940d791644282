//! Canvas module: The fixed-grid character buffer.
//!
//! This module contains:
//! - [`Canvas`]: A row-major grid of single-byte cells
//! - [`Edges`]: Edge selection for border trimming
//! - [`CanvasError`]: Bounds, region and truncation failures
//!
//! Extraction, overlay and trimming are implemented as methods on
//! [`Canvas`] in their own files.

#[allow(clippy::module_inception)]
mod canvas;
mod compose;
mod error;
mod trim;

pub use canvas::{Canvas, BLANK};
pub use error::{CanvasError, Position, Result};
pub use trim::{Edges, TrimBounds};
