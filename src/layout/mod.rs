//! Layout module: Geometry over a canvas.
//!
//! [`Region`] names an inclusive rectangle of cells and is the argument
//! and result type of extraction and trimming. [`Viewport`] maps a
//! scrolled display window onto canvas coordinates.

mod region;
mod viewport;

pub use region::Region;
pub use viewport::{Viewport, PADDING};
