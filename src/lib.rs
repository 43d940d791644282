//! # Flywheel Canvas
//!
//! A fixed-grid character buffer for shared ASCII-art drawing surfaces.
//!
//! The [`Canvas`] is a row-major grid of single-byte cells. It supports
//! bounds-checked reads and writes, rectangular extraction, overlay with
//! an optional transparency key, blank-border trimming and a flat
//! serialization used as the wire payload for syncing peers.
//!
//! ## Core Concepts
//!
//! - **One contiguous allocation**: `(row, col)` maps to `row * cols + col`
//! - **Clipping overlays**: partial overlap is truncated, not an error
//! - **Line protocol**: `/canvas_size` handshake, then `/set` updates
//! - **Single writer**: a [`CanvasActor`] serializes concurrent edits
//!
//! ## Example
//!
//! ```rust
//! use flywheel_canvas::{Canvas, Edges, BLANK};
//!
//! let mut canvas = Canvas::blank(3, 4);
//! canvas.set(1, 2, b'#').unwrap();
//!
//! let trimmed = canvas.trim(BLANK, Edges::all());
//! assert_eq!((trimmed.num_rows(), trimmed.num_cols()), (1, 1));
//! assert_eq!(canvas.serialize().len(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod canvas;
pub mod layout;
pub mod net;

// Re-exports for convenience
pub use actor::{ActorError, CanvasActor, CanvasHandle, CanvasStats};
pub use canvas::{Canvas, CanvasError, Edges, Position, TrimBounds, BLANK};
pub use layout::{Region, Viewport};
pub use net::{Command, Session, SessionConfig, SessionError};
