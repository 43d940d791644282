//! Actor Model: A single writer for a shared canvas.
//!
//! The canvas is not synchronized. When edits come from more than one
//! place (local input and a network peer, say) they are funneled through
//! one thread that owns the canvas:
//!
//! ```text
//! ┌──────────────┐    CanvasCommand    ┌──────────────┐
//! │ Local edits  │ ─────────────────▶  │              │
//! └──────────────┘                     │ Canvas Thread│
//! ┌──────────────┐    CanvasCommand    │  (owner)     │
//! │ Session recv │ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod canvas_actor;
mod messages;

pub use canvas_actor::{CanvasActor, CanvasHandle};
pub use messages::{ActorError, CanvasCommand, CanvasStats};
