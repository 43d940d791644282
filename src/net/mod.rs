//! Net module: Line-protocol synchronization of a canvas.
//!
//! A [`Session`] owns one connection. The peer first sends the canvas
//! size and a raw serialized payload, then both sides exchange
//! single-cell `/set` updates. Updates are applied immediately, last
//! write wins, with no acknowledgement.

mod config;
mod error;
mod protocol;
mod session;

pub use config::{SessionConfig, DEFAULT_PORT};
pub use error::{Result, SessionError};
pub use protocol::Command;
pub use session::Session;
