//! Error types for the sync session.

use crate::canvas::CanvasError;
use thiserror::Error;

/// Errors raised while talking the line protocol.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An I/O error occurred on the stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A canvas operation failed (e.g. a short initial payload).
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),

    /// A line could not be parsed as a command.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A well-formed command arrived where it is not allowed.
    #[error("unexpected command: {0}")]
    UnexpectedCommand(String),

    /// A line exceeded the configured limit without a newline.
    #[error("line longer than {limit} bytes")]
    LineTooLong {
        /// Configured maximum line length.
        limit: usize,
    },

    /// The peer announced a canvas larger than the configured limit.
    #[error("canvas of {rows}x{cols} exceeds the limit of {limit} cells")]
    CanvasTooLarge {
        /// Announced rows.
        rows: usize,
        /// Announced columns.
        cols: usize,
        /// Configured maximum cell count.
        limit: usize,
    },

    /// The byte cannot be carried by a newline-framed `/set`.
    #[error("byte {0:#04x} cannot be sent in a /set line")]
    UnencodableByte(u8),

    /// No host was configured for a networked session.
    #[error("no host configured")]
    NoHost,

    /// The stream ended in the middle of a message.
    #[error("connection closed")]
    ConnectionClosed,
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
