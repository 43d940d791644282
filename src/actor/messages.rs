//! Message types for the canvas actor.
//!
//! These enums define the protocol between the canvas thread and the
//! handles that feed it.

use crate::canvas::Canvas;
use crate::net::Command;
use crossbeam_channel::Sender;
use thiserror::Error;

/// Commands sent to the canvas thread.
///
/// Mutations are fire-and-forget: failures are logged by the actor and
/// counted in [`CanvasStats::rejected`]. Queries carry a reply channel.
#[derive(Debug)]
pub enum CanvasCommand {
    /// Write one cell.
    Set {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
        /// Byte to store.
        value: u8,
    },

    /// Overwrite every cell.
    Fill(u8),

    /// Overlay another canvas at an offset.
    Overlay {
        /// Canvas to copy from.
        source: Box<Canvas>,
        /// Destination row of the source's top-left cell.
        row: usize,
        /// Destination column of the source's top-left cell.
        col: usize,
        /// Transparency key, if any.
        skip: Option<u8>,
    },

    /// Apply a protocol command.
    Apply(Command),

    /// Reply with a copy of the canvas.
    Snapshot(Sender<Canvas>),

    /// Reply with the serialized canvas.
    Serialize(Sender<Vec<u8>>),

    /// Reply with the current statistics.
    Stats(Sender<CanvasStats>),

    /// Stop the canvas thread.
    Shutdown,
}

/// Counters kept by the canvas thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasStats {
    /// Mutating commands processed.
    pub mutations: u64,
    /// Cells written by those commands.
    pub cells_written: u64,
    /// Mutations rejected (bounds errors, bad protocol commands).
    pub rejected: u64,
}

/// Errors seen by handles.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorError {
    /// The canvas thread has stopped.
    #[error("canvas actor has stopped")]
    Disconnected,
}
