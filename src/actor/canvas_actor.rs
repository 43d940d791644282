//! Canvas Actor: Dedicated thread that owns a canvas.
//!
//! The canvas itself has no locking. This actor gives it a single writer:
//! local edits and remote updates are sent as [`CanvasCommand`]s and
//! applied strictly in arrival order by one thread.

use super::messages::{ActorError, CanvasCommand, CanvasStats};
use crate::canvas::Canvas;
use crate::net::Command;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Capacity of the command channel.
const COMMAND_CAPACITY: usize = 256;

/// Canvas actor that owns the canvas thread.
pub struct CanvasActor {
    /// Handle to the canvas thread. Yields the final canvas.
    handle: Option<JoinHandle<Canvas>>,
    /// Sender kept for shutdown.
    tx: Sender<CanvasCommand>,
}

/// Cloneable handle for sending commands to the canvas thread.
#[derive(Debug, Clone)]
pub struct CanvasHandle {
    tx: Sender<CanvasCommand>,
}

impl CanvasActor {
    /// Spawn the canvas thread, moving `canvas` into it.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(canvas: Canvas) -> io::Result<(Self, CanvasHandle)> {
        let (tx, rx) = bounded::<CanvasCommand>(COMMAND_CAPACITY);

        let handle = thread::Builder::new()
            .name("flywheel-canvas".to_string())
            .spawn(move || Self::run_loop(&rx, canvas))?;

        let handle_tx = tx.clone();
        Ok((
            Self {
                handle: Some(handle),
                tx,
            },
            CanvasHandle { tx: handle_tx },
        ))
    }

    /// Signal the canvas thread to stop after the commands already queued.
    pub fn shutdown(&self) {
        let _ = self.tx.send(CanvasCommand::Shutdown);
    }

    /// Stop the canvas thread and return the final canvas.
    ///
    /// Returns `None` if the thread panicked.
    pub fn join(mut self) -> Option<Canvas> {
        self.shutdown();
        self.handle.take().and_then(|h| h.join().ok())
    }

    /// Main command loop.
    fn run_loop(receiver: &Receiver<CanvasCommand>, mut canvas: Canvas) -> Canvas {
        let mut stats = CanvasStats::default();

        while let Ok(command) = receiver.recv() {
            match command {
                CanvasCommand::Set { row, col, value } => {
                    let result = canvas.set(row, col, value).map(|()| 1);
                    Self::record(&mut stats, result);
                }
                CanvasCommand::Fill(value) => {
                    canvas.fill(value);
                    Self::record(&mut stats, Ok::<_, String>(canvas.len()));
                }
                CanvasCommand::Overlay { source, row, col, skip } => {
                    let result = match skip {
                        Some(key) => canvas.overlay_transparent(&source, row, col, key),
                        None => canvas.overlay(&source, row, col),
                    };
                    Self::record(&mut stats, result);
                }
                CanvasCommand::Apply(command) => {
                    let result = match command.apply(&mut canvas) {
                        Ok(true) => Ok(1),
                        Ok(false) => Err("protocol update out of bounds".to_string()),
                        Err(e) => Err(e.to_string()),
                    };
                    Self::record(&mut stats, result);
                }
                CanvasCommand::Snapshot(reply) => {
                    let _ = reply.send(canvas.clone());
                }
                CanvasCommand::Serialize(reply) => {
                    let _ = reply.send(canvas.serialize());
                }
                CanvasCommand::Stats(reply) => {
                    let _ = reply.send(stats);
                }
                CanvasCommand::Shutdown => break,
            }
        }

        debug!(?stats, "canvas actor stopped");
        canvas
    }

    fn record<E: std::fmt::Display>(stats: &mut CanvasStats, result: Result<usize, E>) {
        stats.mutations += 1;
        match result {
            Ok(cells) => stats.cells_written += cells as u64,
            Err(e) => {
                stats.rejected += 1;
                warn!(error = %e, "canvas command rejected");
            }
        }
    }
}

impl Drop for CanvasActor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx.send(CanvasCommand::Shutdown);
            let _ = handle.join();
        }
    }
}

impl CanvasHandle {
    fn send(&self, command: CanvasCommand) -> Result<(), ActorError> {
        self.tx.send(command).map_err(|_| ActorError::Disconnected)
    }

    fn query<T>(&self, make: impl FnOnce(Sender<T>) -> CanvasCommand) -> Result<T, ActorError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(make(reply_tx))?;
        reply_rx.recv().map_err(|_| ActorError::Disconnected)
    }

    /// Queue a single-cell write.
    pub fn set(&self, row: usize, col: usize, value: u8) -> Result<(), ActorError> {
        self.send(CanvasCommand::Set { row, col, value })
    }

    /// Queue a fill of every cell.
    pub fn fill(&self, value: u8) -> Result<(), ActorError> {
        self.send(CanvasCommand::Fill(value))
    }

    /// Queue an overlay of `source` at `(row, col)`.
    pub fn overlay(&self, source: Canvas, row: usize, col: usize) -> Result<(), ActorError> {
        self.send(CanvasCommand::Overlay {
            source: Box::new(source),
            row,
            col,
            skip: None,
        })
    }

    /// Queue a transparent overlay of `source` at `(row, col)`.
    pub fn overlay_transparent(
        &self,
        source: Canvas,
        row: usize,
        col: usize,
        skip_value: u8,
    ) -> Result<(), ActorError> {
        self.send(CanvasCommand::Overlay {
            source: Box::new(source),
            row,
            col,
            skip: Some(skip_value),
        })
    }

    /// Queue a protocol command (local or from a peer).
    pub fn apply_command(&self, command: Command) -> Result<(), ActorError> {
        self.send(CanvasCommand::Apply(command))
    }

    /// Get a copy of the canvas after all previously queued commands.
    pub fn snapshot(&self) -> Result<Canvas, ActorError> {
        self.query(CanvasCommand::Snapshot)
    }

    /// Get the serialized canvas after all previously queued commands.
    pub fn serialize(&self) -> Result<Vec<u8>, ActorError> {
        self.query(CanvasCommand::Serialize)
    }

    /// Get the actor's counters.
    pub fn stats(&self) -> Result<CanvasStats, ActorError> {
        self.query(CanvasCommand::Stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_applies_in_order() {
        let (actor, handle) = CanvasActor::spawn(Canvas::blank(2, 3)).unwrap();
        handle.set(0, 0, b'a').unwrap();
        handle.set(0, 0, b'b').unwrap();
        handle
            .apply_command(Command::Set { x: 2, y: 1, value: b'z' })
            .unwrap();

        let snapshot = handle.snapshot().unwrap();
        assert_eq!(snapshot.get(0, 0), Ok(b'b'));
        assert_eq!(snapshot.get(1, 2), Ok(b'z'));

        let final_canvas = actor.join().unwrap();
        assert_eq!(final_canvas, snapshot);
    }

    #[test]
    fn test_actor_overlay_and_serialize() {
        let (actor, handle) = CanvasActor::spawn(Canvas::blank(2, 2)).unwrap();
        handle.fill(b'.').unwrap();
        handle
            .overlay_transparent(Canvas::from_bytes(1, 2, b"#."), 1, 0, b'.')
            .unwrap();
        assert_eq!(handle.serialize().unwrap(), b"..#.");
        handle.overlay(Canvas::from_bytes(1, 1, b"@"), 0, 1).unwrap();
        assert_eq!(handle.serialize().unwrap(), b".@#.");
        drop(actor);
    }

    #[test]
    fn test_actor_counts_rejections() {
        let (actor, handle) = CanvasActor::spawn(Canvas::blank(2, 2)).unwrap();
        handle.set(5, 5, b'x').unwrap();
        handle.apply_command(Command::Set { x: -1, y: 0, value: b'x' }).unwrap();
        handle.overlay(Canvas::blank(1, 1), 9, 9).unwrap();
        handle.set(1, 1, b'x').unwrap();

        let stats = handle.stats().unwrap();
        assert_eq!(stats.mutations, 4);
        assert_eq!(stats.rejected, 3);
        assert_eq!(stats.cells_written, 1);
        assert_eq!(actor.join().unwrap().get(1, 1), Ok(b'x'));
    }

    #[test]
    fn test_handle_after_shutdown() {
        let (actor, handle) = CanvasActor::spawn(Canvas::new(1, 1)).unwrap();
        actor.join().unwrap();
        assert_eq!(handle.snapshot().unwrap_err(), ActorError::Disconnected);
    }

    #[test]
    fn test_handles_from_many_threads() {
        let (actor, handle) = CanvasActor::spawn(Canvas::blank(4, 4)).unwrap();
        let workers: Vec<_> = (0..4)
            .map(|row| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for col in 0..4 {
                        handle.set(row, col, b'0' + row as u8).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        let canvas = actor.join().unwrap();
        assert_eq!(canvas.cells(), b"0000111122223333");
    }
}
