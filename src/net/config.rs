//! Session configuration.

use crate::canvas::Canvas;
use std::time::Duration;

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration for a sync session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Peer host. `None` means standalone (no networking).
    pub host: Option<String>,
    /// Peer port.
    pub port: u16,
    /// Longest accepted command line, newline excluded.
    pub max_line_len: usize,
    /// Largest canvas (in cells) a peer may announce.
    pub max_canvas_cells: usize,
    /// Canvas size `(rows, cols)` used when running standalone.
    pub standalone_size: (usize, usize),
    /// Read timeout on the socket (`None` blocks forever).
    pub read_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            max_line_len: 100,
            max_canvas_cells: 1 << 24,
            standalone_size: (1000, 1000),
            read_timeout: None,
        }
    }
}

impl SessionConfig {
    /// Set the peer host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the peer port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the maximum command line length.
    #[must_use]
    pub const fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    /// Set the maximum canvas size a peer may announce.
    #[must_use]
    pub const fn with_max_canvas_cells(mut self, cells: usize) -> Self {
        self.max_canvas_cells = cells;
        self
    }

    /// Set the standalone canvas size.
    #[must_use]
    pub const fn with_standalone_size(mut self, rows: usize, cols: usize) -> Self {
        self.standalone_size = (rows, cols);
        self
    }

    /// Set the socket read timeout.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Whether a peer host is configured.
    pub const fn is_networked(&self) -> bool {
        self.host.is_some()
    }

    /// A blank canvas of the standalone size.
    pub fn standalone_canvas(&self) -> Canvas {
        let (rows, cols) = self.standalone_size;
        Canvas::blank(rows, cols)
    }
}
