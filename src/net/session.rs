//! Session: One connection speaking the line protocol.
//!
//! The session owns its stream. Every byte read goes through one
//! `BufReader`, so payload bytes that arrive in the same packet as the
//! handshake header are not lost.

use super::config::SessionConfig;
use super::error::{Result, SessionError};
use super::protocol::Command;
use crate::canvas::Canvas;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use tracing::{debug, info};

/// A protocol session over a byte stream.
pub struct Session<S: Read + Write> {
    /// Buffered stream. Writes go to the inner stream directly.
    reader: BufReader<S>,
    /// Configuration.
    config: SessionConfig,
    /// Reusable line buffer.
    line: Vec<u8>,
}

impl Session<TcpStream> {
    /// Connect to the configured host and run the client handshake.
    ///
    /// Returns the session and the initial canvas sent by the peer.
    pub fn connect(config: SessionConfig) -> Result<(Self, Canvas)> {
        let host = config.host.clone().ok_or(SessionError::NoHost)?;
        let stream = TcpStream::connect((host.as_str(), config.port))?;
        stream.set_read_timeout(config.read_timeout)?;
        info!(host = %host, port = config.port, "connected");

        let mut session = Self::new(stream, config);
        let canvas = session.handshake()?;
        Ok((session, canvas))
    }

    /// A second session on the same socket, for sending from another thread.
    ///
    /// Only use it to send: it does not share this session's read buffer.
    pub fn try_clone_writer(&self) -> Result<Self> {
        let stream = self.get_ref().try_clone()?;
        Ok(Self::new(stream, self.config.clone()))
    }
}

impl<S: Read + Write> Session<S> {
    /// Wrap an already connected stream.
    pub fn new(stream: S, config: SessionConfig) -> Self {
        let line = Vec::with_capacity(config.max_line_len + 1);
        Self {
            reader: BufReader::new(stream),
            config,
            line,
        }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }

    /// Unwrap the session, returning the stream.
    ///
    /// Any bytes already buffered but not yet consumed are lost.
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }

    /// Read one newline-terminated line into `self.line`.
    ///
    /// Returns `false` on a clean end of stream.
    fn read_line(&mut self) -> Result<bool> {
        let limit = self.config.max_line_len;
        self.line.clear();
        let n = self
            .reader
            .by_ref()
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut self.line)?;

        if n == 0 {
            return Ok(false);
        }
        if self.line.last() != Some(&b'\n') {
            if self.line.len() > limit {
                return Err(SessionError::LineTooLong { limit });
            }
            return Err(SessionError::ConnectionClosed);
        }
        Ok(true)
    }

    /// Client side of the handshake.
    ///
    /// Reads `/canvas_size <cols> <rows>`, allocates a blank canvas and
    /// fills it from exactly `cols * rows` raw bytes. A short payload is
    /// reported as [`CanvasError::TruncatedInput`](crate::CanvasError).
    pub fn handshake(&mut self) -> Result<Canvas> {
        if !self.read_line()? {
            return Err(SessionError::ConnectionClosed);
        }
        let (cols, rows) = match Command::parse(&self.line)? {
            Command::CanvasSize { cols, rows } => (cols, rows),
            other => {
                return Err(SessionError::UnexpectedCommand(format!(
                    "{other:?} before /canvas_size"
                )))
            }
        };

        let limit = self.config.max_canvas_cells;
        let cells = rows
            .checked_mul(cols)
            .filter(|&n| n <= limit)
            .ok_or(SessionError::CanvasTooLarge { rows, cols, limit })?;

        let mut payload = Vec::with_capacity(cells);
        self.reader
            .by_ref()
            .take(cells as u64)
            .read_to_end(&mut payload)?;

        let mut canvas = Canvas::blank(rows, cols);
        canvas.deserialize(&payload)?;
        info!(rows, cols, "received canvas");
        Ok(canvas)
    }

    /// Server side of the handshake: send the size line and the payload.
    pub fn send_canvas(&mut self, canvas: &Canvas) -> Result<()> {
        let header = Command::CanvasSize {
            cols: canvas.num_cols(),
            rows: canvas.num_rows(),
        }
        .encode()?;
        let stream = self.reader.get_mut();
        stream.write_all(&header)?;
        stream.write_all(&canvas.serialize())?;
        stream.flush()?;
        debug!(rows = canvas.num_rows(), cols = canvas.num_cols(), "sent canvas");
        Ok(())
    }

    /// Send one command.
    pub fn send(&mut self, command: &Command) -> Result<()> {
        let bytes = command.encode()?;
        let stream = self.reader.get_mut();
        stream.write_all(&bytes)?;
        stream.flush()?;
        Ok(())
    }

    /// Send a single-cell update for column `x`, row `y`.
    pub fn send_set(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) else {
            return Err(SessionError::Protocol(format!("coordinate ({x}, {y}) too large")));
        };
        self.send(&Command::Set { x, y, value })
    }

    /// Receive the next command.
    ///
    /// Returns `None` on a clean end of stream.
    pub fn recv(&mut self) -> Result<Option<Command>> {
        if !self.read_line()? {
            return Ok(None);
        }
        let command = Command::parse(&self.line)?;
        debug!(?command, "received");
        Ok(Some(command))
    }

    /// Receive the next command and apply it to `canvas`.
    ///
    /// Returns `None` on a clean end of stream, otherwise whether a cell
    /// was written.
    pub fn recv_apply(&mut self, canvas: &mut Canvas) -> Result<Option<bool>> {
        match self.recv()? {
            Some(command) => command.apply(canvas).map(Some),
            None => Ok(None),
        }
    }
}

impl<S: Read + Write> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("buffered", &self.reader.buffer().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasError;
    use std::io::Cursor;
    use std::net::TcpListener;
    use std::thread;

    /// In-memory stream: reads from a script, records writes.
    struct Duplex {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Duplex {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn session(input: &[u8]) -> Session<Duplex> {
        Session::new(Duplex::new(input), SessionConfig::default())
    }

    #[test]
    fn test_handshake_then_updates() {
        let mut s = session(b"/canvas_size 2 3\n012345/set 1 0 X\n/set 0 2  \n");
        let mut canvas = s.handshake().unwrap();
        assert_eq!(canvas, Canvas::from_bytes(3, 2, b"012345"));

        assert_eq!(s.recv_apply(&mut canvas).unwrap(), Some(true));
        assert_eq!(canvas.get(0, 1), Ok(b'X'));

        assert_eq!(s.recv_apply(&mut canvas).unwrap(), Some(true));
        assert_eq!(canvas.get(2, 0), Ok(b' '));

        assert_eq!(s.recv_apply(&mut canvas).unwrap(), None);
    }

    #[test]
    fn test_handshake_truncated_payload() {
        let mut s = session(b"/canvas_size 2 3\n0123");
        let err = s.handshake().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Canvas(CanvasError::TruncatedInput {
                expected: 6,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_handshake_requires_size_first() {
        let mut s = session(b"/set 0 0 a\n");
        assert!(matches!(
            s.handshake().unwrap_err(),
            SessionError::UnexpectedCommand(_)
        ));

        let mut s = session(b"");
        assert!(matches!(
            s.handshake().unwrap_err(),
            SessionError::ConnectionClosed
        ));
    }

    #[test]
    fn test_handshake_rejects_huge_canvas() {
        let config = SessionConfig::default().with_max_canvas_cells(100);
        let mut s = Session::new(Duplex::new(b"/canvas_size 20 20\n"), config);
        assert!(matches!(
            s.handshake().unwrap_err(),
            SessionError::CanvasTooLarge { rows: 20, cols: 20, limit: 100 }
        ));
    }

    #[test]
    fn test_line_too_long() {
        let config = SessionConfig::default().with_max_line_len(8);
        let mut s = Session::new(Duplex::new(b"/set 1000 1000 x\n"), config);
        assert!(matches!(
            s.recv().unwrap_err(),
            SessionError::LineTooLong { limit: 8 }
        ));
    }

    #[test]
    fn test_partial_line_is_connection_closed() {
        let mut s = session(b"/set 1 1");
        assert!(matches!(s.recv().unwrap_err(), SessionError::ConnectionClosed));
    }

    #[test]
    fn test_send_canvas_and_set() {
        let mut s = session(b"");
        s.send_canvas(&Canvas::from_bytes(2, 2, b"ab d")).unwrap();
        s.send_set(1, 0, b'#').unwrap();
        assert_eq!(s.get_ref().output, b"/canvas_size 2 2\nab d/set 1 0 #\n");

        assert!(matches!(
            s.send_set(0, 0, b'\n').unwrap_err(),
            SessionError::UnencodableByte(b'\n')
        ));
    }

    #[test]
    fn test_tcp_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut s = Session::new(stream, SessionConfig::default());
            s.send_canvas(&Canvas::from_bytes(2, 3, b"abcdef")).unwrap();
            s.send_set(2, 1, b'!').unwrap();
            // Echo back whatever the client sends.
            s.recv().unwrap()
        });

        let config = SessionConfig::default().with_host("127.0.0.1").with_port(port);
        let (mut client, mut canvas) = Session::connect(config).unwrap();
        assert_eq!(canvas.cells(), b"abcdef");

        assert_eq!(client.recv_apply(&mut canvas).unwrap(), Some(true));
        assert_eq!(canvas.get(1, 2), Ok(b'!'));

        let mut writer = client.try_clone_writer().unwrap();
        writer.send_set(0, 1, b'z').unwrap();
        let echoed = server.join().unwrap();
        assert_eq!(echoed, Some(Command::Set { x: 0, y: 1, value: b'z' }));
    }

    #[test]
    fn test_connect_without_host() {
        assert!(matches!(
            Session::connect(SessionConfig::default()).unwrap_err(),
            SessionError::NoHost
        ));
    }
}
