//! Line protocol codec.
//!
//! Two newline-terminated commands travel in either direction:
//!
//! ```text
//! /canvas_size <cols> <rows>\n     followed by cols*rows raw bytes
//! /set <x> <y> <byte>\n            x is the column, y is the row
//! ```
//!
//! The `/set` payload is the single raw byte after the second space, so
//! a space is carried fine. A newline cannot be framed at all and is
//! refused by [`Command::encode`].

use super::error::{Result, SessionError};
use crate::canvas::Canvas;
use std::io::Write;
use tracing::warn;

const CANVAS_SIZE: &[u8] = b"/canvas_size";
const SET: &[u8] = b"/set";

/// A protocol command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Handshake header announcing the canvas dimensions.
    CanvasSize {
        /// Number of columns.
        cols: usize,
        /// Number of rows.
        rows: usize,
    },

    /// Write one cell.
    Set {
        /// Column. Signed so a bad peer value is caught by bounds checks.
        x: i64,
        /// Row.
        y: i64,
        /// Byte to store.
        value: u8,
    },
}

fn protocol_error(what: &str, line: &[u8]) -> SessionError {
    SessionError::Protocol(format!("{what}: {:?}", String::from_utf8_lossy(line)))
}

fn parse_num<T: std::str::FromStr>(token: &[u8], line: &[u8]) -> Result<T> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| protocol_error("bad number", line))
}

impl Command {
    /// Parse one line, with or without its trailing newline.
    pub fn parse(line: &[u8]) -> Result<Self> {
        let body = line.strip_suffix(b"\n").unwrap_or(line);
        let mut parts = body.splitn(2, |&b| b == b' ');
        let verb = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default();

        if verb == CANVAS_SIZE {
            let mut args = rest.split(|&b| b == b' ').filter(|t| !t.is_empty());
            let (Some(cols), Some(rows), None) = (args.next(), args.next(), args.next()) else {
                return Err(protocol_error("expected /canvas_size <cols> <rows>", line));
            };
            Ok(Self::CanvasSize {
                cols: parse_num(cols, line)?,
                rows: parse_num(rows, line)?,
            })
        } else if verb == SET {
            let mut args = rest.splitn(3, |&b| b == b' ');
            let (Some(x), Some(y), Some(&[value])) = (args.next(), args.next(), args.next()) else {
                return Err(protocol_error("expected /set <x> <y> <byte>", line));
            };
            Ok(Self::Set {
                x: parse_num(x, line)?,
                y: parse_num(y, line)?,
                value,
            })
        } else {
            Err(protocol_error("unknown command", line))
        }
    }

    /// Encode the command as one wire line, newline included.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(24);
        match *self {
            Self::CanvasSize { cols, rows } => {
                write!(out, "/canvas_size {cols} {rows}")?;
            }
            Self::Set { value: b'\n', .. } => return Err(SessionError::UnencodableByte(b'\n')),
            Self::Set { x, y, value } => {
                write!(out, "/set {x} {y} ")?;
                out.push(value);
            }
        }
        out.push(b'\n');
        Ok(out)
    }

    /// Apply a `/set` to a canvas.
    ///
    /// Returns `Ok(true)` if a cell was written. Out-of-bounds writes are
    /// logged and dropped. A `/canvas_size` is only valid during the
    /// handshake and is rejected here.
    pub fn apply(&self, canvas: &mut Canvas) -> Result<bool> {
        match *self {
            Self::Set { x, y, value } => {
                let cell = usize::try_from(y).ok().zip(usize::try_from(x).ok());
                if let Some(Ok(())) = cell.map(|(row, col)| canvas.set(row, col, value)) {
                    Ok(true)
                } else {
                    warn!(x, y, "dropping out-of-bounds /set");
                    Ok(false)
                }
            }
            Self::CanvasSize { .. } => {
                Err(SessionError::UnexpectedCommand("/canvas_size after handshake".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canvas_size() {
        assert_eq!(
            Command::parse(b"/canvas_size 80 24\n").unwrap(),
            Command::CanvasSize { cols: 80, rows: 24 }
        );
        assert_eq!(
            Command::parse(b"/canvas_size 3 2").unwrap(),
            Command::CanvasSize { cols: 3, rows: 2 }
        );
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(
            Command::parse(b"/set 4 7 #\n").unwrap(),
            Command::Set { x: 4, y: 7, value: b'#' }
        );
    }

    #[test]
    fn test_parse_set_space_payload() {
        assert_eq!(
            Command::parse(b"/set 1 2  \n").unwrap(),
            Command::Set { x: 1, y: 2, value: b' ' }
        );
    }

    #[test]
    fn test_parse_set_negative() {
        assert_eq!(
            Command::parse(b"/set -1 0 a").unwrap(),
            Command::Set { x: -1, y: 0, value: b'a' }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let lines: [&[u8]; 8] = [
            b"\n",
            b"/draw 1 2 x\n",
            b"/set 1 2\n",
            b"/set 1 2 ab\n",
            b"/set x 2 a\n",
            b"/canvas_size 10\n",
            b"/canvas_size 10 20 30\n",
            b"/canvas_size -1 2\n",
        ];
        for line in lines {
            assert!(
                matches!(Command::parse(line), Err(SessionError::Protocol(_))),
                "{line:?} should not parse"
            );
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            Command::CanvasSize { cols: 3, rows: 2 }.encode().unwrap(),
            b"/canvas_size 3 2\n"
        );
        assert_eq!(
            Command::Set { x: 0, y: 5, value: 0xff }.encode().unwrap(),
            b"/set 0 5 \xff\n"
        );
    }

    #[test]
    fn test_encode_newline_refused() {
        let err = Command::Set { x: 0, y: 0, value: b'\n' }.encode().unwrap_err();
        assert!(matches!(err, SessionError::UnencodableByte(b'\n')));
    }

    #[test]
    fn test_encode_parse_space() {
        let set = Command::Set { x: 9, y: 3, value: b' ' };
        assert_eq!(Command::parse(&set.encode().unwrap()).unwrap(), set);
    }

    #[test]
    fn test_apply_set() {
        let mut canvas = Canvas::blank(2, 3);
        let applied = Command::Set { x: 2, y: 1, value: b'@' }.apply(&mut canvas).unwrap();
        assert!(applied);
        assert_eq!(canvas.get(1, 2), Ok(b'@'));
    }

    #[test]
    fn test_apply_out_of_bounds_is_dropped() {
        let mut canvas = Canvas::blank(2, 3);
        let before = canvas.clone();
        for (x, y) in [(3, 0), (0, 2), (-1, 0), (0, -1)] {
            let applied = Command::Set { x, y, value: b'@' }.apply(&mut canvas).unwrap();
            assert!(!applied);
        }
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_apply_canvas_size_rejected() {
        let mut canvas = Canvas::blank(2, 3);
        let err = Command::CanvasSize { cols: 1, rows: 1 }.apply(&mut canvas).unwrap_err();
        assert!(matches!(err, SessionError::UnexpectedCommand(_)));
    }
}
