//! canvas-sync: Headless client for a shared ASCII canvas.
//!
//! Connects to a canvas server (or runs standalone when no host is
//! given), applies `/set` lines read from stdin and from the peer, and
//! prints the canvas with blank borders trimmed once stdin ends or the
//! peer hangs up, whichever comes first.

use anyhow::Context;
use clap::Parser;
use flywheel_canvas::net::{Command, Session, SessionConfig, SessionError, DEFAULT_PORT};
use flywheel_canvas::{Canvas, CanvasActor, CanvasHandle, Edges, BLANK};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::process::ExitCode;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "canvas-sync", version, about = "Headless client for a shared ASCII canvas")]
struct Args {
    /// Host to connect to. Runs standalone when omitted.
    host: Option<String>,

    /// Port on the host.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "CANVAS_PORT")]
    port: u16,

    /// Rows of the standalone canvas.
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// Columns of the standalone canvas.
    #[arg(long, default_value_t = 1000)]
    cols: usize,

    /// Print the whole canvas instead of trimming blank borders.
    #[arg(long)]
    no_trim: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "canvas-sync failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut config = SessionConfig::default()
        .with_port(args.port)
        .with_standalone_size(args.rows, args.cols);
    if let Some(host) = &args.host {
        config = config.with_host(host.clone());
    }

    let (canvas, session) = if config.is_networked() {
        let (session, canvas) = Session::connect(config).context("handshake failed")?;
        (canvas, Some(session))
    } else {
        info!("no host given, running standalone");
        (config.standalone_canvas(), None)
    };
    info!(rows = canvas.num_rows(), cols = canvas.num_cols(), "canvas ready");

    let (actor, handle) = CanvasActor::spawn(canvas)?;

    match session {
        Some(mut session) => {
            let writer = session.try_clone_writer()?;
            spawn_edit_reader(io::stdin(), handle.clone(), writer)?;
            pump(&mut session, &handle)?;
        }
        None => read_edits(io::stdin().lock(), &handle, None),
    }

    let canvas = actor.join().context("canvas thread panicked")?;
    print_canvas(&canvas, !args.no_trim)?;
    Ok(())
}

/// Apply peer updates until the read half of the socket closes.
fn pump(session: &mut Session<TcpStream>, handle: &CanvasHandle) -> anyhow::Result<()> {
    loop {
        match session.recv() {
            Ok(Some(command)) => handle.apply_command(command)?,
            Ok(None) | Err(SessionError::ConnectionClosed) => {
                info!("connection closed");
                return Ok(());
            }
            Err(SessionError::Protocol(msg)) => warn!(%msg, "skipping bad line"),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Forward local edits from `input` on a background thread.
///
/// When `input` ends the socket's read half is shut down, which makes a
/// blocked [`pump`] return.
fn spawn_edit_reader<R: Read + Send + 'static>(
    input: R,
    handle: CanvasHandle,
    mut writer: Session<TcpStream>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("canvas-stdin".to_string())
        .spawn(move || {
            read_edits(BufReader::new(input), &handle, Some(&mut writer));
            debug!("local input ended");
            if let Err(e) = writer.get_ref().shutdown(Shutdown::Read) {
                warn!(error = %e, "failed to close the read half");
            }
        })
}

/// Apply `/set` lines from `input`, forwarding them to the peer if any.
fn read_edits<R: BufRead>(
    mut input: R,
    handle: &CanvasHandle,
    mut writer: Option<&mut Session<TcpStream>>,
) {
    let mut line = Vec::new();
    loop {
        line.clear();
        match input.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        }

        let command = match Command::parse(&line) {
            Ok(command @ Command::Set { .. }) => command,
            Ok(other) => {
                warn!(?other, "only /set is accepted on stdin");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "skipping bad line");
                continue;
            }
        };

        if handle.apply_command(command).is_err() {
            break;
        }
        if let Some(writer) = writer.as_mut() {
            if let Err(e) = writer.send(&command) {
                warn!(error = %e, "failed to forward edit");
            }
        }
        debug!(?command, "local edit");
    }
}

fn print_canvas(canvas: &Canvas, trim: bool) -> io::Result<()> {
    let trimmed;
    let canvas = if trim {
        trimmed = canvas.trim(BLANK, Edges::all());
        &trimmed
    } else {
        canvas
    };

    let mut out = io::BufWriter::new(io::stdout().lock());
    for row in canvas.rows() {
        out.write_all(row)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::net::TcpListener;
    use std::sync::mpsc;

    #[test]
    fn test_input_end_stops_pump_while_peer_stays_open() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut s = Session::new(stream, SessionConfig::default());
            s.send_canvas(&Canvas::blank(3, 3)).unwrap();
            let forwarded = s.recv().unwrap();
            // Hold the connection open until the client has finished.
            let _ = done_rx.recv();
            forwarded
        });

        let config = SessionConfig::default().with_host("127.0.0.1").with_port(port);
        let (mut session, canvas) = Session::connect(config).unwrap();
        let (actor, handle) = CanvasActor::spawn(canvas).unwrap();

        let writer = session.try_clone_writer().unwrap();
        let input = Cursor::new(b"/set 1 2 x\n/canvas_size 1 1\n".to_vec());
        let reader = spawn_edit_reader(input, handle.clone(), writer).unwrap();

        pump(&mut session, &handle).unwrap();
        reader.join().unwrap();

        let canvas = actor.join().unwrap();
        assert_eq!(canvas.get(2, 1), Ok(b'x'));

        done_tx.send(()).unwrap();
        assert_eq!(
            server.join().unwrap(),
            Some(Command::Set { x: 1, y: 2, value: b'x' })
        );
    }

    #[test]
    fn test_read_edits_standalone() {
        let (actor, handle) = CanvasActor::spawn(Canvas::blank(2, 2)).unwrap();
        let input = Cursor::new(b"/set 0 0 a\ngarbage\n/set 9 9 b\n/set 1 1 c\n".to_vec());
        read_edits(input, &handle, None);

        let canvas = actor.join().unwrap();
        assert_eq!(canvas.cells(), b"a  c");
    }
}
