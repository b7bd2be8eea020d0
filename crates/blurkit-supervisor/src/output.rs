//! Line-by-line forwarding of worker output streams.

use std::io::{BufRead, BufReader, Read};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

/// Which worker stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn label(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

/// Spawn a reader thread that hands every line of `reader` to `on_line`.
///
/// Lines are decoded lossily so a stray non-UTF-8 byte does not end the
/// stream. The thread exits at EOF or on the first read error.
pub(crate) fn forward_lines<R, F>(
    reader: R,
    stream: Stream,
    mut on_line: F,
) -> std::io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
    F: FnMut(&str) + Send + 'static,
{
    thread::Builder::new()
        .name(format!("worker-{}", stream.label()))
        .spawn(move || {
            let mut reader = BufReader::new(reader);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf);
                        let line = line.trim_end_matches(['\r', '\n']);
                        if !line.is_empty() {
                            on_line(line);
                        }
                    }
                    Err(e) => {
                        debug!(stream = stream.label(), error = %e, "worker stream read failed");
                        break;
                    }
                }
            }
            debug!(stream = stream.label(), "worker stream closed");
        })
}

/// Emit a worker line through `tracing`: stdout at info, stderr at warn.
pub(crate) fn log_line(pid: u32, stream: Stream, line: &str) {
    match stream {
        Stream::Stdout => info!(target: "blurkit::worker", pid, "{line}"),
        Stream::Stderr => warn!(target: "blurkit::worker", pid, "{line}"),
    }
}

// =============================================================================
// TESTS
// =============================================================================
