//! Line-oriented transport for the module channel.
//!
//! One JSON invocation envelope per input line, one JSON response envelope per
//! output line:
//!
//! ```text
//! in : {"method":"select","arguments":{"id":42,"name":"octo","fullName":"octo/repo"}}
//! out: {"status":"success","result":true}
//! in : {"method":"foo"}
//! out: {"status":"not_implemented"}
//! in : not json
//! out: {"status":"error","code":"MALFORMED_CALL","message":"..."}
//! ```
//!
//! Blank lines are skipped.  A malformed line is answered and the loop keeps
//! going.  End of input ends the session cleanly.

use std::io::BufRead;

use repo_bridge_core::protocol::messages::error_codes;
use repo_bridge_core::{decode_call, encode_response, MethodResponse};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::dispatch::BridgeDispatcher;

/// Capacity of the queue between the stdin thread and the channel loop.
const STDIN_QUEUE_CAPACITY: usize = 64;

/// Counters for one channel session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Lines that produced a response, malformed ones included.
    pub responses: u64,
    /// Lines that could not be parsed as an invocation envelope.
    pub malformed: u64,
}

/// Serves invocations from `reader` until end of input.
///
/// Every non-blank line gets exactly one response line on `writer`, flushed
/// before the next line is read.  Lines are read as raw bytes, so a line that
/// is not UTF-8 is answered with `MALFORMED_CALL` like any other bad envelope.
///
/// # Errors
///
/// Returns any I/O error from reading or writing.  Protocol errors are
/// answered on the channel instead.
pub async fn run_channel<R, W>(
    mut reader: R,
    mut writer: W,
    dispatcher: &BridgeDispatcher,
) -> std::io::Result<ChannelStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = ChannelStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        serve_line(&buf, &mut writer, dispatcher, &mut stats).await?;
    }

    log_closed(&stats);
    Ok(stats)
}

/// Same as [`run_channel`], but lines arrive on a queue fed by
/// [`spawn_stdin_reader`].  Ends when the sending side is dropped.
///
/// # Errors
///
/// Returns any I/O error from writing.
pub async fn run_channel_lines<W>(
    mut lines: mpsc::Receiver<Vec<u8>>,
    mut writer: W,
    dispatcher: &BridgeDispatcher,
) -> std::io::Result<ChannelStats>
where
    W: AsyncWrite + Unpin,
{
    let mut stats = ChannelStats::default();
    while let Some(line) = lines.recv().await {
        serve_line(&line, &mut writer, dispatcher, &mut stats).await?;
    }

    log_closed(&stats);
    Ok(stats)
}

/// Reads stdin on a dedicated OS thread and forwards each raw line.
///
/// Blocking reads on this thread never hold up runtime shutdown, so the
/// process can exit on Ctrl+C while a read is still pending.  The queue
/// closes on end of input or on a read error.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<Vec<u8>>> {
    let (tx, rx) = mpsc::channel(STDIN_QUEUE_CAPACITY);
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || stdin_loop(tx))?;
    Ok(rx)
}

fn stdin_loop(tx: mpsc::Sender<Vec<u8>>) {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        let mut line = Vec::new();
        match input.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("stdin read failed: {e}");
                break;
            }
        }
    }
    debug!("stdin reader finished");
}

/// Answers one raw line.  Blank lines produce no response.
async fn serve_line<W>(
    raw: &[u8],
    writer: &mut W,
    dispatcher: &BridgeDispatcher,
    stats: &mut ChannelStats,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = match std::str::from_utf8(raw) {
        Ok(line) if line.trim().is_empty() => return Ok(()),
        Ok(line) => match decode_call(line) {
            Ok(call) => {
                debug!("channel call `{}`", call.method);
                dispatcher.handle(&call)
            }
            Err(e) => {
                warn!("malformed channel line: {e}");
                stats.malformed += 1;
                MethodResponse::error(error_codes::MALFORMED_CALL, e.to_string())
            }
        },
        Err(e) => {
            warn!("channel line is not UTF-8: {e}");
            stats.malformed += 1;
            MethodResponse::error(
                error_codes::MALFORMED_CALL,
                format!("line is not valid UTF-8: {e}"),
            )
        }
    };

    let encoded = encode_response(&response)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    writer.write_all(encoded.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    stats.responses += 1;
    Ok(())
}

fn log_closed(stats: &ChannelStats) {
    debug!(
        "channel closed after {} responses ({} malformed)",
        stats.responses, stats.malformed
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
