//! Line source — feeds the line queue from the input stream.

use super::queue::{LineMessage, Message};
use crate::error::PipelineError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Push every line of `reader` onto `lines`, then exactly `workers`
/// `EndOfStream` markers, one per worker.
///
/// The markers are sent even when reading fails part-way, so the pool and
/// the sink still shut down; the read error is returned afterwards. Returns
/// the number of lines read.
pub async fn feed_lines<R>(
    mut reader: R,
    lines: mpsc::Sender<LineMessage>,
    workers: usize,
) -> Result<u64, PipelineError>
where
    R: AsyncBufRead + Unpin,
{
    let outcome = forward_lines(&mut reader, &lines).await;

    for _ in 0..workers {
        if lines.send(Message::EndOfStream).await.is_err() {
            break;
        }
    }
    debug!(workers, "end of input signalled");
    outcome
}

async fn forward_lines<R>(
    reader: &mut R,
    lines: &mpsc::Sender<LineMessage>,
) -> Result<u64, PipelineError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::with_capacity(512);
    let mut read = 0u64;
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).await.map_err(PipelineError::Read)?;
        if n == 0 {
            return Ok(read);
        }
        read += 1;
        if lines.send(Message::Data(decode_line(&buf))).await.is_err() {
            warn!(read, "no workers left, stopping input early");
            return Ok(read);
        }
    }
}

/// Strip the `\n` / `\r\n` terminator; invalid UTF-8 is replaced, not rejected.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
