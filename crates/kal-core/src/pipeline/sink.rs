//! Sink writer — the only task that touches the output stream.
//!
//! The writer alternates between draining CSV rows from the record queue and
//! counting [`WorkerStopped`] signals. Once every worker has stopped it drains
//! whatever rows are still queued, flushes, and reports completion.

use super::queue::WorkerStopped;
use crate::error::PipelineError;
use crate::types::HEADER;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Output buffer size; rows are ~150 bytes.
const WRITE_BUFFER_BYTES: usize = 256 * 1024;

/// Lifecycle of the sink writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// Writing rows while workers are still running.
    Draining,
    /// All workers stopped; writing the remainder and flushing.
    Flushing,
    Done,
}

/// What the sink wrote, returned once it reaches [`SinkState::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkSummary {
    /// Data rows written, excluding the header.
    pub records_written: u64,
    /// State the writer finished in.
    pub state: SinkState,
}

pub struct SinkWriter<W: AsyncWrite + Unpin> {
    out: BufWriter<W>,
    flush_every: u64,
    active_workers: usize,
    written: u64,
    state: SinkState,
}

impl<W: AsyncWrite + Unpin> SinkWriter<W> {
    /// `flush_every` must be non-zero; [`Config::validate`](crate::Config::validate)
    /// guarantees it for configured runs.
    pub fn new(out: W, workers: usize, flush_every: u64) -> Self {
        Self {
            out: BufWriter::with_capacity(WRITE_BUFFER_BYTES, out),
            flush_every: flush_every.max(1),
            active_workers: workers,
            written: 0,
            state: SinkState::Draining,
        }
    }

    /// Write the header and every row until all workers have stopped, then
    /// flush. Returns the summary and the underlying writer.
    pub async fn run(
        mut self,
        mut records: mpsc::Receiver<String>,
        mut stopped: mpsc::Receiver<WorkerStopped>,
    ) -> Result<(SinkSummary, W), PipelineError> {
        self.write_line(HEADER).await?;

        while self.active_workers > 0 {
            tokio::select! {
                biased;
                Some(row) = records.recv() => self.append(&row).await?,
                signal = stopped.recv() => match signal {
                    Some(WorkerStopped { worker }) => {
                        self.active_workers -= 1;
                        debug!(worker, remaining = self.active_workers, "worker stop received");
                    }
                    // Every worker is gone without reporting; nothing more can arrive.
                    None => break,
                },
            }
        }

        // A stop signal can overtake rows its worker queued just before it,
        // so finish the record queue. It closes once every worker has exited.
        self.state = SinkState::Flushing;
        debug!(state = ?self.state, records = self.written, "all workers stopped");
        while let Some(row) = records.recv().await {
            self.append(&row).await?;
        }
        self.out.flush().await.map_err(PipelineError::Write)?;

        self.state = SinkState::Done;
        info!(records = self.written, "output flushed");
        let summary = SinkSummary { records_written: self.written, state: self.state };
        Ok((summary, self.out.into_inner()))
    }

    async fn append(&mut self, row: &str) -> Result<(), PipelineError> {
        self.write_line(row).await?;
        self.written += 1;
        if self.written % self.flush_every == 0 {
            info!("wrote {} lines", self.written);
            self.out.flush().await.map_err(PipelineError::Write)?;
        }
        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> Result<(), PipelineError> {
        self.out.write_all(line.as_bytes()).await.map_err(PipelineError::Write)?;
        self.out.write_all(b"\n").await.map_err(PipelineError::Write)
    }
}
