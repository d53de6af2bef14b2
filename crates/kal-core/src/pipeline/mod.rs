//! Pipeline — fans input lines out to extraction workers and fans their rows
//! back in to a single sink writer.
//!
//! # Shutdown
//!
//! 1. The line source reads to end of input, then sends one
//!    [`Message::EndOfStream`] per worker.
//! 2. Each worker stops at the first marker it receives, after its last row
//!    has been enqueued, and reports [`WorkerStopped`].
//! 3. The sink writer counts stop reports; after the last one it drains the
//!    record queue, flushes, and finishes.
//! 4. [`Pipeline::run`] returns only after the sink has finished.
//!
//! Both data queues are bounded at `workers * queue_factor` items, which is
//! the only back-pressure: a slow sink stalls workers, stalled workers stall
//! the reader.

pub mod queue;
pub mod sink;
pub mod source;
pub mod worker;

pub use queue::{LineMessage, Message, WorkerStopped};
pub use sink::{SinkState, SinkSummary, SinkWriter};

use crate::config::{LatencyFormat, PipelineConfig, MAX_QUEUE_CAPACITY};
use crate::error::PipelineError;
use crate::extractor::Extractor;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{info, warn};
use worker::Worker;

/// Tuning knobs for one run, usually taken from [`PipelineConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub workers: usize,
    pub queue_factor: usize,
    pub flush_every: u64,
    pub latency_format: LatencyFormat,
    pub exclude_watch: bool,
}

impl PipelineSettings {
    /// Capacity of the line queue and of the record queue, capped at
    /// [`MAX_QUEUE_CAPACITY`] for settings built without [`Config::validate`](crate::Config::validate).
    pub fn queue_capacity(&self) -> usize {
        self.workers
            .max(1)
            .saturating_mul(self.queue_factor.max(1))
            .min(MAX_QUEUE_CAPACITY)
    }
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            workers: config.workers,
            queue_factor: config.queue_factor,
            flush_every: config.flush_every,
            latency_format: config.latency_format,
            exclude_watch: config.exclude_watch,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub lines_read: u64,
    pub records_written: u64,
}

pub struct Pipeline {
    extractor: Arc<Extractor>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(extractor: Arc<Extractor>, settings: PipelineSettings) -> Self {
        Self { extractor, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Convert every request line of `input` into a CSV row on `output`.
    ///
    /// Returns once the output is flushed, together with the writer. A read
    /// error still lets the already-read lines reach the output before it is
    /// reported; a write error stops the pool early.
    pub async fn run<R, W>(&self, input: R, output: W) -> Result<(RunSummary, W), PipelineError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let workers = self.settings.workers.max(1);
        let capacity = self.settings.queue_capacity();
        info!(workers, capacity, "processing apiserver log");

        let (line_tx, line_rx) = mpsc::channel(capacity);
        let (record_tx, record_rx) = mpsc::channel(capacity);
        let (stop_tx, stop_rx) = mpsc::channel(workers);

        let sink = tokio::spawn(
            SinkWriter::new(output, workers, self.settings.flush_every).run(record_rx, stop_rx),
        );

        let lines = Arc::new(Mutex::new(line_rx));
        let mut pool = JoinSet::new();
        for id in 0..workers {
            pool.spawn(
                Worker {
                    id,
                    extractor: Arc::clone(&self.extractor),
                    latency_format: self.settings.latency_format,
                    exclude_watch: self.settings.exclude_watch,
                    lines: Arc::clone(&lines),
                    records: record_tx.clone(),
                    stopped: stop_tx.clone(),
                }
                .run(),
            );
        }
        // Workers now own the only handles; the queues close as they exit.
        drop((lines, record_tx, stop_tx));

        let read = source::feed_lines(input, line_tx, workers).await;

        let mut crashed = None;
        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "worker task failed");
                crashed.get_or_insert(e.to_string());
            }
        }

        let written = match sink.await {
            Ok(result) => result,
            Err(e) => Err(PipelineError::Task { task: "sink", reason: e.to_string() }),
        };

        let (sink_summary, output) = written?;
        let lines_read = read?;
        if let Some(reason) = crashed {
            return Err(PipelineError::Task { task: "worker", reason });
        }

        let summary = RunSummary { lines_read, records_written: sink_summary.records_written };
        info!(lines = summary.lines_read, records = summary.records_written, "done");
        Ok((summary, output))
    }
}
