//! Extraction worker — one unit of the worker pool.

use super::queue::{Message, SharedLineReceiver, WorkerStopped};
use crate::config::LatencyFormat;
use crate::extractor::Extractor;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Everything a worker needs, moved into its task.
pub struct Worker {
    pub id: usize,
    pub extractor: Arc<Extractor>,
    pub latency_format: LatencyFormat,
    pub exclude_watch: bool,
    pub lines: SharedLineReceiver,
    pub records: mpsc::Sender<String>,
    pub stopped: mpsc::Sender<WorkerStopped>,
}

impl Worker {
    /// Process lines one at a time until this worker's `EndOfStream`, then
    /// report [`WorkerStopped`]. The record sender is dropped on return, after
    /// the last record was enqueued.
    pub async fn run(self) {
        let mut processed = 0u64;
        loop {
            let next = { self.lines.lock().await.recv().await };
            let line = match next {
                Some(Message::Data(line)) => line,
                Some(Message::EndOfStream) | None => break,
            };
            processed += 1;

            let Some(record) = self.extractor.extract(&line) else {
                continue;
            };
            if self.exclude_watch && record.is_watch() {
                continue;
            }
            if self.records.send(record.to_csv(self.latency_format)).await.is_err() {
                warn!(worker = self.id, "record queue closed, worker exiting");
                break;
            }
        }

        debug!(worker = self.id, processed, "worker stopped");
        let _ = self.stopped.send(WorkerStopped { worker: self.id }).await;
    }
}
