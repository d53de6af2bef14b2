//! Queue element types shared by the pipeline stages.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// An element of the line queue.
///
/// `EndOfStream` is a variant rather than a reserved payload, so no input
/// line (including an empty one) can be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<T> {
    Data(T),
    EndOfStream,
}

/// Sent once by each worker after it has observed its `EndOfStream` and
/// will enqueue nothing further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStopped {
    pub worker: usize,
}

/// Raw input lines fanned out to the pool.
pub type LineMessage = Message<String>;

/// The line queue receiver, shared by every worker. A worker holds the lock
/// only while waiting for its next item.
pub type SharedLineReceiver = Arc<Mutex<mpsc::Receiver<LineMessage>>>;
