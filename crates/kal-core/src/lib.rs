//! kal-core — kube-apiserver log analyzer core library.
//!
//! This crate exposes the extractor, the record types and the concurrent
//! pipeline that turns a newline-delimited apiserver log into CSV rows.
//!
//! # Architecture
//!
//! ```text
//! Line source ──► line queue ──► Worker pool (N) ──► record queue ──► Sink writer
//!                                      │                                  ▲
//!                                      └──────── worker-stopped ──────────┘
//! ```
//!
//! All inter-stage communication uses bounded `tokio` channels. The line
//! source runs on the caller's task; workers and the sink writer run on
//! background tasks.

pub mod config;
pub mod duration;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod types;

pub use config::{Config, LatencyFormat};
pub use error::{ConfigError, PipelineError};
pub use extractor::Extractor;
pub use pipeline::{Pipeline, PipelineSettings, RunSummary};
pub use types::{ParsedRecord, HEADER};
