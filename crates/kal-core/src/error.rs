//! Error types for kal-core.
//!
//! Only setup and stream failures are errors. Lines that do not match the
//! apiserver pattern are dropped by the extractor and never surface here.

use std::io;
use std::path::PathBuf;

/// Failures that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot open input {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed reading input: {0}")]
    Read(#[source] io::Error),

    #[error("failed writing output: {0}")]
    Write(#[source] io::Error),

    #[error("{task} task failed: {reason}")]
    Task { task: &'static str, reason: String },
}

/// Failures while loading or validating [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
