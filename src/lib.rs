//! kal — kube-apiserver log analyzer.
//!
//! Reads an apiserver log, extracts one row per request line and writes the
//! rows as CSV. The binary is a thin wrapper around [`run`]; integration
//! tests call it directly.
//!
//! # Architecture
//!
//! ```text
//! Input feed ──► Pipeline (source ► workers ► sink) ──► Output feed
//! ```
//!
//! The extractor and pipeline live in `kal-core`; file and standard-stream
//! adapters live in `kal-feeds`.

use anyhow::Context;
use std::sync::Arc;

pub use kal_core::{Config, RunSummary};
use kal_core::{Extractor, Pipeline, PipelineSettings};
use kal_feeds::{Input, Output};

/// Run one conversion as described by `config`.
///
/// Opening the input and creating the output happen before any work starts
/// and fail fast. The call returns after the output has been flushed.
pub async fn run(config: &Config) -> anyhow::Result<RunSummary> {
    config.validate()?;
    let reference_date = config.reference_date.to_naive_date()?;

    let input = Input::from_arg(&config.input.path);
    let output = Output::from_arg(&config.output.path);
    let reader = input.open().await?;
    let writer = output.create().await?;
    tracing::info!(%input, %output, %reference_date, "processing api-server logs");

    let pipeline = Pipeline::new(
        Arc::new(Extractor::new(reference_date)),
        PipelineSettings::from(&config.pipeline),
    );
    let (summary, _) = pipeline
        .run(reader, writer)
        .await
        .with_context(|| format!("converting {input} to {output}"))?;
    Ok(summary)
}
