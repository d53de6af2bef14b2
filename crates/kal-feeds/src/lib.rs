//! kal-feeds — stream adapters for kal.
//!
//! The pipeline works on any `AsyncBufRead` input and `AsyncWrite` output.
//! This crate opens the concrete ones named on the command line: a file
//! path, or `-` for stdin / stdout. Failing to open either is the only
//! setup error the run reports before any line is read.

pub mod input;
pub mod output;

pub use input::{BoxedInput, Input};
pub use output::{BoxedOutput, Output};

/// Path argument that selects the standard stream instead of a file.
pub const STDIO_MARKER: &str = "-";
