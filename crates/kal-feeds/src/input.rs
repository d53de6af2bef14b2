//! Input feed — where log lines are read from.

use crate::STDIO_MARKER;
use kal_core::PipelineError;
use std::fmt;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};

/// Read buffer size for log files; apiserver logs run to gigabytes.
const READ_BUFFER_BYTES: usize = 1024 * 1024;

pub type BoxedInput = Box<dyn AsyncBufRead + Unpin + Send>;

/// A source of newline-delimited log text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Stdin,
}

impl Input {
    /// `-` selects stdin; anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_MARKER {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Open the stream for sequential reading.
    pub async fn open(&self) -> Result<BoxedInput, PipelineError> {
        match self {
            Self::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| PipelineError::OpenInput { path: path.clone(), source })?;
                tracing::debug!(path = %path.display(), "opened input file");
                Ok(Box::new(BufReader::with_capacity(READ_BUFFER_BYTES, file)))
            }
            Self::Stdin => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "stdin"),
        }
    }
}
