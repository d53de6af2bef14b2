//! Output feed — where CSV rows are written to.

use crate::STDIO_MARKER;
use kal_core::PipelineError;
use std::fmt;
use std::path::PathBuf;
use tokio::io::AsyncWrite;

pub type BoxedOutput = Box<dyn AsyncWrite + Unpin + Send>;

/// A destination for the CSV output. The sink writer buffers on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    File(PathBuf),
    Stdout,
}

impl Output {
    /// `-` selects stdout; anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_MARKER {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Create (or truncate) the destination.
    pub async fn create(&self) -> Result<BoxedOutput, PipelineError> {
        match self {
            Self::File(path) => {
                let file = tokio::fs::File::create(path)
                    .await
                    .map_err(|source| PipelineError::CreateOutput { path: path.clone(), source })?;
                tracing::debug!(path = %path.display(), "created output file");
                Ok(Box::new(file))
            }
            Self::Stdout => Ok(Box::new(tokio::io::stdout())),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "stdout"),
        }
    }
}
