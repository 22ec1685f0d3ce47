use std::io;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised while building, encoding, decoding or framing batches.
#[derive(Debug, Error)]
pub enum WireError {
    /// Inconsistent structure: unknown tag, row-count mismatch, limit exceeded.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error(
        "Truncated input at byte {offset}: {context} needs {needed} bytes, {remaining} remaining"
    )]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
        context: String,
    },

    #[error("Malformed column {column}: {reason}")]
    MalformedColumn { column: usize, reason: String },

    #[error("Framing error: {0}")]
    Framing(String),

    /// Peer closed the stream cleanly on a frame boundary.
    #[error("End of stream")]
    EndOfStream,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Index {index} out of bounds for column of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Stream is unusable after an earlier failed or interrupted frame")]
    StreamUnusable,
}

impl WireError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        WireError::Schema(msg.into())
    }

    pub(crate) fn malformed(column: usize, reason: impl Into<String>) -> Self {
        WireError::MalformedColumn {
            column,
            reason: reason.into(),
        }
    }

    /// True when the stream the error came from can no longer be trusted to
    /// sit on a frame boundary. The caller must discard it and reconnect.
    pub fn is_stream_fatal(&self) -> bool {
        matches!(
            self,
            WireError::TruncatedInput { .. }
                | WireError::Framing(_)
                | WireError::Io(_)
                | WireError::StreamUnusable
        )
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, WireError::EndOfStream)
    }

    pub fn log_error(&self) {
        match self {
            WireError::Schema(msg) => {
                error!("Schema error: {}", msg);
            }
            WireError::TruncatedInput {
                offset,
                needed,
                remaining,
                context,
            } => {
                error!("Truncated input while reading {}", context);
                debug!(
                    "Truncation details: offset={}, needed={}, remaining={}",
                    offset, needed, remaining
                );
            }
            WireError::MalformedColumn { column, reason } => {
                error!("Malformed column {}: {}", column, reason);
            }
            WireError::Framing(msg) => {
                error!("Framing error: {}", msg);
            }
            WireError::EndOfStream => {
                debug!("Peer closed stream on a frame boundary");
            }
            WireError::Io(e) => {
                error!("Transport I/O failed: {}", e);
                debug!("I/O error details: {:?}", e);
            }
            WireError::IndexOutOfBounds { index, len } => {
                warn!("Column access out of bounds: index {} >= {}", index, len);
            }
            WireError::StreamUnusable => {
                warn!("Attempted to use a stream already marked unusable");
            }
        }
    }
}
