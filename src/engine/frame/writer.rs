use std::io::Write;
use std::sync::atomic::AtomicBool;

use parking_lot::Mutex;
use tracing::debug;

use crate::engine::batch::Batch;
use crate::engine::errors::WireError;
use crate::engine::limits::WireLimits;

use super::encode::encode_frame;
use super::guard::{PoisonGuard, is_unusable};

/// Blocking frame writer. Shareable across threads; the internal lock keeps
/// frames from interleaving.
pub struct FrameWriter<W: Write> {
    inner: Mutex<W>,
    limits: WireLimits,
    unusable: AtomicBool,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W, limits: WireLimits) -> Self {
        Self {
            inner: Mutex::new(inner),
            limits,
            unusable: AtomicBool::new(false),
        }
    }

    pub fn limits(&self) -> &WireLimits {
        &self.limits
    }

    pub fn is_usable(&self) -> bool {
        !is_unusable(&self.unusable)
    }

    /// Writes and flushes one complete frame, returning its size in bytes.
    ///
    /// Encoding errors surface before the lock is taken and leave the stream
    /// untouched. Once bytes may have reached the stream, any failure marks
    /// the writer unusable and every later call returns `StreamUnusable`.
    pub fn write_frame(&self, batch: &Batch) -> Result<usize, WireError> {
        if !self.is_usable() {
            return Err(WireError::StreamUnusable);
        }
        let frame = encode_frame(batch, &self.limits)?;

        let mut inner = self.inner.lock();
        if !self.is_usable() {
            return Err(WireError::StreamUnusable);
        }
        let guard = PoisonGuard::arm(&self.unusable, "frame writer");
        inner.write_all(&frame)?;
        inner.flush()?;
        guard.disarm();

        debug!(
            source_id = batch.source_id(),
            kind = batch.kind().as_str(),
            columns = batch.column_count(),
            bytes = frame.len(),
            "wrote frame"
        );
        Ok(frame.len())
    }

    pub fn write_end_of_stream(&self, source_id: i64) -> Result<usize, WireError> {
        self.write_frame(&Batch::end_of_stream(source_id))
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}
